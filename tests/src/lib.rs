//! End-to-end tests over the public `darkly-core` API. Most run against a
//! simulated network; the `#[ignore]`d ones need ICMP sockets and a loopback.

#[cfg(test)]
mod support;

mod ping;
mod sweep;
