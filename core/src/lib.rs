//! # darkly core
//!
//! ICMP reachability probing for single hosts and whole IPv4 ranges.
//!
//! * [`network`]: the echo probe client and reverse DNS resolver.
//! * [`scanner`]: per-host evaluation and the bounded-concurrency range sweep.
//! * [`report`]: ordering and rendering of sweep results.
//! * [`ping`]: continuous pinging of a single target.
//! * [`stop`]: cooperative cancellation shared by sweeps and ping sessions.

pub mod network;
pub mod ping;
pub mod report;
pub mod scanner;
pub mod stop;
