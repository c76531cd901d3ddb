//! Liveness verdict for one address.
//!
//! A host counts as alive when **any** of its attempts is answered, which
//! tolerates transient packet loss. Only live hosts get a reverse lookup.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use darkly_common::config::{DEFAULT_ATTEMPTS, DEFAULT_SWEEP_TIMEOUT, ScanSettings};
use darkly_common::network::host::HostResult;
use tracing::{debug, trace};

use crate::network::dns::{ReverseResolver, SystemResolver};
use crate::network::icmp::{IcmpProbeClient, ProbeClient, ProbeOutcome};

#[derive(Clone)]
pub struct HostProbe {
    client: Arc<dyn ProbeClient>,
    resolver: Option<Arc<dyn ReverseResolver>>,
    attempts: u32,
    timeout: Duration,
}

impl HostProbe {
    pub fn new(client: Arc<dyn ProbeClient>, resolver: Option<Arc<dyn ReverseResolver>>) -> Self {
        Self {
            client,
            resolver,
            attempts: DEFAULT_ATTEMPTS,
            timeout: DEFAULT_SWEEP_TIMEOUT,
        }
    }

    /// ICMP probes and the system resolver, tuned by `settings`.
    pub fn system(settings: &ScanSettings) -> Self {
        let resolver: Option<Arc<dyn ReverseResolver>> = if settings.no_dns {
            None
        } else {
            Some(Arc::new(SystemResolver))
        };
        Self::new(Arc::new(IcmpProbeClient::new()), resolver)
            .with_attempts(settings.attempts)
            .with_timeout(settings.timeout)
    }

    /// At least one attempt is always made.
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub async fn evaluate(&self, addr: Ipv4Addr) -> HostResult {
        if self.count_replies(addr).await == 0 {
            return HostResult::unreachable(addr);
        }
        let hostname: Option<String> = self.lookup_hostname(addr).await;
        HostResult::alive(addr, hostname)
    }

    async fn count_replies(&self, addr: Ipv4Addr) -> u32 {
        let mut replies: u32 = 0;
        for attempt in 1..=self.attempts {
            match self.client.probe(addr, self.timeout).await {
                ProbeOutcome::Success(reply) => {
                    trace!(%addr, attempt, rtt_ms = reply.rtt.as_millis() as u64, "echo reply");
                    replies += 1;
                }
                ProbeOutcome::Failure(status) => {
                    trace!(%addr, attempt, %status, "no echo reply");
                }
                ProbeOutcome::Error(message) => {
                    debug!(%addr, attempt, "ping error: {message}");
                }
            }
        }
        replies
    }

    async fn lookup_hostname(&self, addr: Ipv4Addr) -> Option<String> {
        let resolver = self.resolver.as_ref()?;
        match resolver.resolve(addr).await {
            Ok(hostname) => Some(hostname),
            Err(e) => {
                debug!("DNS resolution error for {addr}: {e}");
                None
            }
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
