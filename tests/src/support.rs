use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use darkly_core::network::dns::{ResolutionError, ReverseResolver};
use darkly_core::network::icmp::{EchoReply, ProbeClient, ProbeOutcome, ProbeStatus};

struct Host {
    hostname: Option<&'static str>,
    /// First attempt (1-based) that gets an answer.
    answers_from: u32,
}

/// In-memory network that answers probes and reverse lookups.
#[derive(Default)]
pub struct SimulatedNetwork {
    hosts: HashMap<Ipv4Addr, Host>,
    attempts: Mutex<HashMap<Ipv4Addr, u32>>,
    lookups: AtomicUsize,
    delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl SimulatedNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host(mut self, addr: Ipv4Addr, hostname: Option<&'static str>) -> Self {
        self.hosts.insert(
            addr,
            Host {
                hostname,
                answers_from: 1,
            },
        );
        self
    }

    /// Host that drops its first `lost` echo requests.
    pub fn lossy_host(mut self, addr: Ipv4Addr, lost: u32) -> Self {
        self.hosts.insert(
            addr,
            Host {
                hostname: None,
                answers_from: lost + 1,
            },
        );
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn probes_sent(&self) -> u32 {
        self.attempts.lock().unwrap().values().sum()
    }

    pub fn addresses_probed(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProbeClient for SimulatedNetwork {
    async fn probe(&self, addr: Ipv4Addr, _timeout: Duration) -> ProbeOutcome {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let attempt: u32 = {
            let mut attempts = self.attempts.lock().unwrap();
            let seen = attempts.entry(addr).or_insert(0);
            *seen += 1;
            *seen
        };
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.hosts.get(&addr) {
            Some(host) if attempt >= host.answers_from => ProbeOutcome::Success(EchoReply {
                from: addr,
                bytes: 32,
                rtt: Duration::from_millis(1),
                ttl: Some(64),
            }),
            Some(_) => ProbeOutcome::Failure(ProbeStatus::TimedOut),
            None => ProbeOutcome::Failure(ProbeStatus::Unreachable),
        }
    }
}

#[async_trait]
impl ReverseResolver for SimulatedNetwork {
    async fn resolve(&self, addr: Ipv4Addr) -> Result<String, ResolutionError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.hosts
            .get(&addr)
            .and_then(|host| host.hostname)
            .map(str::to_string)
            .ok_or(ResolutionError::NoRecord)
    }
}
