//! Continuous pinging of a single target.
//!
//! A [`PingSession`] sends one echo request, reports the outcome, waits for
//! the configured interval and repeats until its count runs out or its
//! [`StopSignal`] is raised. Failed and errored pings never end the session.

use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use chrono::{DateTime, Local};
use darkly_common::config::{PAYLOAD_SIZE_RANGE, PingSettings};
use darkly_common::network::range::parse_address;
use thiserror::Error;
use tracing::debug;

use crate::network::icmp::{IcmpProbeClient, ProbeClient, ProbeOutcome};
use crate::stop::StopSignal;

/// Target pinged when none is given.
pub const DEFAULT_TARGET: &str = "localhost";

#[derive(Debug, Error)]
pub enum PingError {
    #[error("could not resolve '{host}': {source}")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },
    #[error("'{0}' has no IPv4 address")]
    NoIpv4(String),
    #[error("payload size {0} is outside {min}..={max} bytes", min = PAYLOAD_SIZE_RANGE.start(), max = PAYLOAD_SIZE_RANGE.end())]
    PayloadSize(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingEvent {
    /// 1-based position in the session.
    pub seq: u64,
    pub at: DateTime<Local>,
    pub outcome: ProbeOutcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PingSummary {
    pub sent: u64,
    pub received: u64,
}

impl PingSummary {
    pub fn loss_percent(&self) -> f64 {
        if self.sent == 0 {
            return 0.0;
        }
        (self.sent - self.received) as f64 * 100.0 / self.sent as f64
    }
}

/// Resolves an IPv4 literal or hostname. Blank input means [`DEFAULT_TARGET`].
pub async fn resolve_target(target: &str) -> Result<Ipv4Addr, PingError> {
    let host: &str = match target.trim() {
        "" => DEFAULT_TARGET,
        trimmed => trimmed,
    };
    if let Ok(addr) = parse_address(host) {
        return Ok(addr);
    }

    let addrs = tokio::net::lookup_host((host, 0))
        .await
        .map_err(|source| PingError::Resolve {
            host: host.to_string(),
            source,
        })?;

    addrs
        .filter_map(|socket| match socket.ip() {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })
        .next()
        .ok_or_else(|| PingError::NoIpv4(host.to_string()))
}

pub struct PingSession {
    target: Ipv4Addr,
    settings: PingSettings,
    client: Arc<dyn ProbeClient>,
    stop: StopSignal,
}

impl PingSession {
    pub fn new(
        target: Ipv4Addr,
        settings: PingSettings,
        client: Arc<dyn ProbeClient>,
    ) -> Result<Self, PingError> {
        if !PAYLOAD_SIZE_RANGE.contains(&settings.payload_size) {
            return Err(PingError::PayloadSize(settings.payload_size));
        }
        Ok(Self {
            target,
            settings,
            client,
            stop: StopSignal::new(),
        })
    }

    /// Session over the platform ICMP socket with a random payload of the
    /// configured size.
    pub fn icmp(target: Ipv4Addr, settings: PingSettings) -> Result<Self, PingError> {
        let client = Arc::new(IcmpProbeClient::with_random_payload(settings.payload_size));
        Self::new(target, settings, client)
    }

    pub fn with_stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    pub fn target(&self) -> Ipv4Addr {
        self.target
    }

    pub fn settings(&self) -> &PingSettings {
        &self.settings
    }

    /// Pings until the count is exhausted or the stop signal is raised,
    /// handing each outcome to `on_event`.
    pub async fn run<F>(&self, mut on_event: F) -> PingSummary
    where
        F: FnMut(PingEvent),
    {
        let mut summary = PingSummary::default();

        while !self.stop.is_raised() && !self.count_reached(summary.sent) {
            let outcome: ProbeOutcome = self.client.probe(self.target, self.settings.timeout).await;
            summary.sent += 1;
            if outcome.is_success() {
                summary.received += 1;
            }
            on_event(PingEvent {
                seq: summary.sent,
                at: Local::now(),
                outcome,
            });

            if self.count_reached(summary.sent) {
                break;
            }
            tokio::select! {
                _ = self.stop.raised() => break,
                _ = tokio::time::sleep(self.settings.interval) => {}
            }
        }

        debug!(addr = %self.target, sent = summary.sent, received = summary.received, "ping session ended");
        summary
    }

    fn count_reached(&self, sent: u64) -> bool {
        self.settings.count.is_some_and(|count| sent >= count)
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
