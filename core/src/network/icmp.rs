//! A single ICMP echo exchange.
//!
//! [`ProbeClient`] is the seam the scanner and ping session depend on;
//! [`IcmpProbeClient`] is the platform implementation on top of `surge-ping`.
//!
//! One call to [`ProbeClient::probe`] sends exactly one echo request. Retrying
//! is the caller's business.

use std::fmt;
use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use darkly_common::config::DEFAULT_PAYLOAD_SIZE;
use rand::Rng;
use surge_ping::{Client, Config, IcmpPacket, PingIdentifier, PingSequence, SurgeError};
use tokio::sync::OnceCell;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EchoReply {
    pub from: Ipv4Addr,
    pub bytes: usize,
    pub rtt: Duration,
    pub ttl: Option<u8>,
}

/// Ordinary reasons an echo attempt produced no reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    TimedOut,
    Unreachable,
    Other(String),
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeStatus::TimedOut => f.write_str("TimedOut"),
            ProbeStatus::Unreachable => f.write_str("DestinationUnreachable"),
            ProbeStatus::Other(status) => f.write_str(status),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success(EchoReply),
    /// Timeout, unreachable, TTL exceeded and the like.
    Failure(ProbeStatus),
    /// The attempt itself could not be made (socket refused, resources exhausted).
    Error(String),
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success(_))
    }
}

#[async_trait]
pub trait ProbeClient: Send + Sync {
    /// Sends one echo request to `addr` and waits up to `timeout` for the reply.
    ///
    /// Never fails: every condition is folded into the returned outcome.
    async fn probe(&self, addr: Ipv4Addr, timeout: Duration) -> ProbeOutcome;
}

/// Echo probes over the platform ICMP socket.
///
/// The socket is opened on first use so that a refused socket surfaces as a
/// per-attempt [`ProbeOutcome::Error`] instead of failing construction.
pub struct IcmpProbeClient {
    client: OnceCell<Result<Client, String>>,
    payload: Vec<u8>,
    sequence: AtomicU16,
}

impl IcmpProbeClient {
    pub fn new() -> Self {
        Self::with_payload(vec![0u8; DEFAULT_PAYLOAD_SIZE])
    }

    pub fn with_payload(payload: Vec<u8>) -> Self {
        Self {
            client: OnceCell::new(),
            payload,
            sequence: AtomicU16::new(0),
        }
    }

    /// A client whose echo requests carry `size` random bytes.
    pub fn with_random_payload(size: usize) -> Self {
        let mut payload: Vec<u8> = vec![0u8; size];
        rand::rng().fill(payload.as_mut_slice());
        Self::with_payload(payload)
    }

    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// Opens the socket on first use. A failure is logged once and then
    /// replayed to every later caller.
    async fn client(&self) -> Result<&Client, String> {
        self.client
            .get_or_init(|| async {
                let opened = Client::new(&Config::default()).map_err(|e| match e.kind() {
                    io::ErrorKind::PermissionDenied => {
                        format!("opening ICMP socket: {e} (try running as root)")
                    }
                    _ => format!("opening ICMP socket: {e}"),
                });
                if let Err(message) = &opened {
                    warn!("{message}");
                }
                opened
            })
            .await
            .as_ref()
            .map_err(|message| message.clone())
    }

    fn next_sequence(&self) -> u16 {
        self.sequence.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IcmpProbeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProbeClient for IcmpProbeClient {
    async fn probe(&self, addr: Ipv4Addr, timeout: Duration) -> ProbeOutcome {
        let client: &Client = match self.client().await {
            Ok(client) => client,
            Err(message) => return ProbeOutcome::Error(message),
        };

        let mut pinger = client
            .pinger(IpAddr::V4(addr), PingIdentifier(rand::random()))
            .await;
        pinger.timeout(timeout);

        match pinger.ping(PingSequence(self.next_sequence()), &self.payload).await {
            Ok((IcmpPacket::V4(packet), rtt)) => ProbeOutcome::Success(EchoReply {
                from: packet.get_source(),
                bytes: packet.get_size(),
                rtt,
                ttl: packet.get_ttl().into(),
            }),
            Ok((IcmpPacket::V6(_), _)) => {
                ProbeOutcome::Failure(ProbeStatus::Other("unexpected ICMPv6 reply".into()))
            }
            Err(err) => classify_error(err),
        }
    }
}

fn classify_error(err: SurgeError) -> ProbeOutcome {
    match err {
        SurgeError::Timeout { .. } => ProbeOutcome::Failure(ProbeStatus::TimedOut),
        SurgeError::IOError(io_err) => classify_io_error(&io_err),
        other => ProbeOutcome::Failure(ProbeStatus::Other(other.to_string())),
    }
}

fn classify_io_error(err: &io::Error) -> ProbeOutcome {
    match err.kind() {
        io::ErrorKind::TimedOut => ProbeOutcome::Failure(ProbeStatus::TimedOut),
        io::ErrorKind::HostUnreachable
        | io::ErrorKind::NetworkUnreachable
        | io::ErrorKind::AddrNotAvailable
        | io::ErrorKind::ConnectionRefused => ProbeOutcome::Failure(ProbeStatus::Unreachable),
        _ => ProbeOutcome::Error(err.to_string()),
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
