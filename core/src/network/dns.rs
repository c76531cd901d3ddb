//! Reverse (PTR) lookups for live hosts.

use std::io;
use std::net::{IpAddr, Ipv4Addr};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("reverse lookup failed: {0}")]
    Lookup(#[from] io::Error),
    #[error("no PTR record")]
    NoRecord,
    #[error("lookup task aborted: {0}")]
    Aborted(String),
}

#[async_trait]
pub trait ReverseResolver: Send + Sync {
    async fn resolve(&self, addr: Ipv4Addr) -> Result<String, ResolutionError>;
}

/// Resolves through the operating system's resolver (`getnameinfo`).
///
/// The call blocks, so it runs on tokio's blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

#[async_trait]
impl ReverseResolver for SystemResolver {
    async fn resolve(&self, addr: Ipv4Addr) -> Result<String, ResolutionError> {
        let ip: IpAddr = IpAddr::V4(addr);
        let name: String = tokio::task::spawn_blocking(move || dns_lookup::lookup_addr(&ip))
            .await
            .map_err(|e| ResolutionError::Aborted(e.to_string()))??;
        accept_hostname(addr, name)
    }
}

/// `getnameinfo` falls back to the numeric form when no PTR record exists.
fn accept_hostname(addr: Ipv4Addr, name: String) -> Result<String, ResolutionError> {
    let name: &str = name.trim_end_matches('.');
    if name.is_empty() || name == addr.to_string() {
        return Err(ResolutionError::NoRecord);
    }
    Ok(name.to_string())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
