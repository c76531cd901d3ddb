use std::net::Ipv4Addr;

/// Hostname recorded when reverse lookup is skipped or fails.
pub const UNKNOWN_HOSTNAME: &str = "Unknown";

/// Verdict for a single address, produced once all of its probe attempts have run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostResult {
    address: Ipv4Addr,
    alive: bool,
    hostname: String,
}

impl HostResult {
    pub fn alive(address: Ipv4Addr, hostname: Option<String>) -> Self {
        Self {
            address,
            alive: true,
            hostname: hostname.unwrap_or_else(|| UNKNOWN_HOSTNAME.to_string()),
        }
    }

    pub fn unreachable(address: Ipv4Addr) -> Self {
        Self {
            address,
            alive: false,
            hostname: UNKNOWN_HOSTNAME.to_string(),
        }
    }

    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn last_octet(&self) -> u8 {
        self.address.octets()[3]
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
