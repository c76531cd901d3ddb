use std::fmt;
use std::num::NonZeroUsize;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Probe attempts per address during a sweep.
pub const DEFAULT_ATTEMPTS: u32 = 5;
/// Per-attempt wait during a sweep.
pub const DEFAULT_SWEEP_TIMEOUT: Duration = Duration::from_millis(100);
/// Permits handed out per hardware thread.
pub const CONCURRENCY_PER_CORE: usize = 10;

pub const DEFAULT_PING_INTERVAL: Duration = Duration::from_millis(1_000);
pub const DEFAULT_PING_TIMEOUT: Duration = Duration::from_millis(1_000);
pub const DEFAULT_PAYLOAD_SIZE: usize = 32;
/// Largest ICMP payload that fits an IPv4 datagram (65535 - 20 - 8).
pub const PAYLOAD_SIZE_RANGE: RangeInclusive<usize> = 1..=65_507;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown colour '{0}'")]
    UnknownColor(String),
    #[error("unknown sort order '{0}'")]
    UnknownSortOrder(String),
}

/// Rendering settings handed to the terminal layer.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Tint for default text.
    pub color: TextColor,
    /// 0 prints everything, 1 drops decoration, 2 prints only result lines.
    pub quiet: u8,
    pub no_banner: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextColor {
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
    Gray,
    #[default]
    White,
}

impl TextColor {
    pub const ALL: [TextColor; 8] = [
        TextColor::Red,
        TextColor::Green,
        TextColor::Blue,
        TextColor::Yellow,
        TextColor::Cyan,
        TextColor::Magenta,
        TextColor::Gray,
        TextColor::White,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TextColor::Red => "red",
            TextColor::Green => "green",
            TextColor::Blue => "blue",
            TextColor::Yellow => "yellow",
            TextColor::Cyan => "cyan",
            TextColor::Magenta => "magenta",
            TextColor::Gray => "gray",
            TextColor::White => "white",
        }
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.trim().to_ascii_lowercase();
        let wanted: &str = if wanted == "grey" { "gray" } else { &wanted };
        TextColor::ALL
            .into_iter()
            .find(|color| color.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownColor(s.to_string()))
    }
}

/// How the live-host report is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// By the last octet only. Hosts from different /24s interleave.
    #[default]
    LastOctet,
    /// By the full 32-bit address.
    Numeric,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::LastOctet => f.write_str("last-octet"),
            SortOrder::Numeric => f.write_str("numeric"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-octet" | "octet" => Ok(SortOrder::LastOctet),
            "numeric" | "address" => Ok(SortOrder::Numeric),
            _ => Err(ConfigError::UnknownSortOrder(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScanSettings {
    /// Maximum number of addresses evaluated at once.
    pub concurrency: usize,
    pub attempts: u32,
    pub timeout: Duration,
    /// Disables reverse lookups for live hosts.
    pub no_dns: bool,
    pub sort: SortOrder,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            attempts: DEFAULT_ATTEMPTS,
            timeout: DEFAULT_SWEEP_TIMEOUT,
            no_dns: false,
            sort: SortOrder::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PingSettings {
    pub interval: Duration,
    pub timeout: Duration,
    pub payload_size: usize,
    /// Stop after this many pings. `None` pings until stopped.
    pub count: Option<u64>,
}

impl Default for PingSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_PING_INTERVAL,
            timeout: DEFAULT_PING_TIMEOUT,
            payload_size: DEFAULT_PAYLOAD_SIZE,
            count: None,
        }
    }
}

/// Ten permits per available hardware thread.
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
        * CONCURRENCY_PER_CORE
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
