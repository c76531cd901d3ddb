//! # IPv4 Range Model
//!
//! An inclusive, ascending range of IPv4 addresses built from two dotted quads.
//!
//! Addresses are compared through their big-endian `u32` form, so the order of
//! the range is the order a human reads `10.0.0.9 < 10.0.1.0`.

use std::fmt;
use std::net::Ipv4Addr;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidAddress {
    #[error("'{0}' is not a valid IPv4 address")]
    Malformed(String),
    #[error("start address {start} is greater than end address {end}")]
    Inverted { start: Ipv4Addr, end: Ipv4Addr },
}

/// Parses a single dotted quad, ignoring surrounding whitespace.
pub fn parse_address(text: &str) -> Result<Ipv4Addr, InvalidAddress> {
    let trimmed: &str = text.trim();
    trimmed
        .parse::<Ipv4Addr>()
        .map_err(|_| InvalidAddress::Malformed(trimmed.to_string()))
}

/// A continuous range of IPv4 addresses, inclusive on both ends.
///
/// Construction guarantees `start <= end`, so a range is never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressRange {
    start: Ipv4Addr,
    end: Ipv4Addr,
}

impl AddressRange {
    pub fn new(start: Ipv4Addr, end: Ipv4Addr) -> Result<Self, InvalidAddress> {
        if u32::from(start) > u32::from(end) {
            return Err(InvalidAddress::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Builds a range from two textual addresses.
    pub fn parse(start_text: &str, end_text: &str) -> Result<Self, InvalidAddress> {
        let start: Ipv4Addr = parse_address(start_text)?;
        let end: Ipv4Addr = parse_address(end_text)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> Ipv4Addr {
        self.start
    }

    pub fn end(&self) -> Ipv4Addr {
        self.end
    }

    /// Number of addresses in the range. `u64` because `0.0.0.0 - 255.255.255.255`
    /// holds 2^32 addresses.
    pub fn len(&self) -> u64 {
        u64::from(u32::from(self.end)) - u64::from(u32::from(self.start)) + 1
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        let value: u32 = addr.into();
        u32::from(self.start) <= value && value <= u32::from(self.end)
    }

    /// Lazily yields every address in the range, ascending.
    ///
    /// Each call starts a fresh iterator.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Ipv4Addr> + Clone + Send + 'static {
        let start: u32 = u32::from(self.start);
        let end: u32 = u32::from(self.end);
        (start..=end).map(Ipv4Addr::from)
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
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
