//! Ordering and plain-text rendering of a [`ScanReport`].
//!
//! The default order looks only at the last octet. Inside a single /24 that
//! reads naturally; a sweep across several /24s interleaves them
//! (`10.0.1.3` lands before `10.0.0.5`). [`SortOrder::Numeric`] gives the
//! full address order instead.

use darkly_common::config::SortOrder;
use darkly_common::network::host::HostResult;

use crate::scanner::ScanReport;

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportFormatter {
    order: SortOrder,
}

impl ReportFormatter {
    pub fn new(order: SortOrder) -> Self {
        Self { order }
    }

    /// Live hosts in display order. Equal keys keep their completion order.
    pub fn sorted(&self, report: &ScanReport) -> Vec<HostResult> {
        let mut hosts: Vec<HostResult> = report.results().to_vec();
        sort_hosts(&mut hosts, self.order);
        hosts
    }

    /// One `address - hostname` line per live host, then the total.
    pub fn format(&self, report: &ScanReport) -> Vec<String> {
        let mut lines: Vec<String> = self.sorted(report).iter().map(host_line).collect();
        lines.push(total_line(report.total_count()));
        lines
    }
}

/// Stable sort of `hosts` by `order`.
pub fn sort_hosts(hosts: &mut [HostResult], order: SortOrder) {
    match order {
        SortOrder::LastOctet => hosts.sort_by_key(HostResult::last_octet),
        SortOrder::Numeric => hosts.sort_by_key(|host| u32::from(host.address())),
    }
}

pub fn host_line(host: &HostResult) -> String {
    format!("{} - {}", host.address(), host.hostname())
}

pub fn total_line(count: usize) -> String {
    format!("Total number of active hosts: {count}")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
