#![cfg(test)]
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use darkly_common::config::SortOrder;
use darkly_common::network::host::HostResult;
use darkly_common::network::range::InvalidAddress;
use darkly_core::report::ReportFormatter;
use darkly_core::scanner::{self, BoundedScanner, HostProbe, ScanProgress, ScanReport};
use darkly_core::stop::StopSignal;

use crate::support::SimulatedNetwork;

fn scanner_over(net: &Arc<SimulatedNetwork>, cap: usize) -> BoundedScanner {
    let probe = HostProbe::new(net.clone(), Some(net.clone())).with_timeout(Duration::from_millis(10));
    BoundedScanner::new(probe, cap)
}

#[tokio::test]
async fn home_subnet_report() {
    let net = SimulatedNetwork::new()
        .host(Ipv4Addr::new(192, 168, 1, 254), Some("gateway.lan"))
        .host(Ipv4Addr::new(192, 168, 1, 1), Some("router.lan"))
        .host(Ipv4Addr::new(192, 168, 1, 20), None)
        .into_arc();

    let report: ScanReport = scanner_over(&net, 32)
        .scan_range("192.168.1.1", "192.168.1.254")
        .await
        .expect("valid range");

    assert_eq!(report.probed(), 254);
    assert!(!report.interrupted());
    assert_eq!(net.addresses_probed(), 254);
    // live or not, every address gets all five attempts
    assert_eq!(net.probes_sent(), 254 * 5);
    assert_eq!(net.lookups(), 3);

    let lines = ReportFormatter::default().format(&report);
    assert_eq!(
        lines,
        vec![
            "192.168.1.1 - router.lan".to_string(),
            "192.168.1.20 - Unknown".to_string(),
            "192.168.1.254 - gateway.lan".to_string(),
            "Total number of active hosts: 3".to_string(),
        ]
    );
}

#[tokio::test]
async fn sweep_across_subnets_sorts_by_last_octet_by_default() {
    let net = SimulatedNetwork::new()
        .host(Ipv4Addr::new(10, 0, 0, 200), Some("a"))
        .host(Ipv4Addr::new(10, 0, 1, 7), Some("b"))
        .host(Ipv4Addr::new(10, 0, 2, 50), Some("c"))
        .into_arc();

    let report = scanner_over(&net, 64)
        .scan_range("10.0.0.190", "10.0.2.60")
        .await
        .unwrap();

    let by_octet: Vec<Ipv4Addr> = ReportFormatter::new(SortOrder::LastOctet)
        .sorted(&report)
        .iter()
        .map(HostResult::address)
        .collect();
    assert_eq!(
        by_octet,
        vec![
            Ipv4Addr::new(10, 0, 1, 7),
            Ipv4Addr::new(10, 0, 2, 50),
            Ipv4Addr::new(10, 0, 0, 200),
        ]
    );

    let numeric: Vec<Ipv4Addr> = ReportFormatter::new(SortOrder::Numeric)
        .sorted(&report)
        .iter()
        .map(HostResult::address)
        .collect();
    assert_eq!(
        numeric,
        vec![
            Ipv4Addr::new(10, 0, 0, 200),
            Ipv4Addr::new(10, 0, 1, 7),
            Ipv4Addr::new(10, 0, 2, 50),
        ]
    );
}

#[tokio::test]
async fn lossy_host_is_still_found() {
    let lossy = Ipv4Addr::new(172, 16, 0, 9);
    let net = SimulatedNetwork::new().lossy_host(lossy, 4).into_arc();

    let report = scanner_over(&net, 8)
        .scan_range("172.16.0.1", "172.16.0.10")
        .await
        .unwrap();

    assert_eq!(report.total_count(), 1);
    assert_eq!(report.results()[0].address(), lossy);
    assert_eq!(report.results()[0].hostname(), "Unknown");
}

#[tokio::test]
async fn host_losing_every_attempt_is_not_reported() {
    let net = SimulatedNetwork::new()
        .lossy_host(Ipv4Addr::new(172, 16, 0, 9), 5)
        .into_arc();

    let report = scanner_over(&net, 8)
        .scan_range("172.16.0.9", "172.16.0.9")
        .await
        .unwrap();

    assert_eq!(report.total_count(), 0);
    assert_eq!(net.lookups(), 0);
}

#[tokio::test]
async fn bad_input_probes_nothing() {
    let net = SimulatedNetwork::new().into_arc();
    let scanner = scanner_over(&net, 4);

    let inverted = scanner.scan_range("10.0.0.9", "10.0.0.1").await;
    assert!(matches!(inverted, Err(InvalidAddress::Inverted { .. })));

    let malformed = scanner.scan_range("10.0.0.1", "10.0.0").await;
    assert!(matches!(malformed, Err(InvalidAddress::Malformed(_))));

    let malformed_start = scanner.scan_range("not-an-ip", "10.0.0.1").await;
    assert!(matches!(malformed_start, Err(InvalidAddress::Malformed(_))));

    assert_eq!(net.addresses_probed(), 0);
}

#[tokio::test]
async fn in_flight_evaluations_stay_under_the_cap() {
    let net = SimulatedNetwork::new()
        .with_delay(Duration::from_millis(2))
        .into_arc();

    let report = scanner_over(&net, 6)
        .scan_range("10.9.0.1", "10.9.0.60")
        .await
        .unwrap();

    assert_eq!(report.probed(), 60);
    assert!(net.peak_in_flight() <= 6, "peak was {}", net.peak_in_flight());
    assert!(net.peak_in_flight() > 1);
}

#[tokio::test]
async fn progress_ends_at_total() {
    let net = SimulatedNetwork::new()
        .host(Ipv4Addr::new(10, 1, 0, 3), None)
        .into_arc();
    let seen: Arc<Mutex<Vec<ScanProgress>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    scanner_over(&net, 4)
        .on_progress(move |progress| sink.lock().unwrap().push(progress))
        .scan_range("10.1.0.1", "10.1.0.20")
        .await
        .unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 20);
    let last = seen.last().unwrap();
    assert_eq!((last.probed, last.alive, last.total), (20, 1, 20));
}

#[tokio::test]
async fn stopped_sweep_returns_partial_report() {
    let net = SimulatedNetwork::new()
        .host(Ipv4Addr::new(10, 2, 0, 1), None)
        .with_delay(Duration::from_millis(5))
        .into_arc();
    let stop = StopSignal::new();
    let trigger = stop.clone();

    let report = scanner_over(&net, 2)
        .with_stop_signal(stop)
        .on_progress(move |progress| {
            if progress.probed == 4 {
                trigger.raise();
            }
        })
        .scan_range("10.2.0.1", "10.2.0.254")
        .await
        .unwrap();

    assert!(report.interrupted());
    assert!(report.probed() >= 4);
    assert!(report.probed() < 254);
    assert_eq!(report.probed() as usize, net.addresses_probed());
}

/// Needs permission to open ICMP sockets.
#[tokio::test]
#[ignore]
async fn loopback_range_is_alive() {
    let report = scanner::scan_range("127.0.0.1", "127.0.0.3", 4)
        .await
        .expect("valid range");

    assert_eq!(report.total_count(), 3, "found {:?}", report.results());
}
