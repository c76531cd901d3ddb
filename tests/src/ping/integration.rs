#![cfg(test)]
use std::net::Ipv4Addr;
use std::time::Duration;

use darkly_common::config::PingSettings;
use darkly_core::network::icmp::{ProbeOutcome, ProbeStatus};
use darkly_core::ping::{PingEvent, PingSession, resolve_target};

use crate::support::SimulatedNetwork;

fn settings(count: u64) -> PingSettings {
    PingSettings {
        interval: Duration::from_millis(1),
        timeout: Duration::from_millis(10),
        count: Some(count),
        ..PingSettings::default()
    }
}

#[tokio::test]
async fn reachable_target_answers_every_ping() {
    let target = Ipv4Addr::new(192, 168, 1, 1);
    let net = SimulatedNetwork::new().host(target, None).into_arc();
    let session = PingSession::new(target, settings(3), net.clone()).unwrap();

    let mut events: Vec<PingEvent> = Vec::new();
    let summary = session.run(|event| events.push(event)).await;

    assert_eq!((summary.sent, summary.received), (3, 3));
    assert_eq!(summary.loss_percent(), 0.0);
    assert!(events.iter().all(|event| event.outcome.is_success()));
    assert!(events.windows(2).all(|pair| pair[0].at <= pair[1].at));
    assert_eq!(net.probes_sent(), 3);
}

#[tokio::test]
async fn lossy_target_reports_partial_loss() {
    let target = Ipv4Addr::new(192, 168, 1, 2);
    let net = SimulatedNetwork::new().lossy_host(target, 1).into_arc();
    let session = PingSession::new(target, settings(4), net).unwrap();

    let mut first: Option<ProbeOutcome> = None;
    let summary = session
        .run(|event| {
            first.get_or_insert(event.outcome);
        })
        .await;

    assert_eq!((summary.sent, summary.received), (4, 3));
    assert_eq!(summary.loss_percent(), 25.0);
    assert_eq!(first, Some(ProbeOutcome::Failure(ProbeStatus::TimedOut)));
}

#[tokio::test]
async fn unreachable_target_keeps_pinging() {
    let net = SimulatedNetwork::new().into_arc();
    let session = PingSession::new(Ipv4Addr::new(10, 255, 0, 1), settings(5), net).unwrap();

    let mut failures = 0;
    let summary = session
        .run(|event| {
            if matches!(event.outcome, ProbeOutcome::Failure(ProbeStatus::Unreachable)) {
                failures += 1;
            }
        })
        .await;

    assert_eq!(failures, 5);
    assert_eq!(summary.received, 0);
    assert_eq!(summary.loss_percent(), 100.0);
}

#[tokio::test]
async fn localhost_resolves_to_loopback() {
    let addr = resolve_target("localhost").await.expect("localhost resolves");
    assert!(addr.is_loopback());
}

/// Needs permission to open ICMP sockets.
#[tokio::test]
#[ignore]
async fn ping_loopback() {
    let session = PingSession::icmp(Ipv4Addr::LOCALHOST, settings(2)).unwrap();
    let summary = session.run(|_| {}).await;
    assert_eq!(summary.received, 2);
}
