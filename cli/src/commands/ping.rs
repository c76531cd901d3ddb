use std::net::Ipv4Addr;

use colored::*;
use darkly_common::config::{Config, PingSettings};
use darkly_core::network::icmp::{EchoReply, ProbeOutcome};
use darkly_core::ping::{self, PingEvent, PingSession, PingSummary};
use darkly_core::stop::StopSignal;
use tracing::warn;

use crate::commands::PingArgs;
use crate::terminal::{colors, input, print};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub async fn ping(args: PingArgs, cfg: &Config, listen_for_keys: bool) -> anyhow::Result<()> {
    let settings: PingSettings = args.settings();
    let target: Ipv4Addr = ping::resolve_target(&args.target).await?;

    if !is_root::is_root() {
        warn!("Not running as root: the system may refuse ICMP sockets");
    }
    print_settings(&args.target, target, &settings, cfg);

    let stop = StopSignal::new();
    let session = PingSession::icmp(target, settings.clone())?.with_stop_signal(stop.clone());

    let keys = if listen_for_keys {
        input::InputHandle::start(stop.clone())
    } else {
        None
    };
    let ctrl_c = input::stop_on_ctrl_c(stop);
    let hint: &str = if keys.is_some() {
        "Pinging started. Press 'q' or SPACE to stop..."
    } else {
        "Pinging started. Press Ctrl-C to stop..."
    };
    print::print_status(hint, cfg);

    let delay_ms: u128 = settings.interval.as_millis();
    let summary: PingSummary = session.run(|event| print_event(&event, delay_ms, cfg)).await;

    drop(keys);
    ctrl_c.abort();

    print::print_status("Pinging stopped.", cfg);
    print_summary(target, &summary, cfg);
    Ok(())
}

fn print_settings(requested: &str, target: Ipv4Addr, settings: &PingSettings, cfg: &Config) {
    let plain = |value: String| value.color(colors::text_default(cfg));
    let count: String = match settings.count {
        Some(count) => count.to_string(),
        None => "until stopped".to_string(),
    };
    print::aligned_lines(
        vec![
            ("Target", format!("{requested} ({target})").color(colors::IPV4_ADDR)),
            ("Payload", plain(format!("{} bytes", settings.payload_size))),
            ("Interval", plain(format!("{}ms", settings.interval.as_millis()))),
            ("Timeout", plain(format!("{}ms", settings.timeout.as_millis()))),
            ("Count", plain(count)),
        ],
        cfg,
    );
}

fn print_event(event: &PingEvent, delay_ms: u128, cfg: &Config) {
    let timestamp = event.at.format(TIMESTAMP_FORMAT);
    let line: String = match &event.outcome {
        ProbeOutcome::Success(reply) => format!("[{timestamp}] {}", reply_line(reply, delay_ms)),
        ProbeOutcome::Failure(status) => {
            format!("[{timestamp}] {}", format!("Ping failed: {status}").yellow())
        }
        ProbeOutcome::Error(message) => {
            format!("[{timestamp}] {}", format!("Ping error: {message}").red())
        }
    };
    print::print_status(line, cfg);
}

fn reply_line(reply: &EchoReply, delay_ms: u128) -> String {
    let ttl: String = reply
        .ttl
        .map(|ttl| ttl.to_string())
        .unwrap_or_else(|| "?".to_string());
    format!(
        "Reply from {}: bytes={} time={}ms TTL={} (Delay: {}ms)",
        reply.from,
        reply.bytes,
        reply.rtt.as_millis(),
        ttl,
        delay_ms
    )
}

fn print_summary(target: Ipv4Addr, summary: &PingSummary, cfg: &Config) {
    if cfg.quiet > 1 {
        return;
    }
    let loss: ColoredString = format!("{:.1}% loss", summary.loss_percent()).yellow().bold();
    let line: String = format!(
        "{target}: {} sent, {} received, {loss}",
        summary.sent.to_string().bold(),
        summary.received.to_string().green().bold()
    );
    print::fat_separator();
    print::centerln(&line);
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
