use std::time::Duration;

use anyhow::Context;
use colored::*;
use darkly_common::config::{Config, ScanSettings};
use darkly_common::network::host::HostResult;
use darkly_common::network::range::AddressRange;
use darkly_common::success;
use darkly_core::report::{self, ReportFormatter};
use darkly_core::scanner::{BoundedScanner, ScanReport};
use darkly_core::stop::StopSignal;
use tracing::{Instrument, warn};

use crate::commands::SweepArgs;
use crate::mprint;
use crate::terminal::{colors, input, print, spinner};

type Detail = (String, ColoredString);

pub async fn sweep(args: SweepArgs, cfg: &Config, listen_for_keys: bool) -> anyhow::Result<()> {
    let settings: ScanSettings = args.settings();
    let range: AddressRange =
        AddressRange::parse(&args.start, &args.end).context("Invalid IP address range")?;

    if !is_root::is_root() {
        warn!("Not running as root: the system may refuse ICMP sockets");
    }
    print_settings(&range, &settings, cfg);

    let stop = StopSignal::new();
    let keys = if listen_for_keys {
        input::InputHandle::start(stop.clone())
    } else {
        None
    };
    let ctrl_c = input::stop_on_ctrl_c(stop.clone());
    let hint: &str = if keys.is_some() {
        "Press 'q' or SPACE to stop early"
    } else {
        "Press Ctrl-C to stop early"
    };

    print::print_status(format!("Scanning range {range}..."), cfg);

    let span = spinner::sweep_span(range.len(), hint);
    let progress_span = span.clone();
    let scanner = BoundedScanner::system(&settings)
        .with_stop_signal(stop)
        .on_progress(move |progress| spinner::report_sweep_progress(&progress_span, progress));

    let report: ScanReport = scanner.scan(&range).instrument(span.clone()).await;

    drop(scanner);
    drop(span);
    drop(keys);
    ctrl_c.abort();

    sweep_ends(&report, &range, &settings, cfg);
    Ok(())
}

fn print_settings(range: &AddressRange, settings: &ScanSettings, cfg: &Config) {
    let plain = |value: String| value.color(colors::text_default(cfg));
    let dns: ColoredString = if settings.no_dns {
        "off".red()
    } else {
        "on".green()
    };
    print::aligned_lines(
        vec![
            ("Range", range.to_string().color(colors::IPV4_ADDR)),
            ("Addresses", plain(range.len().to_string())),
            ("Parallelism", plain(settings.concurrency.to_string())),
            ("Attempts", plain(settings.attempts.to_string())),
            ("Timeout", plain(format!("{}ms", settings.timeout.as_millis()))),
            ("Reverse DNS", dns),
        ],
        cfg,
    );
}

fn sweep_ends(report: &ScanReport, range: &AddressRange, settings: &ScanSettings, cfg: &Config) {
    if report.interrupted() {
        warn!(
            "Sweep stopped early: {} of {} addresses probed",
            report.probed(),
            range.len()
        );
    }

    let formatter = ReportFormatter::new(settings.sort);

    if cfg.quiet > 1 {
        for line in formatter.format(report) {
            mprint!(&line);
        }
        return;
    }

    let hosts: Vec<HostResult> = formatter.sorted(report);
    if hosts.is_empty() {
        no_hosts_found(cfg);
    } else {
        if cfg.quiet > 0 {
            mprint!();
        }
        print::header("Active Hosts", cfg);
        print_hosts(&hosts, cfg);
    }
    print_summary(report.total_count(), report.elapsed(), cfg);
}

fn no_hosts_found(cfg: &Config) {
    print::header("ZERO HOSTS DETECTED", cfg);
    print::no_results();
}

fn print_hosts(hosts: &[HostResult], cfg: &Config) {
    for (idx, host) in hosts.iter().enumerate() {
        print_host_tree(host, idx, cfg);
        if idx + 1 != hosts.len() {
            mprint!();
        }
    }
}

fn print_host_tree(host: &HostResult, idx: usize, cfg: &Config) {
    print::tree_head(idx, host.hostname());
    let details: Vec<Detail> = vec![
        (
            "IPv4".to_string(),
            host.address().to_string().color(colors::IPV4_ADDR),
        ),
        (
            "Hostname".to_string(),
            host.hostname().color(colors::HOSTNAME),
        ),
    ];
    print::as_tree_one_level(details, cfg);
}

fn print_summary(hosts_len: usize, total_time: Duration, cfg: &Config) {
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString = format!("Sweep Complete in {total_time}").color(colors::text_default(cfg));
    let total: String = report::total_line(hosts_len);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output.to_string());
            print::centerln(&total.bold().green().to_string());
        }
        _ => {
            mprint!();
            success!("{}", total);
            success!("{}", output);
        }
    }
}
