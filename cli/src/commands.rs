pub mod ping;
pub mod sweep;

use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use darkly_common::config::{
    Config, DEFAULT_ATTEMPTS, PingSettings, ScanSettings, SortOrder, TextColor, default_concurrency,
};
use darkly_core::ping::DEFAULT_TARGET;

#[derive(Parser)]
#[command(name = "darkly")]
#[command(about = "Ping a host or sweep an IPv4 range for live hosts.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Colour for default text (red, green, blue, yellow, cyan, magenta, gray, white)
    #[arg(long, global = true, default_value_t = TextColor::White)]
    pub color: TextColor,

    /// Reduce output: -q drops decoration, -qq prints only results
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Do not listen for the stop key; only Ctrl-C stops a run
    #[arg(long, global = true)]
    pub no_input: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ping a single host until stopped
    #[command(alias = "p")]
    Ping(PingArgs),
    /// Sweep an inclusive IPv4 range for hosts answering ICMP echo
    #[command(alias = "s")]
    Sweep(SweepArgs),
}

#[derive(Args)]
pub struct PingArgs {
    /// IPv4 address or hostname
    #[arg(default_value = DEFAULT_TARGET)]
    pub target: String,

    /// Milliseconds between pings
    #[arg(short, long, default_value_t = 1_000)]
    pub interval: u64,

    /// Payload size in bytes (1 - 65507)
    #[arg(short, long, default_value_t = 32, value_parser = clap::value_parser!(u16).range(1..=65_507))]
    pub size: u16,

    /// Milliseconds to wait for each reply
    #[arg(short = 'W', long, default_value_t = 1_000)]
    pub timeout: u64,

    /// Stop after this many pings
    #[arg(short, long)]
    pub count: Option<u64>,
}

#[derive(Args)]
pub struct SweepArgs {
    /// First address of the range
    pub start: String,

    /// Last address of the range (inclusive)
    pub end: String,

    /// Addresses probed at once [default: 10 per CPU thread]
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,

    /// Echo attempts per address
    #[arg(short, long, default_value_t = DEFAULT_ATTEMPTS, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub attempts: u32,

    /// Milliseconds to wait for each reply
    #[arg(short, long, default_value_t = 100)]
    pub timeout: u64,

    /// Skip reverse lookups for live hosts
    #[arg(long)]
    pub no_dns: bool,

    /// Report order: last-octet or numeric
    #[arg(long, default_value_t = SortOrder::LastOctet)]
    pub sort: SortOrder,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            color: self.color,
            quiet: self.quiet,
            no_banner: self.no_banner,
        }
    }
}

impl PingArgs {
    pub fn settings(&self) -> PingSettings {
        PingSettings {
            interval: Duration::from_millis(self.interval),
            timeout: Duration::from_millis(self.timeout),
            payload_size: usize::from(self.size),
            count: self.count,
        }
    }
}

impl SweepArgs {
    pub fn settings(&self) -> ScanSettings {
        ScanSettings {
            concurrency: self.concurrency.unwrap_or_else(default_concurrency).max(1),
            attempts: self.attempts,
            timeout: Duration::from_millis(self.timeout),
            no_dns: self.no_dns,
            sort: self.sort,
        }
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
