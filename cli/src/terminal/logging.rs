use std::fmt;

use colored::*;
use crossterm::terminal;
use darkly_common::log::{PRINT_TARGET, SUCCESS_TARGET};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_indicatif::IndicatifLayer;
use tracing_indicatif::filter::IndicatifFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent};
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

pub struct DarklyFormatter;

impl<S, N> FormatEvent<S, N> for DarklyFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        if meta.target() == PRINT_TARGET {
            let mut raw = RawMessage::default();
            event.record(&mut raw);
            write!(writer, "{}", raw.0.unwrap_or_default())?;
            return end_line(&mut writer);
        }

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) =
            if meta.target() == SUCCESS_TARGET {
                ("[+]", |s| s.green().bold())
            } else {
                level_style(*meta.level())
            };

        write!(writer, "{} ", color_func(symbol.into()))?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        end_line(&mut writer)
    }
}

fn level_style(level: Level) -> (&'static str, fn(ColoredString) -> ColoredString) {
    match level {
        Level::TRACE => ("[ ]", |s| s.dimmed()),
        Level::DEBUG => ("[?]", |s| s.blue()),
        Level::INFO => ("[*]", |s| s.cyan().bold()),
        Level::WARN => ("[!]", |s| s.yellow().bold()),
        Level::ERROR => ("[-]", |s| s.red().bold()),
    }
}

/// Raw mode disables the terminal's own carriage return.
fn end_line(writer: &mut Writer<'_>) -> fmt::Result {
    if terminal::is_raw_mode_enabled().unwrap_or(false) {
        write!(writer, "\r\n")
    } else {
        writeln!(writer)
    }
}

#[derive(Default)]
struct RawMessage(Option<String>);

impl Visit for RawMessage {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "raw_msg" {
            self.0 = Some(value.to_owned());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "raw_msg" && self.0.is_none() {
            self.0 = Some(format!("{value:?}"));
        }
    }
}

fn default_directives(verbosity: u8) -> String {
    let level: &str = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    format!("warn,darkly={level},darkly_core={level},darkly_common={level}")
}

/// Installs the global subscriber. `RUST_LOG` replaces the `-v` levels, but
/// printed output and success lines always stay visible.
pub fn init_logging(verbosity: u8) {
    let mut filter: EnvFilter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));
    for always_on in [PRINT_TARGET, SUCCESS_TARGET] {
        if let Ok(directive) = format!("{always_on}=info").parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }

    let indicatif_layer = IndicatifLayer::new();
    let fmt_layer = tracing_subscriber::fmt::layer()
        .event_format(DarklyFormatter)
        .with_writer(indicatif_layer.get_stdout_writer());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(indicatif_layer.with_filter(IndicatifFilter::new(false)))
        .init();
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_crate_levels() {
        assert!(default_directives(0).contains("darkly_core=info"));
        assert!(default_directives(1).contains("darkly_core=debug"));
        assert!(default_directives(5).contains("darkly=trace"));
        assert!(default_directives(0).starts_with("warn,"));
    }

    #[test]
    fn default_directives_parse() {
        for verbosity in 0..3 {
            assert!(EnvFilter::try_new(default_directives(verbosity)).is_ok());
        }
    }

    #[test]
    fn each_level_has_its_own_symbol() {
        let symbols: Vec<&str> = [Level::TRACE, Level::DEBUG, Level::INFO, Level::WARN, Level::ERROR]
            .into_iter()
            .map(|level| level_style(level).0)
            .collect();
        assert_eq!(symbols, vec!["[ ]", "[?]", "[*]", "[!]", "[-]"]);
    }
}
