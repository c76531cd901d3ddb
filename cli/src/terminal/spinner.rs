use colored::*;
use darkly_core::scanner::ScanProgress;
use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

fn sweep_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} [{bar:32.green/bright_black}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━╸ ")
        .tick_strings(TICKS)
}

/// Progress bar span for a sweep of `total` addresses. The bar is drawn
/// while the span is entered and cleared when every clone is dropped.
pub fn sweep_span(total: u64, stop_hint: &str) -> Span {
    let span = info_span!("sweep", indicatif.pb_show = true);
    span.pb_set_style(&sweep_style());
    span.pb_set_length(total);
    span.pb_set_message(&format!("{}", stop_hint.italic().white()));
    span
}

pub fn report_sweep_progress(span: &Span, progress: ScanProgress) {
    span.pb_set_position(progress.probed);
    span.pb_set_message(&format!(
        "{} hosts alive so far...",
        progress.alive.to_string().green().bold()
    ));
}
