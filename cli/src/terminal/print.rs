use std::fmt::Display;

use colored::*;
use darkly_common::config::Config;
use darkly_common::log::PRINT_TARGET;
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::terminal::colors;

pub const TOTAL_WIDTH: usize = 64;

#[macro_export]
macro_rules! mprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

pub trait WithDefaultColor {
    fn with_default(self, default_color: Color) -> ColoredString;
}

impl WithDefaultColor for &str {
    fn with_default(self, default_color: Color) -> ColoredString {
        self.color(default_color)
    }
}

impl WithDefaultColor for String {
    fn with_default(self, default_color: Color) -> ColoredString {
        self.color(default_color)
    }
}

impl WithDefaultColor for ColoredString {
    fn with_default(self, _default_color: Color) -> ColoredString {
        self
    }
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

const BANNER_ART: &str = r#"
        ·  ▄▄▄▄   ▄▄▄· ▄▄▄  ▄ •▄ ▄▄▌   ▄· ▄▌
        ██▪ ██ ▐█ ▀█ ▀▄ █·█▌▄▌▪██•  ▐█▪██▌
        ▐█· ▐█▌▄█▀▀█ ▐▀▀▄ ▐▀▀▄·██▪  ▐█▌▐█▪
        ██. ██ ▐█ ▪▐▌▐█•█▌▐█.█▌▐█▌▐▌ ▐█▀·.
        ▀▀▀▀▀•  ▀  ▀ .▀  ▀·▀  ▀.▀▀▀   ▀ •
"#;

pub fn banner(cfg: &Config) {
    if cfg.no_banner || cfg.quiet > 0 {
        return;
    }

    let text_content: String = format!("⟦ DARKLY v{} ⟧ ", env!("CARGO_PKG_VERSION"));
    let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
    let text: ColoredString = text_content.bright_green().bold();
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2).bright_black();

    print(&format!("{sep}{text}{sep}"));
    print(&format!("{}", BANNER_ART.color(colors::PRIMARY)));
    centerln(&format!("{}", "a scanner, darkly".italic().color(colors::SEPARATOR)));
}

pub fn header(msg: &str, cfg: &Config) {
    if cfg.quiet > 0 {
        return;
    }

    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    print(&format!("{}", line));
}

pub fn fat_separator() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    print(&format!("{}", sep));
}

/// Prints `key.....: value` lines with the dots padded to the longest key.
pub fn aligned_lines<V>(pairs: Vec<(&str, V)>, cfg: &Config)
where
    V: Display + WithDefaultColor,
{
    if cfg.quiet > 0 {
        return;
    }
    let key_width: usize = pairs.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, value) in pairs {
        let dots: String = ".".repeat((key_width + 1).saturating_sub(key.len()));
        let colon: String = format!(
            "{}{}",
            dots.color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR)
        );
        let value: ColoredString = value.with_default(colors::text_default(cfg));
        print_status(format!("{}{} {}", key.color(colors::PRIMARY), colon, value), cfg);
    }
}

pub fn print_status<T: AsRef<str>>(msg: T, cfg: &Config) {
    let prefix: ColoredString = ">".color(colors::SEPARATOR);
    let message: String = format!(
        "{} {}",
        prefix,
        msg.as_ref().color(colors::text_default(cfg))
    );
    print(&message);
}

pub fn tree_head(idx: usize, name: &str) {
    let idx_str: String = format!("[{}]", idx.to_string().color(colors::ACCENT));
    let output: String = format!(
        "{} {}",
        idx_str.color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    );
    print(&output);
}

pub fn as_tree_one_level(key_value_pair: Vec<(String, ColoredString)>, cfg: &Config) {
    for (i, (key, value)) in key_value_pair.iter().enumerate() {
        let last: bool = i + 1 == key_value_pair.len();
        let branch: ColoredString = if !last {
            "├─".bright_black()
        } else {
            "└─".bright_black()
        };
        let dots: String = ".".repeat(9usize.saturating_sub(key.len()));
        let output: String = format!(
            " {} {}{}{} {}",
            branch,
            key.color(colors::text_default(cfg)),
            dots.color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        );
        print(&output);
    }
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{}{}{}", space, msg, space));
}

const NO_RESULTS: &str = r#"
         _   _  ___    _   _  ___  ____ _____ ____
        | \ | |/ _ \  | | | |/ _ \/ ___|_   _/ ___|
        |  \| | | | | | |_| | | | \___ \ | | \___ \
        | |\  | |_| | |  _  | |_| |___) || |  ___) |
        |_| \_|\___/  |_| |_|\___/|____/ |_| |____/
"#;

pub fn no_results() {
    print(&format!("{}", NO_RESULTS.red().bold()));
}

pub fn end_of_program(cfg: &Config) {
    if cfg.quiet > 1 {
        return;
    }
    print(&format!(
        "{}",
        "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR)
    ));
}
