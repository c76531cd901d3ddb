use colored::Color;
use darkly_common::config::{Config, TextColor};

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::BrightYellow;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const IPV4_ADDR: Color = Color::BrightCyan;
pub const HOSTNAME: Color = Color::BrightMagenta;

/// Colour of ordinary text under `cfg`.
pub fn text_default(cfg: &Config) -> Color {
    match cfg.color {
        TextColor::Red => Color::Red,
        TextColor::Green => Color::Green,
        TextColor::Blue => Color::Blue,
        TextColor::Yellow => Color::Yellow,
        TextColor::Cyan => Color::Cyan,
        TextColor::Magenta => Color::Magenta,
        TextColor::Gray => Color::White,
        TextColor::White => Color::BrightWhite,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_text_color_maps_to_a_distinct_terminal_color() {
        let mapped: Vec<Color> = TextColor::ALL
            .iter()
            .map(|&color| {
                text_default(&Config {
                    color,
                    ..Config::default()
                })
            })
            .collect();
        for (i, a) in mapped.iter().enumerate() {
            for b in &mapped[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn default_config_is_bright_white() {
        assert_eq!(text_default(&Config::default()), Color::BrightWhite);
    }
}
