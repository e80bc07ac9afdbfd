use ratatui::style::Color;
use theft_dashboard_core::presentation::{parse_hex_color, Tier};

pub const ACCENT: Color = Color::Cyan;
pub const MUTED: Color = Color::Gray;

pub const fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Critical => Color::Red,
        Tier::Elevated => Color::LightRed,
        Tier::Guarded => Color::Yellow,
        Tier::Low => Color::Green,
        Tier::Planned => Color::Blue,
        Tier::Neutral => Color::Gray,
    }
}

/// Dataset colours are CSS hex strings; anything unreadable renders gray.
pub fn hex_color(code: &str) -> Color {
    parse_hex_color(code).map_or(MUTED, |(r, g, b)| Color::Rgb(r, g, b))
}
