//! Color theme constants for the dashboard.

use ratatui::style::Color;

use crate::feed::LogLevel;

/// Panel borders
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Highlights and important values
pub const COLOR_ACCENT: Color = Color::White;

/// Title text
pub const COLOR_HEADER: Color = Color::White;

/// Less important info (timestamps, hints)
pub const COLOR_DIM: Color = Color::DarkGray;

/// Bot reported online / stream live
pub const COLOR_ONLINE: Color = Color::LightGreen;

/// Bot offline / stream reconnecting
pub const COLOR_OFFLINE: Color = Color::Red;

/// Stream silent for too long
pub const COLOR_STALE: Color = Color::Yellow;

/// Background for the confirmation dialog
pub const COLOR_DIALOG_BG: Color = Color::Rgb(10, 15, 35);

/// Badge color for a log level.
pub fn level_color(level: LogLevel) -> Color {
    match level {
        LogLevel::Debug => Color::DarkGray,
        LogLevel::Info => Color::Cyan,
        LogLevel::Success => Color::Rgb(4, 181, 117), // green #04B575
        LogLevel::Warn => Color::Yellow,
        LogLevel::Error => Color::Red,
        LogLevel::Admin => Color::Magenta,
        LogLevel::Other => Color::Gray,
    }
}
