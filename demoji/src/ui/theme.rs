//! Module for managing the application's command-line interface (CLI) theme.
//!
//! This module defines the logical parts of the output that can be styled
//! and the default color for each. Styling goes through [`paint`], which
//! returns the text unchanged when color is disabled.

use once_cell::sync::Lazy;
use owo_colors::{AnsiColors, OwoColorize};
use std::collections::HashMap;

/// Type alias for the theme map, providing a consistent type definition.
pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The different logical parts of the output that can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeEntry {
    /// Style for prominent headers or section titles.
    Header,
    /// Style for successful operation messages.
    Success,
    /// Style for general informational messages.
    Info,
    /// Style for warning messages.
    Warn,
    /// Style for error messages.
    Error,
    /// Style for file paths in reports.
    Path,
    /// Style for the matched emoji text in reports.
    Emoji,
    /// Style for lines added in a diff view.
    DiffAdded,
    /// Style for lines removed in a diff view.
    DiffRemoved,
    /// Style for the header/footer of a diff view.
    DiffHeader,
    /// Style for the category name in the summary.
    SummaryCategory,
    /// Style for the number of occurrences in the summary.
    SummaryOccurrences,
}

/// Represents a named ANSI color (e.g., "red", "brightgreen").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColor(pub String);

impl ThemeColor {
    fn named(name: &str) -> Self {
        ThemeColor(name.to_string())
    }

    /// Converts the color name into its corresponding `owo_colors::AnsiColors`.
    pub fn to_ansi_color(&self) -> AnsiColors {
        match self.0.as_str() {
            "black" => AnsiColors::Black,
            "red" => AnsiColors::Red,
            "green" => AnsiColors::Green,
            "yellow" => AnsiColors::Yellow,
            "blue" => AnsiColors::Blue,
            "magenta" => AnsiColors::Magenta,
            "cyan" => AnsiColors::Cyan,
            "white" => AnsiColors::White,
            "brightblack" => AnsiColors::BrightBlack,
            "brightred" => AnsiColors::BrightRed,
            "brightgreen" => AnsiColors::BrightGreen,
            "brightyellow" => AnsiColors::BrightYellow,
            "brightblue" => AnsiColors::BrightBlue,
            "brightmagenta" => AnsiColors::BrightMagenta,
            "brightcyan" => AnsiColors::BrightCyan,
            "brightwhite" => AnsiColors::BrightWhite,
            _ => AnsiColors::White,
        }
    }
}

/// Represents the style configuration for a specific `ThemeEntry`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeStyle {
    /// An optional `ThemeColor` to apply as the foreground color.
    pub fg: Option<ThemeColor>,
}

/// Returns the default theme map with predefined color mappings.
pub fn default_theme_map() -> ThemeMap {
    let entries = [
        (ThemeEntry::Header, "brightcyan"),
        (ThemeEntry::Success, "green"),
        (ThemeEntry::Info, "cyan"),
        (ThemeEntry::Warn, "yellow"),
        (ThemeEntry::Error, "red"),
        (ThemeEntry::Path, "brightblue"),
        (ThemeEntry::Emoji, "brightyellow"),
        (ThemeEntry::DiffAdded, "green"),
        (ThemeEntry::DiffRemoved, "red"),
        (ThemeEntry::DiffHeader, "yellow"),
        (ThemeEntry::SummaryCategory, "magenta"),
        (ThemeEntry::SummaryOccurrences, "brightwhite"),
    ];
    entries
        .into_iter()
        .map(|(entry, color)| (entry, ThemeStyle { fg: Some(ThemeColor::named(color)) }))
        .collect()
}

/// The default theme, built once per process.
pub static DEFAULT_THEME: Lazy<ThemeMap> = Lazy::new(default_theme_map);

/// Colors `text` with the style for `entry`, or returns it unchanged.
pub fn paint(text: &str, entry: ThemeEntry, theme: &ThemeMap, enable_colors: bool) -> String {
    if !enable_colors {
        return text.to_string();
    }
    match theme.get(&entry).and_then(|style| style.fg.as_ref()) {
        Some(color) => text.color(color.to_ansi_color()).to_string(),
        None => text.to_string(),
    }
}
