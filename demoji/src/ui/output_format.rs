//! Status-message helpers and the color decision for each output stream.

use is_terminal::IsTerminal;
use std::io::{self, Write};

use demoji_core::ColorChoice;

use crate::ui::theme::{paint, ThemeEntry, ThemeMap};

/// Whether stdout and stderr get ANSI colors for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMode {
    pub stdout: bool,
    pub stderr: bool,
}

impl ColorMode {
    /// Resolves the configured choice against the terminals actually attached.
    /// `--no-color` and a set `NO_COLOR` variable both force colors off.
    pub fn resolve(choice: ColorChoice, no_color_flag: bool) -> Self {
        let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        if no_color_flag || no_color_env {
            return Self::disabled();
        }
        match choice {
            ColorChoice::Always => Self { stdout: true, stderr: true },
            ColorChoice::Never => Self::disabled(),
            ColorChoice::Auto => Self {
                stdout: io::stdout().is_terminal(),
                stderr: io::stderr().is_terminal(),
            },
        }
    }

    pub fn disabled() -> Self {
        Self { stdout: false, stderr: false }
    }
}

fn print_message<W: Write>(
    writer: &mut W,
    label: &str,
    entry: ThemeEntry,
    msg: &str,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    writeln!(writer, "{} {}", paint(label, entry, theme, enable_colors), msg)
}

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, "info:", ThemeEntry::Info, msg, theme, enable_colors)
}

pub fn print_success_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, "ok:", ThemeEntry::Success, msg, theme, enable_colors)
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, "warning:", ThemeEntry::Warn, msg, theme, enable_colors)
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_message(writer, "error:", ThemeEntry::Error, msg, theme, enable_colors)
}
