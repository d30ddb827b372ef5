// demoji/src/cli.rs
//! This file defines the command-line interface (CLI) for the demoji application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use demoji_core::{EngineConfig, OutputFormat};

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "demoji",
    author = "Demoji Team",
    version = env!("CARGO_PKG_VERSION"),
    about = "Find and remove emoji in source files",
    long_about = "demoji scans source trees for emoji: Unicode pictographs, skin-tone variants, ZWJ sequences, flags, keycaps, tag sequences and :shortcode: aliases. It reports them with exact line and column positions, removes them losslessly, and can guard commits through a git pre-commit hook.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Path to a configuration file; disables discovery.
    #[arg(long = "config", value_name = "FILE", global = true, env = "DEMOJI_CONFIG", help = "Path to a JSON configuration file.")]
    pub config: Option<PathBuf>,

    /// Never colorize output.
    #[arg(long = "no-color", global = true, help = "Disable colored output.")]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `demoji` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reports every emoji found without changing any file.
    #[command(about = "Report emoji in files or stdin without modifying anything.")]
    Check(CheckCommand),

    /// Removes emoji from files in place.
    #[command(about = "Remove emoji from files in place (or from stdin to stdout).")]
    Fix(FixCommand),

    /// Manages the git pre-commit hook.
    #[command(subcommand, about = "Install or remove the git pre-commit hook.")]
    Hook(HookCommand),

    /// Writes a default configuration file.
    #[command(about = "Write a default .demoji.json in the current directory.")]
    Init {
        /// Overwrite an existing file.
        #[arg(long, short = 'f', help = "Overwrite an existing configuration file.")]
        force: bool,
    },
}

/// Engine overrides shared by `check` and `fix`. Each flag wins over the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// Skip the `:shortcode:` pass.
    #[arg(long = "no-shortcodes", help = "Do not detect :shortcode: aliases.")]
    pub no_shortcodes: bool,

    /// Admit uppercase letters in shortcodes.
    #[arg(long = "case-insensitive", help = "Accept uppercase letters in shortcodes.")]
    pub case_insensitive: bool,

    #[arg(long = "max-shortcode-length", value_name = "N", help = "Longest shortcode content accepted, in characters.")]
    pub max_shortcode_length: Option<usize>,

    #[arg(long = "max-text-length", value_name = "N", help = "Largest file scanned, in characters.")]
    pub max_text_length: Option<usize>,
}

impl EngineArgs {
    /// Applies these overrides on top of a loaded engine configuration.
    pub fn apply(&self, mut config: EngineConfig) -> EngineConfig {
        if self.no_shortcodes {
            config.include_shortcodes = false;
        }
        if self.case_insensitive {
            config.case_sensitive = false;
        }
        if let Some(n) = self.max_shortcode_length {
            config.max_shortcode_length = n;
        }
        if let Some(n) = self.max_text_length {
            config.max_text_length = n;
        }
        config
    }
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Files or directories to scan; `-` reads stdin.
    #[arg(value_name = "PATH", default_value = ".", help = "Files or directories to scan (`-` for stdin).")]
    pub paths: Vec<PathBuf>,

    /// Report layout; defaults to the config file's `output.format`.
    #[arg(long = "format", short = 'f', value_enum, help = "Output format.")]
    pub format: Option<FormatChoice>,

    /// Exit with status 0 even when emoji are found.
    #[arg(long = "exit-zero", help = "Always exit with status 0 when the scan completes.")]
    pub exit_zero: bool,

    /// Suppress the per-category summary.
    #[arg(long = "no-summary", help = "Suppress the per-category summary.")]
    pub no_summary: bool,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Arguments for the `fix` command.
#[derive(Parser, Debug)]
pub struct FixCommand {
    /// Files or directories to rewrite; `-` reads stdin and writes stdout.
    #[arg(value_name = "PATH", default_value = ".", help = "Files or directories to fix (`-` for stdin).")]
    pub paths: Vec<PathBuf>,

    /// Report what would change without writing.
    #[arg(long = "dry-run", short = 'n', help = "Report what would change without writing any file.")]
    pub dry_run: bool,

    /// Show a unified diff of every change.
    #[arg(long, short = 'D', help = "Show a unified diff to highlight the changes made.")]
    pub diff: bool,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Subcommands for the `hook` command.
#[derive(Subcommand, Debug)]
pub enum HookCommand {
    #[command(about = "Install a pre-commit hook that runs `demoji check` on staged files.")]
    Install {
        /// Replace a pre-commit hook that demoji did not write.
        #[arg(long, short = 'f', help = "Overwrite an existing pre-commit hook.")]
        force: bool,
    },
    #[command(about = "Remove the demoji pre-commit hook.")]
    Uninstall {
        /// Remove the hook even if demoji did not write it.
        #[arg(long, short = 'f', help = "Remove the pre-commit hook even if it is not demoji's.")]
        force: bool,
    },
}

/// Report format as accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum FormatChoice {
    /// Colored table with a summary.
    Table,
    /// Machine-readable JSON document.
    Json,
    /// `path:line:col: emoji (category)` lines.
    Minimal,
    /// Markdown pull-request comment.
    Github,
}

impl From<FormatChoice> for OutputFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Table => OutputFormat::Table,
            FormatChoice::Json => OutputFormat::Json,
            FormatChoice::Minimal => OutputFormat::Minimal,
            FormatChoice::Github => OutputFormat::Github,
        }
    }
}
