//! Command implementations and the state they share for one run.

pub mod check;
pub mod fix;
pub mod hook;
pub mod init;

use anyhow::{Context, Result};
use log::debug;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use demoji_core::{DemojiConfig, EmojiEngine, IgnorePolicy};

use crate::cli::EngineArgs;
use crate::ui::output_format::{self, ColorMode};
use crate::ui::theme::{ThemeMap, DEFAULT_THEME};

/// How a command finished, mapped onto the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to report (exit 0).
    Clean,
    /// Emoji were found, or would be changed by a dry run (exit 1).
    Findings,
    /// At least one input could not be processed (exit 2).
    Failed,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Clean => ExitCode::SUCCESS,
            Outcome::Findings => ExitCode::from(1),
            Outcome::Failed => ExitCode::from(2),
        }
    }
}

/// Configuration, engine and ignore policy resolved once per run.
pub struct RunContext {
    pub config: DemojiConfig,
    pub engine: EmojiEngine,
    pub policy: IgnorePolicy,
    pub theme: &'static ThemeMap,
    pub colors: ColorMode,
    pub quiet: bool,
}

impl RunContext {
    /// Discovers the configuration, applies command-line overrides and builds the engine.
    pub fn new(config_path: Option<&Path>, engine_args: &EngineArgs, no_color: bool, quiet: bool) -> Result<Self> {
        let mut config = DemojiConfig::discover(config_path).context("Failed to load configuration")?;
        config.engine = engine_args.apply(config.engine);
        debug!("Effective engine configuration: {:?}", config.engine);

        let engine = EmojiEngine::new(config.engine.clone()).context("Failed to initialize the emoji engine")?;
        let policy = IgnorePolicy::new(&config.ignore)?;
        let colors = ColorMode::resolve(config.output.color, no_color);

        Ok(Self { config, engine, policy, theme: &DEFAULT_THEME, colors, quiet })
    }

    /// Informational message on stderr, suppressed by `--quiet`.
    pub fn info_msg(&self, msg: impl AsRef<str>) {
        if !self.quiet {
            let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), self.theme, self.colors.stderr);
        }
    }

    /// Success message on stderr, suppressed by `--quiet`.
    pub fn success_msg(&self, msg: impl AsRef<str>) {
        if !self.quiet {
            let _ = output_format::print_success_message(&mut io::stderr(), msg.as_ref(), self.theme, self.colors.stderr);
        }
    }

    /// Warning message on stderr.
    pub fn warn_msg(&self, msg: impl AsRef<str>) {
        let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), self.theme, self.colors.stderr);
    }

    /// Error message on stderr.
    pub fn error_msg(&self, msg: impl AsRef<str>) {
        let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), self.theme, self.colors.stderr);
    }
}
