// demoji/src/lib.rs
//! # demoji CLI Application
//!
//! This crate provides the command-line interface for the `demoji-core`
//! engine: walking source trees, rendering reports, rewriting files and
//! managing the git pre-commit hook. `main.rs` only parses arguments,
//! initializes logging and calls [`run`].

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod walker;

use anyhow::{Context, Result};
use std::io;

use demoji_core::ColorChoice;

use crate::cli::{Cli, Commands, HookCommand};
use crate::commands::hook::{self, HookAction};
use crate::commands::{check, fix, init, Outcome, RunContext};
use crate::ui::output_format::{print_success_message, ColorMode};
use crate::ui::theme::DEFAULT_THEME;

/// Success message on stderr for commands that run without a configuration.
fn notify(cli: &Cli, msg: &str) {
    if cli.quiet {
        return;
    }
    let colors = ColorMode::resolve(ColorChoice::Auto, cli.no_color);
    let _ = print_success_message(&mut io::stderr(), msg, &DEFAULT_THEME, colors.stderr);
}

/// Runs the parsed command line and returns how it finished.
pub fn run(cli: Cli) -> Result<Outcome> {
    let config_path = cli.config.as_deref();
    match &cli.command {
        Commands::Check(cmd) => {
            let ctx = RunContext::new(config_path, &cmd.engine, cli.no_color, cli.quiet)?;
            check::run_check(&ctx, cmd)
        }
        Commands::Fix(cmd) => {
            let ctx = RunContext::new(config_path, &cmd.engine, cli.no_color, cli.quiet)?;
            fix::run_fix(&ctx, cmd)
        }
        Commands::Hook(action) => {
            let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
            let result = match action {
                HookCommand::Install { force } => hook::install_hook(&cwd, *force)?,
                HookCommand::Uninstall { force } => hook::uninstall_hook(&cwd, *force)?,
            };
            let msg = match result {
                HookAction::Installed(path) => format!("Installed pre-commit hook at {}", path.display()),
                HookAction::Updated(path) => format!("Updated pre-commit hook at {}", path.display()),
                HookAction::Removed(path) => format!("Removed pre-commit hook at {}", path.display()),
                HookAction::NotInstalled => "No pre-commit hook is installed.".to_string(),
            };
            notify(&cli, &msg);
            Ok(Outcome::Clean)
        }
        Commands::Init { force } => {
            let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
            let path = init::write_default_config(&cwd, *force)?;
            notify(&cli, &format!("Wrote {}", path.display()));
            Ok(Outcome::Clean)
        }
    }
}
