// demoji/src/main.rs
//! demoji entry point.
//!
//! Parses arguments, initializes logging and hands off to [`demoji::run`].
//! Exit status: 0 clean, 1 emoji found, 2 error.

use clap::Parser;
use is_terminal::IsTerminal;
use std::process::ExitCode;

use demoji::cli::Cli;
use demoji::commands::Outcome;
use demoji::logger;
use demoji::ui::output_format::print_error_message;
use demoji::ui::theme::DEFAULT_THEME;

fn main() -> ExitCode {
    let args = Cli::parse();
    logger::init_logger(logger::level_from_flags(args.quiet, args.debug));

    let no_color = args.no_color;
    match demoji::run(args) {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            let colors = !no_color && std::io::stderr().is_terminal();
            let _ = print_error_message(&mut std::io::stderr(), &format!("{:#}", e), &DEFAULT_THEME, colors);
            Outcome::Failed.into()
        }
    }
}
