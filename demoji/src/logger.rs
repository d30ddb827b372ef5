// demoji/src/logger.rs
//! Logger setup for the `demoji` binary.
//!
//! `RUST_LOG` is honored unless a level is forced from the command line.
//! Initialization is idempotent: a second call is a no-op, which keeps
//! library callers and tests that initialize their own logger working.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes `env_logger`, defaulting to `warn` when `RUST_LOG` is unset.
///
/// `level` overrides both the default and `RUST_LOG` (`--quiet` passes
/// `LevelFilter::Off`, `--debug` passes `LevelFilter::Debug`).
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).format_target(false);

    if builder.try_init().is_err() {
        log::debug!("Logger already initialized; keeping the existing one.");
    }
}

/// Maps the global `--quiet` / `--debug` flags to a forced level.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    match (quiet, debug) {
        (true, _) => Some(LevelFilter::Off),
        (false, true) => Some(LevelFilter::Debug),
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_debug() {
        assert_eq!(level_from_flags(true, true), Some(LevelFilter::Off));
        assert_eq!(level_from_flags(false, true), Some(LevelFilter::Debug));
        assert_eq!(level_from_flags(false, false), None);
    }

    #[test]
    fn init_twice_is_harmless() {
        init_logger(Some(LevelFilter::Off));
        init_logger(None);
    }
}
