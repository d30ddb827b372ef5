//! errors.rs - Custom error types for the demoji-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//! Engine calls only ever raise `InvalidInput` or `LengthExceeded`; the
//! remaining variants come from engine construction and configuration loading.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `demoji-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DemojiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Input length ({length} characters) exceeds maximum allowed ({max})")]
    LengthExceeded { length: usize, max: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to compile matcher '{0}': {1}")]
    MatcherCompilation(String, regex::Error),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),
}

impl DemojiError {
    /// True for the two kinds a caller is expected to record per file and move past.
    pub fn is_per_input(&self) -> bool {
        matches!(self, DemojiError::InvalidInput(_) | DemojiError::LengthExceeded { .. })
    }
}
