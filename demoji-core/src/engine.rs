// demoji-core/src/engine.rs
//! Defines the core DetectionEngine trait.
//!
//! The `DetectionEngine` trait is the single interface through which the CLI
//! and other callers reach emoji classification. Every call is independent
//! and side-effect-free: per-call state (offset claims, candidate lists) is
//! local to the call, and the only shared state is the immutable matcher set
//! built at construction time, so one engine can serve many threads.
//!
//! License: MIT OR APACHE 2.0

use crate::config::EngineConfig;
use crate::errors::DemojiError;
use crate::finding::Finding;
use crate::patterns::compiler::CompiledMatchers;

/// A trait that defines the core functionality of an emoji detection engine.
pub trait DetectionEngine: Send + Sync {
    /// Scans for Unicode emoji (every category except `Shortcode`).
    ///
    /// Findings are non-overlapping and sorted by `start_offset`. When
    /// `base_line` is given, the whole buffer is reported as that one line.
    ///
    /// # Errors
    /// `LengthExceeded` if `text` is longer than `max_text_length` characters.
    fn scan(&self, text: &str, base_line: Option<usize>) -> Result<Vec<Finding>, DemojiError>;

    /// Scans for `:shortcode:` tokens only. Empty when shortcodes are disabled.
    fn scan_shortcodes(&self, text: &str, base_line: Option<usize>) -> Result<Vec<Finding>, DemojiError>;

    /// Returns every finding: Unicode spans and shortcodes merged, overlap-resolved
    /// and sorted by `start_offset`.
    fn find_emojis(&self, text: &str, base_line: Option<usize>) -> Result<Vec<Finding>, DemojiError>;

    /// Returns `text` with every span `find_emojis` would report deleted.
    ///
    /// All other characters, whitespace included, are preserved in place.
    fn remove_emojis(&self, text: &str) -> Result<String, DemojiError>;

    /// True if and only if `find_emojis(text, None)` would return at least one finding.
    fn has_emojis(&self, text: &str) -> Result<bool, DemojiError>;

    /// Returns a reference to the engine's configuration.
    fn config(&self) -> &EngineConfig;

    /// Returns a reference to the compiled matcher set used by the engine.
    fn compiled_matchers(&self) -> &CompiledMatchers;
}
