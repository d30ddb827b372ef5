//! # demoji Core Library
//!
//! `demoji-core` provides the platform-independent logic for detecting and
//! removing emoji from text. It classifies spans as base Unicode emoji,
//! skin-tone modified emoji, ZWJ sequences, regional-indicator flags,
//! keycaps, tag sequences and `:shortcode:` tokens, resolves overlaps between
//! these categories, computes line/column positions, and removes findings
//! without disturbing any other character.
//!
//! The library is pure and stateless: no I/O, no global mutable state beyond
//! a cache of immutable compiled matchers.
//!
//! ## Modules
//!
//! * `config`: `EngineConfig` and the persisted `DemojiConfig` document.
//! * `patterns`: Matcher definitions and their compilation/caching.
//! * `validators`: The decorative-symbol filter, shortcode checks and input checks.
//! * `finding`: `Finding`, `EmojiCategory` and fingerprint helpers.
//! * `position`: Offset to line/column resolution.
//! * `shortcode`: The `:name:` pass.
//! * `engine`: The `DetectionEngine` trait.
//! * `engines`: The concrete `EmojiEngine`.
//! * `policy`: Ignore lists, markers and path globs applied by callers.
//! * `headless`: One-shot convenience wrappers.
//!
//! ## Usage Example
//!
//! ```rust
//! use demoji_core::{DetectionEngine, EmojiCategory, EmojiEngine, EngineConfig};
//!
//! fn main() -> Result<(), demoji_core::DemojiError> {
//!     let engine = EmojiEngine::new(EngineConfig::default())?;
//!
//!     let findings = engine.find_emojis("Hello ✨ world", None)?;
//!     assert_eq!(findings.len(), 1);
//!     assert_eq!(findings[0].category, EmojiCategory::Unicode);
//!     assert_eq!(findings[0].column_start, 7);
//!
//!     assert_eq!(engine.remove_emojis("Hello ✨ world 🚀")?, "Hello  world ");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Engine calls return [`DemojiError`]: `InvalidInput` for non-text input and
//! `LengthExceeded` for oversized buffers. Configuration loading uses
//! `anyhow::Error` with context.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod finding;
pub mod headless;
pub mod patterns;
pub mod policy;
pub mod position;
pub mod shortcode;
pub mod validators;

/// Re-exports the configuration types.
pub use config::{
    merge_config,
    ColorChoice,
    DemojiConfig,
    EngineConfig,
    IgnoreConfig,
    OutputConfig,
    OutputFormat,
    DEFAULT_MAX_SHORTCODE_LENGTH,
    DEFAULT_MAX_TEXT_LENGTH,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::DemojiError;

pub use engine::DetectionEngine;
pub use engines::emoji_engine::EmojiEngine;

pub use finding::{canonical_finding_hash, remove_findings, EmojiCategory, Finding};

pub use policy::IgnorePolicy;

pub use headless::{headless_find_emojis, headless_remove_emojis};

pub use validators::decode_text;

pub use patterns::compiler::{compile_matchers, CompiledMatcher, CompiledMatchers};
