//! Emoji pattern classes for demoji.
//!
//! This module owns the per-category regular expressions (tag sequences,
//! keycaps, regional-indicator flags, ZWJ sequences, general emoji and
//! `:shortcode:` tokens) and compiles them into immutable matcher sets that
//! engines share across calls.
//!
//! It works closely with `validators` (the ambiguity filter for decorative
//! look-alikes) and `engines` (which apply the compiled matchers in priority order).

pub mod compiler;
pub mod definitions;
