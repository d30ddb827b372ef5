// File: demoji-core/src/validators.rs
//! Programmatic validation applied beyond regular expression matching.
//!
//! This module holds the ambiguity filter that rejects decorative symbols
//! which sit inside the Extended_Pictographic ranges without being emoji in
//! practice, the shortcode content checks, and the input checks shared by
//! every engine entry point.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashSet;
use once_cell::sync::Lazy;

use crate::errors::DemojiError;

// Pictographs that render as plain text symbols unless explicitly followed by VS16.
static DECORATIVE_SYMBOLS: Lazy<HashSet<char>> = Lazy::new(|| {
    let mut set = HashSet::new();
    set.extend([
        '\u{00A9}', // ©
        '\u{00AE}', // ®
        '\u{2122}', // ™
    ]);
    set
});

const VS16: char = '\u{FE0F}';

/// Returns true if a general-emoji match should be reported.
///
/// A decorative symbol counts only when its span carries VS16, the explicit
/// emoji-presentation request. Other trailing extenders (ZWJ, keycap, skin
/// tones, tags) do not turn `©` into an emoji.
pub fn is_actual_emoji(matched: &str) -> bool {
    let mut chars = matched.chars();
    match chars.next() {
        Some(base) if DECORATIVE_SYMBOLS.contains(&base) => chars.any(|c| c == VS16),
        Some(_) => true,
        None => false,
    }
}

/// Checks the content between the colons of a shortcode candidate.
///
/// Returns the rejection reason, or `None` if the content is acceptable.
pub fn shortcode_rejection(content: &str, max_length: usize) -> Option<&'static str> {
    let len = content.chars().count();
    if len == 0 {
        return Some("empty content");
    }
    if len > max_length {
        return Some("content exceeds maximum shortcode length");
    }
    if content.contains(':') {
        return Some("nested colon");
    }
    None
}

/// Rejects buffers longer than `max_text_length` characters.
pub fn check_length(text: &str, max_text_length: usize) -> Result<(), DemojiError> {
    // A UTF-8 buffer never has more characters than bytes.
    if text.len() <= max_text_length {
        return Ok(());
    }
    let length = text.chars().count();
    if length > max_text_length {
        return Err(DemojiError::LengthExceeded { length, max: max_text_length });
    }
    Ok(())
}

/// Accepts raw bytes only if they are a text value the engine can scan.
///
/// Invalid UTF-8 and embedded NUL bytes (a binary file) fail with `InvalidInput`.
pub fn decode_text(bytes: &[u8]) -> Result<&str, DemojiError> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        DemojiError::InvalidInput(format!("input is not valid UTF-8 text (at byte {})", e.valid_up_to()))
    })?;
    if let Some(pos) = text.find('\0') {
        return Err(DemojiError::InvalidInput(format!("input contains a NUL byte at offset {}", pos)));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decorative_symbols_are_rejected_alone() {
        assert!(!is_actual_emoji("©"));
        assert!(!is_actual_emoji("®"));
        assert!(!is_actual_emoji("™"));
        assert!(is_actual_emoji("✨"));
    }

    #[test]
    fn decorative_symbol_with_selector_is_accepted() {
        assert!(is_actual_emoji("©\u{FE0F}"));
        assert!(is_actual_emoji("™\u{FE0F}\u{200D}"));
    }

    #[test]
    fn decorative_symbol_needs_vs16_not_just_any_extender() {
        assert!(!is_actual_emoji("©\u{200D}"));
        assert!(!is_actual_emoji("™\u{20E3}"));
        assert!(!is_actual_emoji("©\u{1F3FD}"));
        assert!(is_actual_emoji("\u{1F3FD}"));
        assert!(is_actual_emoji("✨\u{200D}"));
    }

    #[test]
    fn shortcode_length_limits() {
        assert_eq!(shortcode_rejection("", 50), Some("empty content"));
        assert_eq!(shortcode_rejection("rocket", 50), None);
        assert!(shortcode_rejection(&"a".repeat(51), 50).is_some());
        assert_eq!(shortcode_rejection(&"a".repeat(50), 50), None);
        assert_eq!(shortcode_rejection("a:b", 50), Some("nested colon"));
    }

    #[test]
    fn length_check_counts_characters_not_bytes() {
        // Four emoji are 16 bytes but 4 characters.
        assert!(check_length("🚀🚀🚀🚀", 4).is_ok());
        assert!(matches!(
            check_length("🚀🚀🚀🚀🚀", 4),
            Err(DemojiError::LengthExceeded { length: 5, max: 4 })
        ));
    }

    #[test]
    fn decode_text_rejects_binary_and_invalid_utf8() {
        assert_eq!(decode_text(b"hello").unwrap(), "hello");
        assert!(matches!(decode_text(&[0xff, 0xfe]), Err(DemojiError::InvalidInput(_))));
        assert!(matches!(decode_text(b"ab\0cd"), Err(DemojiError::InvalidInput(_))));
    }
}
