//! Provides the core data structures for reporting emoji occurrences, plus
//! small helpers for fingerprinting and debug logging of findings.

use serde::{Deserialize, Serialize};
use log::debug;
use std::fmt;

use lazy_static::lazy_static;
use sha2::{Sha256, Digest};

lazy_static! {
    /// A static boolean that is initialized once to determine if raw glyphs may appear in debug logs.
    static ref RAW_DEBUG_ALLOWED: bool = {
        std::env::var("DEMOJI_LOG_RAW")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// The kind of emoji a span was classified as, from the matcher that claimed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmojiCategory {
    /// A single base emoji, optionally with a skin-tone modifier or presentation selector.
    Unicode,
    /// A Zero-Width-Joiner sequence.
    Sequence,
    /// A regional-indicator pair.
    Flag,
    /// A digit, `#` or `*` enclosed as a keycap.
    Keycap,
    /// A base emoji followed by tag characters and a cancel tag.
    TagSequence,
    /// A textual `:name:` alias.
    Shortcode,
}

impl EmojiCategory {
    pub const ALL: [EmojiCategory; 6] = [
        EmojiCategory::Unicode,
        EmojiCategory::Sequence,
        EmojiCategory::Flag,
        EmojiCategory::Keycap,
        EmojiCategory::TagSequence,
        EmojiCategory::Shortcode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmojiCategory::Unicode => "unicode",
            EmojiCategory::Sequence => "sequence",
            EmojiCategory::Flag => "flag",
            EmojiCategory::Keycap => "keycap",
            EmojiCategory::TagSequence => "tag_sequence",
            EmojiCategory::Shortcode => "shortcode",
        }
    }
}

impl fmt::Display for EmojiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a single detected emoji occurrence.
///
/// Offsets are half-open character indices into the scanned buffer, so
/// `text == buffer.chars().skip(start_offset).take(end_offset - start_offset)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub text: String,
    pub category: EmojiCategory,
    pub start_offset: usize,
    pub end_offset: usize,
    pub line: usize,
    pub column_start: usize,
    pub column_end: usize,
}

impl Finding {
    /// Number of characters covered by this finding.
    pub fn char_len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    /// The finding's text as `U+XXXX` codepoints, e.g. `U+1F44D U+1F3FD`.
    pub fn codepoints(&self) -> String {
        describe_codepoints(&self.text)
    }
}

/// Renders a string as space-separated `U+XXXX` codepoints.
pub fn describe_codepoints(s: &str) -> String {
    s.chars()
        .map(|c| format!("U+{:04X}", c as u32))
        .collect::<Vec<_>>()
        .join(" ")
}

fn get_loggable_content(text: &str) -> String {
    if *RAW_DEBUG_ALLOWED {
        text.to_string()
    } else {
        describe_codepoints(text)
    }
}

pub fn log_finding_debug(module_path: &str, matcher_name: &str, finding: &Finding) {
    debug!(
        "{} Found {} via '{}': '{}' at [{}, {}) line {} col {}",
        module_path,
        finding.category,
        matcher_name,
        get_loggable_content(&finding.text),
        finding.start_offset,
        finding.end_offset,
        finding.line,
        finding.column_start
    );
}

pub fn log_rejected_candidate_debug(module_path: &str, matcher_name: &str, text: &str, reason: &str) {
    debug!(
        "{} Rejected candidate for '{}' ({}): '{}'",
        module_path,
        matcher_name,
        reason,
        get_loggable_content(text)
    );
}

/// Stable identifier for a finding at a location, independent of column shifts
/// caused by edits elsewhere on the line.
pub fn canonical_finding_hash(source_id: &str, category: EmojiCategory, text: &str, line_content: &str) -> String {
    let normalized_line = line_content
        .trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let mut hasher = Sha256::new();
    hasher.update(source_id.as_bytes());
    hasher.update(b":");
    hasher.update(category.as_str().as_bytes());
    hasher.update(b":");
    hasher.update(text.as_bytes());
    hasher.update(b":");
    hasher.update(normalized_line.as_bytes());
    hex::encode(hasher.finalize())
}

/// Deletes the given findings from `text`, leaving every other character in place.
///
/// Findings must come from a scan of this exact `text` with `base_line = None`,
/// or from per-line scans of a single line.
pub fn remove_findings(text: &str, findings: &[Finding]) -> String {
    if findings.is_empty() {
        return text.to_string();
    }
    let mut ranges: Vec<(usize, usize)> = findings.iter().map(|f| (f.start_offset, f.end_offset)).collect();
    ranges.sort_unstable();

    let mut out = String::with_capacity(text.len());
    let mut ranges = ranges.into_iter().peekable();
    for (idx, ch) in text.chars().enumerate() {
        while let Some(&(_, end)) = ranges.peek() {
            if end <= idx {
                ranges.next();
            } else {
                break;
            }
        }
        match ranges.peek() {
            Some(&(start, end)) if start <= idx && idx < end => {}
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(text: &str, start: usize) -> Finding {
        let len = text.chars().count();
        Finding {
            text: text.to_string(),
            category: EmojiCategory::Unicode,
            start_offset: start,
            end_offset: start + len,
            line: 1,
            column_start: start + 1,
            column_end: start + 1 + len,
        }
    }

    #[test]
    fn codepoints_are_uppercase_hex() {
        assert_eq!(describe_codepoints("👍🏽"), "U+1F44D U+1F3FD");
        assert_eq!(describe_codepoints("a"), "U+0061");
    }

    #[test]
    fn finding_hash_ignores_surrounding_whitespace() {
        let h1 = canonical_finding_hash("a.rs", EmojiCategory::Unicode, "🚀", "  let x = 1; // 🚀 ");
        let h2 = canonical_finding_hash("a.rs", EmojiCategory::Unicode, "🚀", "let x = 1;   // 🚀");
        assert_eq!(h1, h2);
        let h3 = canonical_finding_hash("b.rs", EmojiCategory::Unicode, "🚀", "let x = 1; // 🚀");
        assert_ne!(h1, h3);
    }

    #[test]
    fn remove_findings_uses_character_offsets() {
        let text = "a🚀b✨c";
        let out = remove_findings(text, &[finding("✨", 3), finding("🚀", 1)]);
        assert_eq!(out, "abc");
    }

    #[test]
    fn remove_findings_with_nothing_is_identity() {
        assert_eq!(remove_findings("plain", &[]), "plain");
    }

    #[test]
    fn category_display_matches_serde_name() {
        for category in EmojiCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category));
        }
    }
}
