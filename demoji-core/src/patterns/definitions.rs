//! Built-in matcher definitions, listed most specific first.
//!
//! Every pattern ends with the same trailing-extender tail: variation
//! selector-16, the combining enclosing keycap, skin-tone modifiers, tag
//! characters and the zero-width joiner. A matched span therefore always
//! ends on a character that cannot extend it, and deleting the span never
//! splices its neighbours into a new emoji.

use crate::finding::EmojiCategory;

/// Characters that extend the emoji before them, minus the joiner.
const ELEMENT_EXTENDERS: &str = r"[\x{FE0F}\x{20E3}\x{1F3FB}-\x{1F3FF}\x{E0020}-\x{E007F}]*";
/// Trailing extenders absorbed at the end of every span.
const SPAN_TAIL: &str = r"[\x{FE0F}\x{20E3}\x{1F3FB}-\x{1F3FF}\x{E0020}-\x{E007F}\x{200D}]*";

const PICTOGRAPH: &str = r"\p{Extended_Pictographic}";
const SKIN_TONE: &str = r"[\x{1F3FB}-\x{1F3FF}]";
const REGIONAL_INDICATOR: &str = r"[\x{1F1E6}-\x{1F1FF}]";
const ZWJ: &str = r"\x{200D}";
const VS16: &str = r"\x{FE0F}";

/// Shortcode content characters when letters must be lowercase.
pub const SHORTCODE_CHARS_LOWER: &str = r"[a-z0-9_+\-]";
/// Shortcode content characters when mixed case is admitted.
pub const SHORTCODE_CHARS_MIXED: &str = r"[a-zA-Z0-9_+\-]";

/// A named, categorized pattern before compilation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatcherDefinition {
    pub name: &'static str,
    pub category: EmojiCategory,
    pub pattern: String,
    /// Run the decorative-symbol filter on single-codepoint matches.
    pub ambiguity_filter: bool,
}

/// The five Unicode matchers in load-bearing priority order.
pub fn builtin_definitions() -> Vec<MatcherDefinition> {
    vec![
        MatcherDefinition {
            name: "tag_sequence",
            category: EmojiCategory::TagSequence,
            pattern: format!(
                r"{base}{tone}?{vs}?[\x{{E0020}}-\x{{E007E}}]+\x{{E007F}}{tail}",
                base = PICTOGRAPH,
                tone = SKIN_TONE,
                vs = VS16,
                tail = SPAN_TAIL
            ),
            ambiguity_filter: false,
        },
        MatcherDefinition {
            name: "keycap",
            category: EmojiCategory::Keycap,
            pattern: format!(r"[0-9#*]{vs}?\x{{20E3}}{tail}", vs = VS16, tail = SPAN_TAIL),
            ambiguity_filter: false,
        },
        MatcherDefinition {
            name: "flag",
            category: EmojiCategory::Flag,
            pattern: format!("{ri}{ri}{tail}", ri = REGIONAL_INDICATOR, tail = SPAN_TAIL),
            ambiguity_filter: false,
        },
        MatcherDefinition {
            name: "zwj_sequence",
            category: EmojiCategory::Sequence,
            pattern: format!(
                "{base}{ext}(?:{zwj}{base}{ext})+{tail}",
                base = PICTOGRAPH,
                ext = ELEMENT_EXTENDERS,
                zwj = ZWJ,
                tail = SPAN_TAIL
            ),
            ambiguity_filter: false,
        },
        MatcherDefinition {
            name: "unicode_emoji",
            category: EmojiCategory::Unicode,
            pattern: format!(
                "(?:{base}|{ri}|{tone}){tail}",
                base = PICTOGRAPH,
                ri = REGIONAL_INDICATOR,
                tone = SKIN_TONE,
                tail = SPAN_TAIL
            ),
            ambiguity_filter: true,
        },
    ]
}

/// `:content:` candidates. Length limits are enforced after matching so that
/// over-long tokens are logged as rejections rather than silently skipped.
pub fn shortcode_token_pattern(case_sensitive: bool) -> String {
    let chars = if case_sensitive { SHORTCODE_CHARS_LOWER } else { SHORTCODE_CHARS_MIXED };
    format!(":({}+):", chars)
}

/// Colon chains with three or more colons and non-empty segments, e.g. `:a:b:c:`.
pub fn malformed_colon_run_pattern() -> String {
    format!(":(?:{}+:){{2,}}", SHORTCODE_CHARS_MIXED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn compiled(name: &str) -> Regex {
        let def = builtin_definitions().into_iter().find(|d| d.name == name).unwrap();
        Regex::new(&def.pattern).unwrap()
    }

    #[test]
    fn priority_order_is_most_specific_first() {
        let order: Vec<EmojiCategory> = builtin_definitions().iter().map(|d| d.category).collect();
        assert_eq!(
            order,
            vec![
                EmojiCategory::TagSequence,
                EmojiCategory::Keycap,
                EmojiCategory::Flag,
                EmojiCategory::Sequence,
                EmojiCategory::Unicode,
            ]
        );
    }

    #[test]
    fn tag_sequence_matches_subdivision_flag() {
        let scotland = "\u{1F3F4}\u{E0067}\u{E0062}\u{E0073}\u{E0063}\u{E0074}\u{E007F}";
        let m = compiled("tag_sequence").find(scotland).unwrap();
        assert_eq!(m.as_str(), scotland);
    }

    #[test]
    fn keycap_accepts_optional_selector() {
        let re = compiled("keycap");
        assert_eq!(re.find("#\u{FE0F}\u{20E3}").unwrap().as_str(), "#\u{FE0F}\u{20E3}");
        assert_eq!(re.find("7\u{20E3}").unwrap().as_str(), "7\u{20E3}");
        assert!(re.find("7").is_none());
    }

    #[test]
    fn flag_pairs_regional_indicators() {
        let re = compiled("flag");
        let found: Vec<&str> = re.find_iter("🇺🇸🇫🇷🇩").map(|m| m.as_str()).collect();
        assert_eq!(found, vec!["🇺🇸", "🇫🇷"]);
    }

    #[test]
    fn zwj_sequence_spans_whole_family() {
        let family = "👨\u{200D}👩\u{200D}👧";
        assert_eq!(compiled("zwj_sequence").find(family).unwrap().as_str(), family);
        assert!(compiled("zwj_sequence").find("👨👩").is_none());
    }

    #[test]
    fn general_emoji_absorbs_skin_tone() {
        assert_eq!(compiled("unicode_emoji").find("ok 👍🏽!").unwrap().as_str(), "👍🏽");
    }

    #[test]
    fn shortcode_case_rules() {
        let lower = Regex::new(&shortcode_token_pattern(true)).unwrap();
        let mixed = Regex::new(&shortcode_token_pattern(false)).unwrap();
        assert!(lower.is_match(":rocket:"));
        assert!(!lower.is_match(":Rocket:"));
        assert!(mixed.is_match(":Rocket:"));
        assert!(lower.is_match(":+1:"));
    }

    #[test]
    fn malformed_run_needs_three_colons() {
        let re = Regex::new(&malformed_colon_run_pattern()).unwrap();
        assert_eq!(re.find("x :a:b:c: y").unwrap().as_str(), ":a:b:c:");
        assert!(re.find(":smile::rocket:").is_none());
        assert!(re.find(":rocket:").is_none());
    }
}
