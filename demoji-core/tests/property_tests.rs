//! Property-based tests for the emoji engine.
//!
//! Buffers are generated from a small alphabet of emoji building blocks
//! (bases, modifiers, joiners, selectors, regional indicators, tags) mixed
//! with ordinary text, and the engine is checked for:
//! 1. Ordering: findings are non-overlapping and strictly increasing
//! 2. Fidelity: every finding's text is the slice its offsets name
//! 3. Removal: removing findings deletes exactly their characters
//! 4. Idempotence: remove(remove(text)) == remove(text) for colon-free text
//! 5. Agreement: has_emojis(text) == !find_emojis(text).is_empty()

use demoji_core::{remove_findings, DetectionEngine, EmojiCategory, EmojiEngine, EngineConfig};
use proptest::prelude::*;

const PIECES: &[&str] = &[
    "a", " ", "\n", "1", "#", "©", "™", "✨", "🚀", "👍", "🏽", "\u{200D}", "\u{FE0F}", "\u{20E3}", "🇺", "🇸",
    "🏴", "\u{E0067}", "\u{E007F}", "👨",
];

const SHORTCODE_PIECES: &[&str] = &[":", "a", "b", "+", "_", " ", "-", "🚀", "X"];

fn engine() -> EmojiEngine {
    EmojiEngine::new(EngineConfig::default()).expect("default config is valid")
}

/// Generate a buffer from emoji building blocks, without colons.
fn emoji_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(PIECES), 0..40).prop_map(|parts| parts.concat())
}

/// Generate a buffer dense in colons and shortcode characters.
fn shortcode_text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(SHORTCODE_PIECES), 0..30).prop_map(|parts| parts.concat())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn findings_are_ordered_and_faithful(text in emoji_text_strategy()) {
        let findings = engine().find_emojis(&text, None).unwrap();
        let chars: Vec<char> = text.chars().collect();
        for pair in findings.windows(2) {
            prop_assert!(pair[0].end_offset <= pair[1].start_offset);
        }
        for f in &findings {
            prop_assert!(f.start_offset < f.end_offset);
            let slice: String = chars[f.start_offset..f.end_offset].iter().collect();
            prop_assert_eq!(&f.text, &slice);
        }
    }

    #[test]
    fn removal_deletes_exactly_the_findings(text in emoji_text_strategy()) {
        let e = engine();
        let findings = e.find_emojis(&text, None).unwrap();
        let removed = e.remove_emojis(&text).unwrap();
        let expected_len = text.chars().count() - findings.iter().map(|f| f.char_len()).sum::<usize>();
        prop_assert_eq!(removed.chars().count(), expected_len);
        prop_assert_eq!(removed, remove_findings(&text, &findings));
    }

    #[test]
    fn removal_is_idempotent(text in emoji_text_strategy()) {
        let e = engine();
        let once = e.remove_emojis(&text).unwrap();
        let twice = e.remove_emojis(&once).unwrap();
        prop_assert_eq!(&once, &twice);
        prop_assert!(!e.has_emojis(&once).unwrap());
    }

    #[test]
    fn has_emojis_agrees_with_find(text in emoji_text_strategy()) {
        let e = engine();
        prop_assert_eq!(e.has_emojis(&text).unwrap(), !e.find_emojis(&text, None).unwrap().is_empty());
    }

    #[test]
    fn shortcode_findings_are_well_formed(text in shortcode_text_strategy()) {
        let e = engine();
        let findings = e.find_emojis(&text, None).unwrap();
        for f in findings.iter().filter(|f| f.category == EmojiCategory::Shortcode) {
            let content = &f.text[1..f.text.len() - 1];
            prop_assert!(f.text.starts_with(':') && f.text.ends_with(':'));
            prop_assert!(!content.is_empty());
            prop_assert!(content.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "_+-".contains(c)));
        }
        prop_assert_eq!(e.has_emojis(&text).unwrap(), !findings.is_empty());
        prop_assert_eq!(e.remove_emojis(&text).unwrap(), remove_findings(&text, &findings));
    }
}
