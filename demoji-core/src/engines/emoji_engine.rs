//! A `DetectionEngine` implementation that classifies emoji with the
//! built-in Unicode pattern classes and the shortcode pass.
//! License: MIT OR APACHE 2.0

use std::sync::Arc;
use log::debug;

use crate::config::EngineConfig;
use crate::engine::DetectionEngine;
use crate::errors::DemojiError;
use crate::finding::{log_finding_debug, log_rejected_candidate_debug, EmojiCategory, Finding};
use crate::patterns::compiler::{get_or_compile_matchers, CompiledMatchers};
use crate::position::{CharIndexMapper, PositionResolver};
use crate::shortcode::accepted_shortcodes;
use crate::validators::{check_length, is_actual_emoji};

/// An accepted span, in both byte and character coordinates.
#[derive(Debug, Clone, Copy)]
struct Span<'m> {
    start_byte: usize,
    end_byte: usize,
    start_char: usize,
    end_char: usize,
    category: EmojiCategory,
    matcher_name: &'m str,
}

/// Which passes a classification run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Passes {
    Unicode,
    Shortcodes,
    All,
}

impl Passes {
    fn unicode(self) -> bool {
        matches!(self, Passes::Unicode | Passes::All)
    }

    fn shortcodes(self) -> bool {
        matches!(self, Passes::Shortcodes | Passes::All)
    }
}

/// Per-call record of which character offsets are already taken.
#[derive(Debug)]
struct OffsetClaims {
    claimed: Vec<bool>,
}

impl OffsetClaims {
    fn new(char_len: usize) -> Self {
        Self { claimed: vec![false; char_len] }
    }

    fn is_free(&self, start: usize, end: usize) -> bool {
        self.claimed[start..end].iter().all(|taken| !taken)
    }

    fn claim(&mut self, start: usize, end: usize) {
        self.claimed[start..end].iter_mut().for_each(|taken| *taken = true);
    }
}

#[derive(Debug)]
pub struct EmojiEngine {
    compiled_matchers: Arc<CompiledMatchers>,
    config: EngineConfig,
}

impl EmojiEngine {
    /// Validates `config` and fetches (or compiles) its matcher set.
    pub fn new(config: EngineConfig) -> Result<Self, DemojiError> {
        config.validate()?;
        let compiled_matchers = get_or_compile_matchers(&config)?;
        debug!(
            "EmojiEngine ready: shortcodes={}, case_sensitive={}, max_text_length={}",
            config.include_shortcodes, config.case_sensitive, config.max_text_length
        );
        Ok(Self { compiled_matchers, config })
    }

    /// Runs the selected passes and returns accepted spans sorted by start.
    fn classify<'s>(&'s self, text: &str, passes: Passes) -> Vec<Span<'s>> {
        let mapper = CharIndexMapper::new(text);
        let mut claims = OffsetClaims::new(mapper.char_len());
        let mut spans: Vec<Span<'s>> = Vec::new();

        if passes.unicode() {
            for matcher in &self.compiled_matchers.matchers {
                for m in matcher.regex.find_iter(text) {
                    let start_char = mapper.char_offset(m.start());
                    let end_char = mapper.char_offset(m.end());
                    if !claims.is_free(start_char, end_char) {
                        continue;
                    }
                    if matcher.ambiguity_filter && !is_actual_emoji(m.as_str()) {
                        log_rejected_candidate_debug(module_path!(), &matcher.name, m.as_str(), "decorative symbol");
                        continue;
                    }
                    claims.claim(start_char, end_char);
                    spans.push(Span {
                        start_byte: m.start(),
                        end_byte: m.end(),
                        start_char,
                        end_char,
                        category: matcher.category,
                        matcher_name: &matcher.name,
                    });
                }
            }
        }

        if passes.shortcodes() {
            if let Some(shortcodes) = &self.compiled_matchers.shortcodes {
                for range in accepted_shortcodes(shortcodes, text) {
                    let start_char = mapper.char_offset(range.start);
                    let end_char = mapper.char_offset(range.end);
                    if !claims.is_free(start_char, end_char) {
                        continue;
                    }
                    claims.claim(start_char, end_char);
                    spans.push(Span {
                        start_byte: range.start,
                        end_byte: range.end,
                        start_char,
                        end_char,
                        category: EmojiCategory::Shortcode,
                        matcher_name: "shortcode",
                    });
                }
            }
        }

        spans.sort_by_key(|s| s.start_char);
        spans
    }

    fn to_findings(&self, text: &str, spans: &[Span<'_>], base_line: Option<usize>) -> Vec<Finding> {
        let resolver = PositionResolver::new(text, base_line);
        spans
            .iter()
            .map(|span| {
                let (line, column_start, column_end) =
                    resolver.span(span.start_char, span.end_char - span.start_char);
                let finding = Finding {
                    text: text[span.start_byte..span.end_byte].to_string(),
                    category: span.category,
                    start_offset: span.start_char,
                    end_offset: span.end_char,
                    line,
                    column_start,
                    column_end,
                };
                log_finding_debug(module_path!(), span.matcher_name, &finding);
                finding
            })
            .collect()
    }

    fn findings_for(&self, text: &str, base_line: Option<usize>, passes: Passes) -> Result<Vec<Finding>, DemojiError> {
        check_length(text, self.config.max_text_length)?;
        if text.is_empty() {
            return Ok(Vec::new());
        }
        let spans = self.classify(text, passes);
        Ok(self.to_findings(text, &spans, base_line))
    }
}

impl DetectionEngine for EmojiEngine {
    fn scan(&self, text: &str, base_line: Option<usize>) -> Result<Vec<Finding>, DemojiError> {
        self.findings_for(text, base_line, Passes::Unicode)
    }

    fn scan_shortcodes(&self, text: &str, base_line: Option<usize>) -> Result<Vec<Finding>, DemojiError> {
        self.findings_for(text, base_line, Passes::Shortcodes)
    }

    fn find_emojis(&self, text: &str, base_line: Option<usize>) -> Result<Vec<Finding>, DemojiError> {
        self.findings_for(text, base_line, Passes::All)
    }

    fn remove_emojis(&self, text: &str) -> Result<String, DemojiError> {
        check_length(text, self.config.max_text_length)?;
        let spans = self.classify(text, Passes::All);
        if spans.is_empty() {
            return Ok(text.to_string());
        }

        let removed: usize = spans.iter().map(|s| s.end_byte - s.start_byte).sum();
        let mut output = String::with_capacity(text.len() - removed);
        let mut last_end = 0usize;
        for span in &spans {
            output.push_str(&text[last_end..span.start_byte]);
            last_end = span.end_byte;
        }
        output.push_str(&text[last_end..]);

        debug!(
            "Removed {} span(s); length {} -> {} bytes.",
            spans.len(),
            text.len(),
            output.len()
        );
        Ok(output)
    }

    fn has_emojis(&self, text: &str) -> Result<bool, DemojiError> {
        check_length(text, self.config.max_text_length)?;

        // Nothing is claimed before the first acceptance, so the first
        // candidate that passes its own checks decides the answer.
        for matcher in &self.compiled_matchers.matchers {
            let hit = matcher
                .regex
                .find_iter(text)
                .any(|m| !matcher.ambiguity_filter || is_actual_emoji(m.as_str()));
            if hit {
                return Ok(true);
            }
        }

        Ok(self
            .compiled_matchers
            .shortcodes
            .as_ref()
            .map_or(false, |shortcodes| !accepted_shortcodes(shortcodes, text).is_empty()))
    }

    fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn compiled_matchers(&self) -> &CompiledMatchers {
        &self.compiled_matchers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> EmojiEngine {
        EmojiEngine::new(EngineConfig::default()).unwrap()
    }

    fn texts(findings: &[Finding]) -> Vec<(&str, EmojiCategory)> {
        findings.iter().map(|f| (f.text.as_str(), f.category)).collect()
    }

    #[test]
    fn single_sparkle_is_unicode() {
        let findings = engine().find_emojis("Hello ✨ world", None).unwrap();
        assert_eq!(findings.len(), 1);
        let f = &findings[0];
        assert_eq!(f.text, "✨");
        assert_eq!(f.category, EmojiCategory::Unicode);
        assert_eq!((f.start_offset, f.end_offset), (6, 7));
        assert_eq!((f.line, f.column_start, f.column_end), (1, 7, 8));
    }

    #[test]
    fn higher_priority_matcher_claims_the_span() {
        let text = "🇯🇵 1\u{FE0F}\u{20E3} 👩\u{200D}💻 👍🏽";
        let findings = engine().scan(text, None).unwrap();
        assert_eq!(
            texts(&findings),
            vec![
                ("🇯🇵", EmojiCategory::Flag),
                ("1\u{FE0F}\u{20E3}", EmojiCategory::Keycap),
                ("👩\u{200D}💻", EmojiCategory::Sequence),
                ("👍🏽", EmojiCategory::Unicode),
            ]
        );
    }

    #[test]
    fn subdivision_flag_is_tag_sequence() {
        let wales = "\u{1F3F4}\u{E0067}\u{E0062}\u{E0077}\u{E006C}\u{E0073}\u{E007F}";
        let findings = engine().scan(&format!("Go {}!", wales), None).unwrap();
        assert_eq!(texts(&findings), vec![(wales, EmojiCategory::TagSequence)]);
        assert_eq!(findings[0].char_len(), 7);
    }

    #[test]
    fn scan_excludes_shortcodes_and_scan_shortcodes_excludes_unicode() {
        let text = "🚀 :rocket:";
        let e = engine();
        assert_eq!(texts(&e.scan(text, None).unwrap()), vec![("🚀", EmojiCategory::Unicode)]);
        assert_eq!(texts(&e.scan_shortcodes(text, None).unwrap()), vec![(":rocket:", EmojiCategory::Shortcode)]);
        assert_eq!(e.find_emojis(text, None).unwrap().len(), 2);
    }

    #[test]
    fn removal_keeps_surrounding_whitespace() {
        assert_eq!(engine().remove_emojis("Hello ✨ world 🚀").unwrap(), "Hello  world ");
    }

    #[test]
    fn has_emojis_ignores_rejected_symbols() {
        let e = engine();
        assert!(!e.has_emojis("Copyright © 2024 ™").unwrap());
        assert!(e.has_emojis("ok ✅").unwrap());
        assert!(e.has_emojis("ship it :shipit:").unwrap());
        assert!(!e.has_emojis("Text :a:b:c: more").unwrap());
    }

    #[test]
    fn length_limit_applies_to_every_entry_point() {
        let e = EmojiEngine::new(EngineConfig { max_text_length: 3, max_shortcode_length: 3, ..Default::default() })
            .unwrap();
        assert!(matches!(e.find_emojis("abcd", None), Err(DemojiError::LengthExceeded { .. })));
        assert!(matches!(e.remove_emojis("abcd"), Err(DemojiError::LengthExceeded { .. })));
        assert!(matches!(e.has_emojis("abcd"), Err(DemojiError::LengthExceeded { .. })));
        assert!(e.find_emojis("abc", None).is_ok());
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let err = EmojiEngine::new(EngineConfig { max_text_length: 0, ..Default::default() }).unwrap_err();
        assert!(matches!(err, DemojiError::InvalidConfig(_)));
    }
}
