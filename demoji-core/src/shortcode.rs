//! The shortcode pass: recognizes `:name:` tokens independently of the
//! Unicode matchers.
//!
//! Colon chains such as `:a:b:c:` are located first; any token inside one is
//! rejected, so none of `:a:`, `:b:` or `:c:` is reported. The surviving
//! candidates are validated for length and then accepted leftmost first.

use std::ops::Range;

use crate::finding::log_rejected_candidate_debug;
use crate::patterns::compiler::ShortcodeMatcher;
use crate::validators::shortcode_rejection;

fn intersects(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

/// Byte ranges of accepted shortcodes in `text`, in ascending order.
pub fn accepted_shortcodes(matcher: &ShortcodeMatcher, text: &str) -> Vec<Range<usize>> {
    // Cheap exit: every shortcode needs two colons.
    if text.bytes().filter(|&b| b == b':').take(2).count() < 2 {
        return Vec::new();
    }

    let malformed: Vec<Range<usize>> = matcher.malformed_run.find_iter(text).map(|m| m.range()).collect();
    let mut accepted: Vec<Range<usize>> = Vec::new();

    for caps in matcher.token.captures_iter(text) {
        let (Some(whole), Some(content)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let range = whole.range();

        if let Some(reason) = shortcode_rejection(content.as_str(), matcher.max_length) {
            log_rejected_candidate_debug(module_path!(), "shortcode", whole.as_str(), reason);
            continue;
        }
        if malformed.iter().any(|run| intersects(run, &range)) {
            log_rejected_candidate_debug(module_path!(), "shortcode", whole.as_str(), "inside nested colon run");
            continue;
        }
        if accepted.iter().any(|prev| intersects(prev, &range)) {
            log_rejected_candidate_debug(module_path!(), "shortcode", whole.as_str(), "overlaps accepted shortcode");
            continue;
        }
        accepted.push(range);
    }
    accepted
}
