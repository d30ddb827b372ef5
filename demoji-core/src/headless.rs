// File: demoji-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for using the engine in headless mode (non-UI).
//! Each helper builds an engine from a configuration and runs one call.

use crate::config::EngineConfig;
use crate::engine::DetectionEngine;
use crate::engines::emoji_engine::EmojiEngine;
use crate::errors::DemojiError;
use crate::finding::Finding;

/// Finds every emoji in `content` using a freshly built engine.
///
/// Matchers are cached per configuration, so repeated calls with the same
/// `config` do not recompile them.
pub fn headless_find_emojis(config: EngineConfig, content: &str) -> Result<Vec<Finding>, DemojiError> {
    let engine: Box<dyn DetectionEngine> = Box::new(EmojiEngine::new(config)?);
    engine.find_emojis(content, None)
}

/// Removes every emoji from `content` using a freshly built engine.
pub fn headless_remove_emojis(config: EngineConfig, content: &str) -> Result<String, DemojiError> {
    let engine: Box<dyn DetectionEngine> = Box::new(EmojiEngine::new(config)?);
    engine.remove_emojis(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_find_emojis() -> Result<(), DemojiError> {
        let findings = headless_find_emojis(EngineConfig::default(), "Deploy 🚀 now :tada:")?;
        let texts: Vec<&str> = findings.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["🚀", ":tada:"]);
        Ok(())
    }

    #[test]
    fn test_headless_remove_without_shortcodes() -> Result<(), DemojiError> {
        let config = EngineConfig { include_shortcodes: false, ..Default::default() };
        let cleaned = headless_remove_emojis(config, "Deploy 🚀 now :tada:")?;
        assert_eq!(cleaned, "Deploy  now :tada:");
        Ok(())
    }
}
