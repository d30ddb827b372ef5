//! compiler.rs - Manages the compilation and caching of emoji matchers.
//!
//! This module converts an `EngineConfig` into `CompiledMatchers`, the
//! immutable matcher set an engine holds for its whole lifetime. It uses a
//! global, shared cache keyed by a hash of the configuration so that engines
//! built from equal configurations share one set of compiled expressions.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};
use lazy_static::lazy_static;
use std::sync::{Arc, RwLock};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::collections::hash_map::DefaultHasher;

use crate::config::EngineConfig;
use crate::errors::DemojiError;
use crate::finding::EmojiCategory;
use crate::patterns::definitions::{
    builtin_definitions, malformed_colon_run_pattern, shortcode_token_pattern, MatcherDefinition,
};

/// Represents a single compiled Unicode matcher.
#[derive(Debug)]
pub struct CompiledMatcher {
    /// The compiled regular expression used for matching.
    pub regex: Regex,
    /// The unique name of the matcher, used in logs.
    pub name: String,
    /// The category every span accepted by this matcher receives.
    pub category: EmojiCategory,
    /// Whether single-codepoint matches go through the decorative-symbol filter.
    pub ambiguity_filter: bool,
}

/// The two expressions behind the shortcode pass.
#[derive(Debug)]
pub struct ShortcodeMatcher {
    /// `:content:` candidates; the content is capture group 1.
    pub token: Regex,
    /// Colon chains whose tokens are all rejected.
    pub malformed_run: Regex,
    pub max_length: usize,
}

/// Represents the full matcher set for one configuration.
#[derive(Debug)]
pub struct CompiledMatchers {
    /// Unicode matchers in priority order: a span claimed by an earlier matcher wins.
    pub matchers: Vec<CompiledMatcher>,
    /// Present only when shortcodes are enabled.
    pub shortcodes: Option<ShortcodeMatcher>,
}

lazy_static! {
    /// A thread-safe, global cache for compiled matchers.
    /// The key is a hash of the `EngineConfig`.
    static ref COMPILED_MATCHERS_CACHE: RwLock<HashMap<u64, Arc<CompiledMatchers>>> = RwLock::new(HashMap::new());
}

fn hash_config(config: &EngineConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.hash(&mut hasher);
    hasher.finish()
}

fn build_regex(name: &str, pattern: &str) -> Result<Regex, DemojiError> {
    RegexBuilder::new(pattern)
        .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
        .build()
        .map_err(|e| DemojiError::MatcherCompilation(name.to_string(), e))
}

/// Compiles a list of definitions into matchers, preserving their order.
pub fn compile_definitions(definitions: Vec<MatcherDefinition>) -> Result<Vec<CompiledMatcher>, DemojiError> {
    debug!("Starting compilation of {} matchers.", definitions.len());

    let mut compiled = Vec::with_capacity(definitions.len());
    for def in definitions {
        let regex = build_regex(def.name, &def.pattern)?;
        log::debug!(
            target: "demoji_core::patterns",
            "Matcher '{}' compiled successfully.",
            def.name
        );
        compiled.push(CompiledMatcher {
            regex,
            name: def.name.to_string(),
            category: def.category,
            ambiguity_filter: def.ambiguity_filter,
        });
    }
    Ok(compiled)
}

/// Compiles the full matcher set for a configuration, bypassing the cache.
pub fn compile_matchers(config: &EngineConfig) -> Result<CompiledMatchers, DemojiError> {
    let matchers = compile_definitions(builtin_definitions())?;

    let shortcodes = if config.include_shortcodes {
        Some(ShortcodeMatcher {
            token: build_regex("shortcode", &shortcode_token_pattern(config.case_sensitive))?,
            malformed_run: build_regex("shortcode_malformed_run", &malformed_colon_run_pattern())?,
            max_length: config.max_shortcode_length,
        })
    } else {
        debug!("Shortcodes disabled; skipping shortcode matcher compilation.");
        None
    };

    Ok(CompiledMatchers { matchers, shortcodes })
}

/// Gets a `CompiledMatchers` instance from the cache or compiles it if not found.
pub fn get_or_compile_matchers(config: &EngineConfig) -> Result<Arc<CompiledMatchers>, DemojiError> {
    let cache_key = hash_config(config);

    {
        let cache = COMPILED_MATCHERS_CACHE.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(matchers) = cache.get(&cache_key) {
            debug!("Serving compiled matchers from cache for key: {}", cache_key);
            return Ok(Arc::clone(matchers));
        }
    }

    debug!("Compiled matchers not found in cache. Compiling now.");
    let compiled = Arc::new(compile_matchers(config)?);

    COMPILED_MATCHERS_CACHE
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .insert(cache_key, Arc::clone(&compiled));

    debug!("Successfully compiled and cached matchers for key: {}", cache_key);
    Ok(compiled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_configs_share_compiled_matchers() {
        let config = EngineConfig::default();
        let a = get_or_compile_matchers(&config).unwrap();
        let b = get_or_compile_matchers(&config.clone()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn disabling_shortcodes_drops_the_shortcode_matcher() {
        let config = EngineConfig { include_shortcodes: false, ..Default::default() };
        let compiled = compile_matchers(&config).unwrap();
        assert!(compiled.shortcodes.is_none());
        assert_eq!(compiled.matchers.len(), 5);
    }

    #[test]
    fn invalid_definition_reports_matcher_name() {
        let bad = MatcherDefinition {
            name: "broken",
            category: EmojiCategory::Unicode,
            pattern: "(".to_string(),
            ambiguity_filter: false,
        };
        match compile_definitions(vec![bad]) {
            Err(DemojiError::MatcherCompilation(name, _)) => assert_eq!(name, "broken"),
            other => panic!("unexpected result: {:?}", other.map(|m| m.len())),
        }
    }
}
