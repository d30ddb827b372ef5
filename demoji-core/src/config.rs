//! Configuration management for `demoji-core`.
//!
//! This module defines the configuration consumed read-only by the engine
//! (`EngineConfig`) and the full persisted document (`DemojiConfig`) that the
//! CLI layer loads once at startup. It handles JSON deserialization with
//! field-by-field defaults, discovery of the config file, merging and validation.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::policy::glob_to_regex;

/// Default upper bound on the number of characters a single engine call accepts.
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 1_000_000;
/// Default upper bound on the content length of a `:shortcode:`.
pub const DEFAULT_MAX_SHORTCODE_LENGTH: usize = 50;
/// File name looked up in the working directory when no `--config` is given.
pub const LOCAL_CONFIG_FILENAME: &str = ".demoji.json";

/// Settings that shape classification. Immutable once an engine is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Whether `:name:` tokens are reported alongside Unicode emoji.
    pub include_shortcodes: bool,
    /// Inputs longer than this many characters are refused with `LengthExceeded`.
    pub max_text_length: usize,
    /// Longest accepted shortcode content (the part between the colons).
    pub max_shortcode_length: usize,
    /// If true, shortcode letters must be lowercase; if false, mixed case is accepted.
    pub case_sensitive: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            include_shortcodes: true,
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
            max_shortcode_length: DEFAULT_MAX_SHORTCODE_LENGTH,
            case_sensitive: true,
        }
    }
}

impl EngineConfig {
    /// Checks the numeric bounds the engine relies on.
    pub fn validate(&self) -> Result<(), crate::errors::DemojiError> {
        use crate::errors::DemojiError;
        if self.max_text_length == 0 {
            return Err(DemojiError::InvalidConfig("`max_text_length` must be greater than 0".into()));
        }
        if self.max_shortcode_length == 0 {
            return Err(DemojiError::InvalidConfig("`max_shortcode_length` must be greater than 0".into()));
        }
        if self.max_shortcode_length > self.max_text_length {
            return Err(DemojiError::InvalidConfig(format!(
                "`max_shortcode_length` ({}) cannot exceed `max_text_length` ({})",
                self.max_shortcode_length, self.max_text_length
            )));
        }
        Ok(())
    }
}

/// Caller-side filtering rules. The engine never sees these.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct IgnoreConfig {
    /// Exact emoji texts that are never reported or removed.
    pub emojis: Vec<String>,
    /// Glob patterns of paths to skip, relative to the scan root.
    pub paths: Vec<String>,
    /// A line containing this token is left alone.
    pub line_marker: String,
    /// A file containing this token is skipped entirely.
    pub file_marker: String,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            emojis: Vec::new(),
            paths: vec![
                ".git/**".to_string(),
                "target/**".to_string(),
                "node_modules/**".to_string(),
            ],
            line_marker: "demoji-ignore".to_string(),
            file_marker: "demoji-ignore-file".to_string(),
        }
    }
}

/// Report layout selected for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Minimal,
    Github,
}

/// When to colorize terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color: ColorChoice,
    /// Print the per-category summary after the findings.
    pub show_summary: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            color: ColorChoice::Auto,
            show_summary: true,
        }
    }
}

/// Represents the top-level persisted configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DemojiConfig {
    pub engine: EngineConfig,
    pub ignore: IgnoreConfig,
    pub output: OutputConfig,
}

impl DemojiConfig {
    /// Loads a configuration document from a JSON file. Missing keys take their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_json_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!(
            "Loaded config from {}: {} ignored emojis, {} ignored path patterns.",
            path.display(),
            config.ignore.emojis.len(),
            config.ignore.paths.len()
        );
        Ok(config)
    }

    /// Parses and validates a configuration document held in memory.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: DemojiConfig = serde_json::from_str(text).context("Invalid configuration JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Resolves the configuration to use for a run.
    ///
    /// An explicit path must exist. Otherwise the first existing file among
    /// [`config_candidate_paths`] is loaded, and if none exists the defaults are used.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let user = Self::load_from_file(path)?;
            return Ok(merge_config(DemojiConfig::default(), Some(user)));
        }

        match config_candidate_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => {
                debug!("Discovered configuration file at {}", path.display());
                let user = Self::load_from_file(&path)?;
                Ok(merge_config(DemojiConfig::default(), Some(user)))
            }
            None => {
                debug!("No configuration file found. Using built-in defaults.");
                Ok(DemojiConfig::default())
            }
        }
    }

    /// Validates the whole document, collecting every problem into one error.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if let Err(e) = self.engine.validate() {
            errors.push(e.to_string());
        }
        if self.ignore.line_marker.trim().is_empty() {
            errors.push("`ignore.line_marker` cannot be empty.".to_string());
        }
        if self.ignore.file_marker.trim().is_empty() {
            errors.push("`ignore.file_marker` cannot be empty.".to_string());
        }
        for pattern in &self.ignore.paths {
            if let Err(e) = glob_to_regex(pattern) {
                errors.push(format!("Ignore pattern '{}' is invalid: {}", pattern, e));
            }
        }
        if self.ignore.emojis.iter().any(|e| e.is_empty()) {
            errors.push("`ignore.emojis` contains an empty entry.".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("Configuration validation failed:\n{}", errors.join("\n")))
        }
    }

    /// Serializes the document the way `demoji init` writes it.
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

/// Locations searched, in order, when no explicit config path is supplied.
pub fn config_candidate_paths() -> Vec<PathBuf> {
    let candidates = vec![
        Some(PathBuf::from(LOCAL_CONFIG_FILENAME)),
        dirs::config_dir().map(|p| p.join("demoji").join("config.json")),
        dirs::home_dir().map(|p| p.join(LOCAL_CONFIG_FILENAME)),
    ];
    candidates.into_iter().flatten().collect()
}

/// Merges a user document over the defaults.
///
/// Scalar settings come from the user document. Ignore lists are unioned so
/// a user file extends, rather than replaces, the built-in path exclusions.
pub fn merge_config(default_config: DemojiConfig, user_config: Option<DemojiConfig>) -> DemojiConfig {
    let Some(user) = user_config else {
        return default_config;
    };
    debug!("Merging user configuration over defaults.");

    let merge_lists = |base: Vec<String>, extra: Vec<String>| -> Vec<String> {
        let mut seen = HashSet::new();
        base.into_iter()
            .chain(extra)
            .filter(|item| seen.insert(item.clone()))
            .collect()
    };

    DemojiConfig {
        engine: user.engine,
        ignore: IgnoreConfig {
            emojis: merge_lists(default_config.ignore.emojis, user.ignore.emojis),
            paths: merge_lists(default_config.ignore.paths, user.ignore.paths),
            line_marker: user.ignore.line_marker,
            file_marker: user.ignore.file_marker,
        },
        output: user.output,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_defaults_match_documented_values() {
        let cfg = EngineConfig::default();
        assert!(cfg.include_shortcodes);
        assert_eq!(cfg.max_text_length, 1_000_000);
        assert_eq!(cfg.max_shortcode_length, 50);
        assert!(cfg.case_sensitive);
    }

    #[test]
    fn partial_document_fills_missing_fields() {
        let cfg = DemojiConfig::from_json_str(r#"{ "engine": { "include_shortcodes": false } }"#).unwrap();
        assert!(!cfg.engine.include_shortcodes);
        assert_eq!(cfg.engine.max_shortcode_length, DEFAULT_MAX_SHORTCODE_LENGTH);
        assert_eq!(cfg.ignore.line_marker, "demoji-ignore");
        assert_eq!(cfg.output.format, OutputFormat::Table);
    }

    #[test]
    fn zero_text_length_is_rejected() {
        let err = DemojiConfig::from_json_str(r#"{ "engine": { "max_text_length": 0 } }"#).unwrap_err();
        assert!(format!("{:#}", err).contains("max_text_length"));
    }

    #[test]
    fn shortcode_length_above_text_length_is_rejected() {
        let cfg = EngineConfig { max_text_length: 10, max_shortcode_length: 20, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn merge_unions_ignore_lists() {
        let mut user = DemojiConfig::default();
        user.ignore.paths = vec!["docs/**".to_string(), "target/**".to_string()];
        user.ignore.emojis = vec!["✅".to_string()];
        user.engine.case_sensitive = false;

        let merged = merge_config(DemojiConfig::default(), Some(user));
        assert_eq!(merged.ignore.paths, vec![".git/**", "target/**", "node_modules/**", "docs/**"]);
        assert_eq!(merged.ignore.emojis, vec!["✅"]);
        assert!(!merged.engine.case_sensitive);
    }

    #[test]
    fn output_format_uses_snake_case() {
        let cfg = DemojiConfig::from_json_str(r#"{ "output": { "format": "github", "color": "never" } }"#).unwrap();
        assert_eq!(cfg.output.format, OutputFormat::Github);
        assert_eq!(cfg.output.color, ColorChoice::Never);
    }
}
