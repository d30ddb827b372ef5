//! policy.rs - Caller-side ignore rules applied around the engine.
//!
//! The engine reports every finding unconditionally. This module is where
//! callers drop what the configuration says to leave alone: ignore-listed
//! emoji, lines carrying the ignore marker, files carrying the file marker,
//! and paths matching glob patterns.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::debug;
use regex::Regex;
use std::collections::HashSet;
use std::path::{Component, Path};

use crate::config::IgnoreConfig;
use crate::engine::DetectionEngine;
use crate::errors::DemojiError;
use crate::finding::{remove_findings, Finding};

/// Translates a path glob into an anchored regular expression.
///
/// `**` crosses directory separators, `*` and `?` do not. A pattern without
/// a `/` matches the final components at any depth, so `*.md` covers `docs/a.md`.
pub fn glob_to_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let trimmed = pattern.trim_start_matches("./").trim_start_matches('/');
    let mut out = String::from("^");
    if !trimmed.contains('/') {
        out.push_str("(?:.*/)?");
    }

    let chars: Vec<char> = trimmed.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' if chars.get(i + 1) == Some(&'*') => {
                if chars.get(i + 2) == Some(&'/') {
                    out.push_str("(?:.*/)?");
                    i += 3;
                } else {
                    out.push_str(".*");
                    i += 2;
                }
            }
            '*' => {
                out.push_str("[^/]*");
                i += 1;
            }
            '?' => {
                out.push_str("[^/]");
                i += 1;
            }
            c => {
                out.push_str(&regex::escape(&c.to_string()));
                i += 1;
            }
        }
    }
    out.push('$');
    Regex::new(&out)
}

/// `/`-separated form of a relative path, without `.` components.
fn normalize_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Compiled form of an `IgnoreConfig`.
#[derive(Debug)]
pub struct IgnorePolicy {
    emojis: HashSet<String>,
    path_patterns: Vec<(String, Regex)>,
    line_marker: String,
    file_marker: String,
}

impl IgnorePolicy {
    pub fn new(config: &IgnoreConfig) -> Result<Self> {
        let path_patterns = config
            .paths
            .iter()
            .map(|p| {
                glob_to_regex(p)
                    .map(|re| (p.clone(), re))
                    .with_context(|| format!("Invalid ignore path pattern '{}'", p))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            emojis: config.emojis.iter().cloned().collect(),
            path_patterns,
            line_marker: config.line_marker.clone(),
            file_marker: config.file_marker.clone(),
        })
    }

    /// True if `relative` (or, for a directory, anything beneath it) is excluded.
    pub fn is_path_ignored(&self, relative: &Path, is_dir: bool) -> bool {
        let normalized = normalize_path(relative);
        if normalized.is_empty() {
            return false;
        }
        let as_dir = format!("{}/", normalized);
        let hit = self.path_patterns.iter().find(|(_, re)| {
            re.is_match(&normalized) || (is_dir && re.is_match(&as_dir))
        });
        if let Some((pattern, _)) = hit {
            debug!("Path '{}' ignored by pattern '{}'.", normalized, pattern);
            return true;
        }
        false
    }

    pub fn is_file_ignored(&self, content: &str) -> bool {
        content.contains(&self.file_marker)
    }

    pub fn is_emoji_ignored(&self, text: &str) -> bool {
        self.emojis.contains(text)
    }

    /// Drops ignore-listed findings and findings on marked lines.
    ///
    /// `findings` must come from a whole-buffer scan of `content` (`base_line = None`).
    pub fn filter_findings(&self, content: &str, findings: Vec<Finding>) -> Vec<Finding> {
        let marked_lines: HashSet<usize> = content
            .split('\n')
            .enumerate()
            .filter(|(_, line)| line.contains(&self.line_marker))
            .map(|(idx, _)| idx + 1)
            .collect();

        let before = findings.len();
        let kept: Vec<Finding> = findings
            .into_iter()
            .filter(|f| !self.is_emoji_ignored(&f.text) && !marked_lines.contains(&f.line))
            .collect();
        if kept.len() != before {
            debug!("Ignore policy dropped {} of {} findings.", before - kept.len(), before);
        }
        kept
    }

    /// Removes emoji from `content` except where this policy says to keep them.
    pub fn apply_removal(&self, engine: &dyn DetectionEngine, content: &str) -> Result<String, DemojiError> {
        if self.is_file_ignored(content) {
            return Ok(content.to_string());
        }
        if self.emojis.is_empty() && !content.contains(&self.line_marker) {
            return engine.remove_emojis(content);
        }
        let findings = self.filter_findings(content, engine.find_emojis(content, None)?);
        Ok(remove_findings(content, &findings))
    }
}
