// demoji/src/walker.rs
//! Collects the inputs of a run: files named on the command line, files
//! found by walking directories, and stdin.
//!
//! Directories are walked in file-name order so reports are stable between
//! runs. Ignored directories are pruned rather than filtered, and every file
//! is classified as text, binary or non-UTF-8 before any scanning happens.

use anyhow::{bail, Context, Result};
use log::{debug, warn};
use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use demoji_core::{decode_text, DemojiError, IgnorePolicy};

/// How much of a file is inspected for NUL bytes.
pub const BINARY_SNIFF_LEN: usize = 8 * 1024;
/// The path argument that means "read stdin".
pub const STDIN_ARG: &str = "-";
/// How stdin is named in reports.
pub const STDIN_DISPLAY: &str = "<stdin>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceContent {
    Text(String),
    Binary,
    NotUtf8,
    Unreadable(String),
}

/// One input of a run.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Location on disk; `None` for stdin.
    pub path: Option<PathBuf>,
    /// `/`-separated name used in reports.
    pub display_path: String,
    pub content: SourceContent,
}

impl SourceFile {
    pub fn is_text(&self) -> bool {
        matches!(self.content, SourceContent::Text(_))
    }

    pub fn is_stdin(&self) -> bool {
        self.path.is_none()
    }
}

/// Classifies raw file bytes.
///
/// A NUL in the first [`BINARY_SNIFF_LEN`] bytes marks a binary file without
/// decoding. Past that window, `decode_text` decides.
pub fn classify_bytes(bytes: &[u8]) -> SourceContent {
    let sniff = &bytes[..bytes.len().min(BINARY_SNIFF_LEN)];
    if sniff.contains(&0) {
        return SourceContent::Binary;
    }
    match decode_text(bytes) {
        Ok(text) => SourceContent::Text(text.to_string()),
        Err(DemojiError::InvalidInput(reason)) => {
            debug!("Not scannable as text: {}", reason);
            if std::str::from_utf8(bytes).is_ok() {
                SourceContent::Binary
            } else {
                SourceContent::NotUtf8
            }
        }
        Err(e) => SourceContent::Unreadable(e.to_string()),
    }
}

fn display_path(path: &Path) -> String {
    let shown = path.to_string_lossy().replace('\\', "/");
    shown.strip_prefix("./").map(str::to_string).unwrap_or(shown)
}

fn read_source(path: &Path) -> SourceFile {
    let display_path = display_path(path);
    let content = match fs::read(path) {
        Ok(bytes) => classify_bytes(&bytes),
        Err(e) => SourceContent::Unreadable(format!("Failed to read file: {}", e)),
    };
    match &content {
        SourceContent::Binary => debug!("Skipping binary file: {}", display_path),
        SourceContent::NotUtf8 => debug!("Skipping file that is not valid UTF-8: {}", display_path),
        SourceContent::Unreadable(e) => warn!("{}: {}", display_path, e),
        SourceContent::Text(_) => {}
    }
    SourceFile { path: Some(path.to_path_buf()), display_path, content }
}

/// Reads all of stdin as one source.
pub fn read_stdin() -> Result<SourceFile> {
    let mut bytes = Vec::new();
    std::io::stdin().read_to_end(&mut bytes).context("Failed to read from stdin")?;
    Ok(SourceFile {
        path: None,
        display_path: STDIN_DISPLAY.to_string(),
        content: classify_bytes(&bytes),
    })
}

fn is_ignored(policy: &IgnorePolicy, root: &Path, path: &Path, is_dir: bool) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    policy.is_path_ignored(relative, is_dir) || policy.is_path_ignored(path, is_dir)
}

/// Expands the command-line paths into sources, in argument order.
///
/// Explicit files are checked against the ignore patterns too, so a hook
/// passing staged files honors the same exclusions as a directory walk.
pub fn collect_sources(roots: &[PathBuf], policy: &IgnorePolicy) -> Result<Vec<SourceFile>> {
    let mut sources = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for root in roots {
        if root.as_os_str() == STDIN_ARG {
            sources.push(read_stdin()?);
            continue;
        }
        if !root.exists() {
            bail!("Path does not exist: {}", root.display());
        }

        if root.is_file() {
            if policy.is_path_ignored(root, false) {
                debug!("Skipping ignored file: {}", root.display());
                continue;
            }
            if seen.insert(root.clone()) {
                sources.push(read_source(root));
            }
            continue;
        }

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0 || !is_ignored(policy, root, entry.path(), entry.file_type().is_dir())
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
                    warn!("Failed to walk {}: {}", path.display(), e);
                    sources.push(SourceFile {
                        display_path: display_path(&path),
                        path: Some(path),
                        content: SourceContent::Unreadable(e.to_string()),
                    });
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.into_path();
            if seen.insert(path.clone()) {
                sources.push(read_source(&path));
            }
        }
    }

    debug!("Collected {} source(s) from {} path argument(s).", sources.len(), roots.len());
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use demoji_core::IgnoreConfig;
    use tempfile::tempdir;

    fn names(sources: &[SourceFile], root: &Path) -> Vec<String> {
        sources
            .iter()
            .map(|s| {
                let path = s.path.as_ref().unwrap();
                display_path(path.strip_prefix(root).unwrap())
            })
            .collect()
    }

    #[test]
    fn classify_detects_binary_and_invalid_utf8() {
        assert_eq!(classify_bytes(b"ok"), SourceContent::Text("ok".to_string()));
        assert_eq!(classify_bytes(&[b'a', 0, b'b']), SourceContent::Binary);
        assert_eq!(classify_bytes(&[0xff, 0xfe, b'a']), SourceContent::NotUtf8);
    }

    #[test_log::test]
    fn nul_past_the_sniff_window_is_still_binary() {
        let mut bytes = vec![b'a'; BINARY_SNIFF_LEN + 808];
        bytes.push(0);
        bytes.extend_from_slice("🚀".as_bytes());
        assert_eq!(classify_bytes(&bytes), SourceContent::Binary);
    }

    #[test]
    fn walk_is_sorted_and_prunes_ignored_directories() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path();
        fs::create_dir_all(root.join("src"))?;
        fs::create_dir_all(root.join("target/debug"))?;
        fs::write(root.join("src/b.rs"), "b")?;
        fs::write(root.join("src/a.rs"), "a 🚀")?;
        fs::write(root.join("target/debug/out.txt"), "🚀")?;
        fs::write(root.join("README.md"), "# hi")?;

        let policy = IgnorePolicy::new(&IgnoreConfig::default())?;
        let sources = collect_sources(&[root.to_path_buf()], &policy)?;
        assert_eq!(names(&sources, root), vec!["README.md", "src/a.rs", "src/b.rs"]);
        assert!(sources.iter().all(SourceFile::is_text));
        Ok(())
    }

    #[test]
    fn missing_path_is_an_error() {
        let policy = IgnorePolicy::new(&IgnoreConfig::default()).unwrap();
        assert!(collect_sources(&[PathBuf::from("/no/such/demoji/path")], &policy).is_err());
    }

    #[test]
    fn display_path_drops_leading_dot() {
        assert_eq!(display_path(Path::new("./src/main.rs")), "src/main.rs");
        assert_eq!(display_path(Path::new("src/main.rs")), "src/main.rs");
    }
}
