//! `demoji init`: write the default configuration document.

use anyhow::{bail, Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use demoji_core::config::LOCAL_CONFIG_FILENAME;
use demoji_core::DemojiConfig;

/// Writes `.demoji.json` into `dir`, refusing to replace an existing file without `force`.
pub fn write_default_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(LOCAL_CONFIG_FILENAME);
    if path.exists() && !force {
        bail!("{} already exists; use --force to overwrite it", path.display());
    }
    let mut json = DemojiConfig::default().to_pretty_json()?;
    json.push('\n');
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote default configuration to {}", path.display());
    Ok(path)
}
