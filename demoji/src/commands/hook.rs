//! `demoji hook install|uninstall`: manage the git pre-commit hook.
//!
//! The installed script runs `demoji check` on the files staged for commit
//! and blocks the commit when emoji are found. A hook that demoji did not
//! write is never replaced or removed without `--force`.

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Line that identifies a hook written by demoji.
pub const HOOK_MARKER: &str = "# demoji-managed-hook";

#[derive(Debug, Error)]
pub enum HookError {
    #[error("Not inside a git repository (no .git found above {0})")]
    NotAGitRepository(PathBuf),
    #[error("A pre-commit hook that demoji did not install exists at {0}; use --force to replace it")]
    ForeignHook(PathBuf),
}

/// What an install or uninstall did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookAction {
    Installed(PathBuf),
    Updated(PathBuf),
    Removed(PathBuf),
    NotInstalled,
}

/// The pre-commit script body.
pub fn hook_script() -> String {
    format!(
        "#!/bin/sh\n\
         {marker}\n\
         # Blocks commits that add emoji. Remove with `demoji hook uninstall`.\n\
         git diff --cached --name-only -z --diff-filter=ACM \\\n  \
         | xargs -0 sh -c '[ \"$#\" -eq 0 ] || exec \"${{DEMOJI_BIN:-demoji}}\" check --format minimal -- \"$@\"' demoji\n",
        marker = HOOK_MARKER
    )
}

/// Resolves the git directory for `start`, following `.git` files used by worktrees.
pub fn find_git_dir(start: &Path) -> Result<PathBuf> {
    for dir in start.ancestors() {
        let candidate = dir.join(".git");
        if candidate.is_dir() {
            return Ok(candidate);
        }
        if candidate.is_file() {
            let text = fs::read_to_string(&candidate)
                .with_context(|| format!("Failed to read {}", candidate.display()))?;
            if let Some(target) = text.lines().find_map(|l| l.strip_prefix("gitdir:")) {
                let target = PathBuf::from(target.trim());
                return Ok(if target.is_absolute() { target } else { dir.join(target) });
            }
        }
    }
    Err(HookError::NotAGitRepository(start.to_path_buf()).into())
}

fn hook_path(repo_root: &Path) -> Result<PathBuf> {
    Ok(find_git_dir(repo_root)?.join("hooks").join("pre-commit"))
}

fn is_demoji_hook(path: &Path) -> Result<bool> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(text.lines().any(|l| l.trim() == HOOK_MARKER))
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("Failed to mark {} executable", path.display()))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

pub fn install_hook(repo_root: &Path, force: bool) -> Result<HookAction> {
    let path = hook_path(repo_root)?;
    let existed = path.exists();
    if existed && !is_demoji_hook(&path)? && !force {
        return Err(HookError::ForeignHook(path).into());
    }

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    fs::write(&path, hook_script()).with_context(|| format!("Failed to write {}", path.display()))?;
    make_executable(&path)?;
    info!("Pre-commit hook written to {}", path.display());

    Ok(if existed { HookAction::Updated(path) } else { HookAction::Installed(path) })
}

pub fn uninstall_hook(repo_root: &Path, force: bool) -> Result<HookAction> {
    let path = hook_path(repo_root)?;
    if !path.exists() {
        debug!("No pre-commit hook at {}", path.display());
        return Ok(HookAction::NotInstalled);
    }
    if !is_demoji_hook(&path)? && !force {
        return Err(HookError::ForeignHook(path).into());
    }
    fs::remove_file(&path).with_context(|| format!("Failed to remove {}", path.display()))?;
    info!("Removed pre-commit hook {}", path.display());
    Ok(HookAction::Removed(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn install_then_uninstall() -> Result<()> {
        let repo = tempdir()?;
        fs::create_dir(repo.path().join(".git"))?;

        let action = install_hook(repo.path(), false)?;
        let hook = repo.path().join(".git/hooks/pre-commit");
        assert_eq!(action, HookAction::Installed(hook.clone()));
        assert!(fs::read_to_string(&hook)?.contains(HOOK_MARKER));

        assert_eq!(install_hook(repo.path(), false)?, HookAction::Updated(hook.clone()));
        assert_eq!(uninstall_hook(repo.path(), false)?, HookAction::Removed(hook.clone()));
        assert!(!hook.exists());
        assert_eq!(uninstall_hook(repo.path(), false)?, HookAction::NotInstalled);
        Ok(())
    }

    #[test]
    fn foreign_hook_needs_force() -> Result<()> {
        let repo = tempdir()?;
        let hooks = repo.path().join(".git/hooks");
        fs::create_dir_all(&hooks)?;
        fs::write(hooks.join("pre-commit"), "#!/bin/sh\nexit 0\n")?;

        let err = install_hook(repo.path(), false).unwrap_err();
        assert!(matches!(err.downcast_ref::<HookError>(), Some(HookError::ForeignHook(_))));
        assert!(uninstall_hook(repo.path(), false).is_err());

        install_hook(repo.path(), true)?;
        assert!(is_demoji_hook(&hooks.join("pre-commit"))?);
        Ok(())
    }

    #[test]
    fn worktree_git_file_is_followed() -> Result<()> {
        let repo = tempdir()?;
        let real = repo.path().join("real-git-dir");
        fs::create_dir_all(&real)?;
        fs::write(repo.path().join(".git"), format!("gitdir: {}\n", real.display()))?;
        assert_eq!(find_git_dir(repo.path())?, real);
        Ok(())
    }

    #[test]
    fn script_runs_check_on_staged_files() {
        let script = hook_script();
        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(script.contains("git diff --cached --name-only -z"));
        assert!(script.contains("check --format minimal --"));
    }
}
