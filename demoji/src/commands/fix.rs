//! `demoji fix`: remove emoji from files in place.
//!
//! Every other character, including whitespace and line endings, is kept
//! exactly. Stdin input is cleaned to stdout instead of being written back.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs;
use std::io::{self, Write};

use demoji_core::{remove_findings, DetectionEngine};

use crate::cli::FixCommand;
use crate::commands::{Outcome, RunContext};
use crate::ui::diff_viewer;
use crate::walker::{collect_sources, SourceContent, SourceFile};

/// Totals for one `fix` run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FixSummary {
    pub files_changed: usize,
    pub emoji_removed: usize,
    pub failures: usize,
}

/// The cleaned text of one source and how many emoji it lost.
fn clean_source(ctx: &RunContext, content: &str) -> Result<(String, usize)> {
    let findings = ctx.engine.find_emojis(content, None)?;
    let kept = ctx.policy.filter_findings(content, findings);
    Ok((remove_findings(content, &kept), kept.len()))
}

fn fix_stdin<W: Write>(ctx: &RunContext, cmd: &FixCommand, source: &SourceFile, writer: &mut W) -> Result<bool> {
    let SourceContent::Text(content) = &source.content else {
        ctx.error_msg("stdin is not UTF-8 text; nothing was written.");
        return Ok(false);
    };
    let cleaned = ctx.policy.apply_removal(&ctx.engine, content)?;
    if cmd.diff {
        diff_viewer::print_diff(&source.display_path, content, &cleaned, writer, ctx.theme, ctx.colors.stdout)?;
    } else {
        write!(writer, "{}", cleaned)?;
    }
    Ok(true)
}

pub fn run_fix(ctx: &RunContext, cmd: &FixCommand) -> Result<Outcome> {
    info!("Starting demoji fix over {} path(s){}.", cmd.paths.len(), if cmd.dry_run { " (dry run)" } else { "" });
    let sources = collect_sources(&cmd.paths, &ctx.policy)?;
    let stdout = io::stdout();
    let mut writer = stdout.lock();
    let mut summary = FixSummary::default();

    for source in &sources {
        if source.is_stdin() {
            if !fix_stdin(ctx, cmd, source, &mut writer)? {
                summary.failures += 1;
            }
            continue;
        }

        let content = match &source.content {
            SourceContent::Text(content) => content,
            SourceContent::Binary => continue,
            SourceContent::NotUtf8 => {
                ctx.warn_msg(format!("{}: not valid UTF-8 text; left unchanged.", source.display_path));
                continue;
            }
            SourceContent::Unreadable(error) => {
                ctx.error_msg(format!("{}: {}", source.display_path, error));
                summary.failures += 1;
                continue;
            }
        };
        if ctx.policy.is_file_ignored(content) {
            debug!("{} carries the file ignore marker; skipping.", source.display_path);
            continue;
        }

        let (cleaned, removed) = match clean_source(ctx, content) {
            Ok(result) => result,
            Err(e) => {
                warn!("{}: {}", source.display_path, e);
                ctx.error_msg(format!("{}: {}", source.display_path, e));
                summary.failures += 1;
                continue;
            }
        };
        if removed == 0 {
            continue;
        }

        if cmd.diff {
            diff_viewer::print_diff(&source.display_path, content, &cleaned, &mut writer, ctx.theme, ctx.colors.stdout)?;
        }
        if cmd.dry_run {
            ctx.info_msg(format!("Would remove {} emoji from {}", removed, source.display_path));
        } else if let Some(path) = &source.path {
            fs::write(path, &cleaned).with_context(|| format!("Failed to write {}", path.display()))?;
            ctx.info_msg(format!("Removed {} emoji from {}", removed, source.display_path));
        }
        summary.files_changed += 1;
        summary.emoji_removed += removed;
    }
    writer.flush()?;

    let verb = if cmd.dry_run { "Would remove" } else { "Removed" };
    if summary.files_changed > 0 {
        ctx.success_msg(format!("{} {} emoji in {} file(s).", verb, summary.emoji_removed, summary.files_changed));
    }
    info!("Fix complete: {:?}", summary);

    Ok(if summary.failures > 0 {
        Outcome::Failed
    } else if cmd.dry_run && summary.files_changed > 0 {
        Outcome::Findings
    } else {
        Outcome::Clean
    })
}
