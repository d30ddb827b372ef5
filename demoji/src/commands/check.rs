//! `demoji check`: scan inputs and report every emoji without modifying anything.

use anyhow::Result;
use log::{debug, info, warn};
use std::io::{self, Write};

use demoji_core::{DetectionEngine, OutputFormat};

use crate::cli::CheckCommand;
use crate::commands::{Outcome, RunContext};
use crate::ui::report::{write_report, FileOutcome, RenderOptions, ScanReport};
use crate::walker::{collect_sources, SourceContent, SourceFile};

/// Scans every source and accumulates the report. Per-file failures are
/// recorded in the report and never stop the run.
pub fn build_report(ctx: &RunContext, sources: &[SourceFile]) -> Result<ScanReport> {
    let mut report = ScanReport::default();

    for source in sources {
        let content = match &source.content {
            SourceContent::Text(content) => content,
            SourceContent::Binary => {
                report.files_skipped += 1;
                continue;
            }
            SourceContent::NotUtf8 => {
                ctx.warn_msg(format!("{}: not valid UTF-8 text; skipped.", source.display_path));
                report.files_skipped += 1;
                continue;
            }
            SourceContent::Unreadable(error) => {
                report.outcomes.push(FileOutcome::failed(&source.display_path, error.clone()));
                continue;
            }
        };

        if ctx.policy.is_file_ignored(content) {
            debug!("{} carries the file ignore marker; skipping.", source.display_path);
            report.files_skipped += 1;
            continue;
        }

        report.files_scanned += 1;
        match ctx.engine.find_emojis(content, None) {
            Ok(findings) => {
                let findings = ctx.policy.filter_findings(content, findings);
                debug!("{}: {} finding(s).", source.display_path, findings.len());
                report.outcomes.push(FileOutcome::scanned(&source.display_path, content, findings));
            }
            Err(e) if e.is_per_input() => {
                warn!("{}: {}", source.display_path, e);
                report.outcomes.push(FileOutcome::failed(&source.display_path, e.to_string()));
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(report)
}

/// Exit outcome for a finished report.
pub fn outcome_for(report: &ScanReport, exit_zero: bool) -> Outcome {
    if report.has_errors() {
        Outcome::Failed
    } else if report.total_findings() > 0 && !exit_zero {
        Outcome::Findings
    } else {
        Outcome::Clean
    }
}

pub fn run_check(ctx: &RunContext, cmd: &CheckCommand) -> Result<Outcome> {
    info!("Starting demoji check over {} path(s).", cmd.paths.len());
    let sources = collect_sources(&cmd.paths, &ctx.policy)?;
    let report = build_report(ctx, &sources)?;

    let format = cmd.format.map(OutputFormat::from).unwrap_or(ctx.config.output.format);
    let opts = RenderOptions {
        theme: ctx.theme,
        enable_colors: ctx.colors.stdout,
        show_summary: ctx.config.output.show_summary && !cmd.no_summary,
    };

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    write_report(&report, format, &mut writer, opts)?;
    writer.flush()?;

    info!(
        "Check complete: {} finding(s) in {} file(s), {} skipped.",
        report.total_findings(),
        report.files_scanned,
        report.files_skipped
    );
    Ok(outcome_for(&report, cmd.exit_zero))
}
