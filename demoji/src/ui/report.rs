// demoji/src/ui/report.rs
//! Report model for `demoji check` and its four renderings.
//!
//! * `table`: a `comfy-table` grid plus a per-category summary.
//! * `json`: a machine-readable document with per-finding fingerprints.
//! * `minimal`: one `path:line:col: <emoji> (category)` line per finding.
//! * `github`: a Markdown pull-request comment rendered with `tinytemplate`.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use tinytemplate::TinyTemplate;

use demoji_core::{canonical_finding_hash, EmojiCategory, Finding, OutputFormat};

use crate::ui::output_format::{print_error_message, print_success_message};
use crate::ui::theme::{paint, ThemeEntry, ThemeMap};

/// A finding together with its stable fingerprint.
#[derive(Debug, Clone, Serialize)]
pub struct ReportedFinding {
    #[serde(flatten)]
    pub finding: Finding,
    pub codepoints: String,
    pub fingerprint: String,
}

impl ReportedFinding {
    /// Fingerprints `finding` from the file name, category, text and its line.
    pub fn new(source_id: &str, finding: Finding, line_content: &str) -> Self {
        let fingerprint = canonical_finding_hash(source_id, finding.category, &finding.text, line_content);
        let codepoints = finding.codepoints();
        Self { finding, codepoints, fingerprint }
    }
}

/// The result of scanning one source.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub path: String,
    pub findings: Vec<ReportedFinding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileOutcome {
    /// Builds an outcome from a whole-buffer scan of `content`.
    pub fn scanned(path: &str, content: &str, findings: Vec<Finding>) -> Self {
        let lines: Vec<&str> = content.split('\n').collect();
        let findings = findings
            .into_iter()
            .map(|f| {
                let line = lines.get(f.line.saturating_sub(1)).copied().unwrap_or("");
                ReportedFinding::new(path, f, line)
            })
            .collect();
        Self { path: path.to_string(), findings, error: None }
    }

    pub fn failed(path: &str, error: impl Into<String>) -> Self {
        Self { path: path.to_string(), findings: Vec::new(), error: Some(error.into()) }
    }
}

/// Everything a `check` run found.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Text files that were scanned (including ones that failed in the engine).
    pub files_scanned: usize,
    /// Binary, non-UTF-8 and file-marker-ignored files.
    pub files_skipped: usize,
    pub outcomes: Vec<FileOutcome>,
}

impl ScanReport {
    pub fn total_findings(&self) -> usize {
        self.outcomes.iter().map(|o| o.findings.len()).sum()
    }

    pub fn files_with_findings(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.findings.is_empty()).count()
    }

    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.error.as_deref().map(|e| (o.path.as_str(), e)))
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Count per category, with every category present.
    pub fn by_category(&self) -> BTreeMap<&'static str, usize> {
        let mut counts: BTreeMap<&'static str, usize> =
            EmojiCategory::ALL.iter().map(|c| (c.as_str(), 0)).collect();
        for reported in self.outcomes.iter().flat_map(|o| &o.findings) {
            *counts.entry(reported.finding.category.as_str()).or_insert(0) += 1;
        }
        counts
    }

    fn rows(&self) -> impl Iterator<Item = (&str, &ReportedFinding)> {
        self.outcomes
            .iter()
            .flat_map(|o| o.findings.iter().map(move |f| (o.path.as_str(), f)))
    }
}

/// Options shared by every rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions<'a> {
    pub theme: &'a ThemeMap,
    pub enable_colors: bool,
    pub show_summary: bool,
}

/// Writes `report` in `format`.
pub fn write_report<W: Write>(
    report: &ScanReport,
    format: OutputFormat,
    writer: &mut W,
    opts: RenderOptions<'_>,
) -> Result<()> {
    match format {
        OutputFormat::Table => render_table(report, writer, opts),
        OutputFormat::Json => render_json(report, writer, Utc::now()),
        OutputFormat::Minimal => render_minimal(report, writer, opts),
        OutputFormat::Github => render_github(report, writer),
    }
}

pub fn render_table<W: Write>(report: &ScanReport, writer: &mut W, opts: RenderOptions<'_>) -> Result<()> {
    if report.total_findings() == 0 {
        print_success_message(
            writer,
            &format!("No emoji found in {} file(s).", report.files_scanned),
            opts.theme,
            opts.enable_colors,
        )?;
    } else {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["File", "Line", "Column", "Category", "Emoji", "Codepoints"]);
        if opts.enable_colors {
            table.enforce_styling();
        } else {
            table.force_no_tty();
        }

        for (path, reported) in report.rows() {
            let f = &reported.finding;
            table.add_row(vec![
                Cell::new(path).fg(Color::Blue),
                Cell::new(f.line),
                Cell::new(f.column_start),
                Cell::new(f.category).fg(Color::Magenta),
                Cell::new(&f.text),
                Cell::new(&reported.codepoints),
            ]);
        }
        writeln!(writer, "{}", table)?;
    }

    for (path, error) in report.errors() {
        print_error_message(writer, &format!("{}: {}", path, error), opts.theme, opts.enable_colors)?;
    }

    if opts.show_summary && report.total_findings() > 0 {
        writeln!(
            writer,
            "\n{} {} emoji in {} of {} file(s)",
            paint("Summary:", ThemeEntry::Header, opts.theme, opts.enable_colors),
            report.total_findings(),
            report.files_with_findings(),
            report.files_scanned
        )?;
        for (category, count) in report.by_category().into_iter().filter(|(_, n)| *n > 0) {
            writeln!(
                writer,
                "  {}: {}",
                paint(category, ThemeEntry::SummaryCategory, opts.theme, opts.enable_colors),
                paint(&count.to_string(), ThemeEntry::SummaryOccurrences, opts.theme, opts.enable_colors)
            )?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonError<'a> {
    path: &'a str,
    message: &'a str,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    tool_version: &'static str,
    files_scanned: usize,
    files_skipped: usize,
    total_findings: usize,
    by_category: BTreeMap<&'static str, usize>,
    files: Vec<&'a FileOutcome>,
    errors: Vec<JsonError<'a>>,
}

pub fn render_json<W: Write>(report: &ScanReport, writer: &mut W, generated_at: DateTime<Utc>) -> Result<()> {
    let doc = JsonReport {
        generated_at: generated_at.to_rfc3339(),
        tool_version: env!("CARGO_PKG_VERSION"),
        files_scanned: report.files_scanned,
        files_skipped: report.files_skipped,
        total_findings: report.total_findings(),
        by_category: report.by_category(),
        files: report.outcomes.iter().filter(|o| !o.findings.is_empty()).collect(),
        errors: report.errors().map(|(path, message)| JsonError { path, message }).collect(),
    };
    serde_json::to_writer_pretty(&mut *writer, &doc).context("Failed to serialize JSON report")?;
    writeln!(writer)?;
    Ok(())
}

pub fn render_minimal<W: Write>(report: &ScanReport, writer: &mut W, opts: RenderOptions<'_>) -> Result<()> {
    for (path, reported) in report.rows() {
        let f = &reported.finding;
        writeln!(
            writer,
            "{}:{}:{}: {} ({})",
            paint(path, ThemeEntry::Path, opts.theme, opts.enable_colors),
            f.line,
            f.column_start,
            paint(&f.text, ThemeEntry::Emoji, opts.theme, opts.enable_colors),
            f.category
        )?;
    }
    for (path, error) in report.errors() {
        writeln!(
            writer,
            "{}: {} {}",
            paint(path, ThemeEntry::Path, opts.theme, opts.enable_colors),
            paint("error:", ThemeEntry::Error, opts.theme, opts.enable_colors),
            error
        )?;
    }
    Ok(())
}

const GITHUB_TEMPLATE: &str = "### demoji report

{{ if clean }}No emoji found in {files_scanned} scanned file(s).
{{ else }}Found **{total_findings}** emoji in {files_with_findings} of {files_scanned} scanned file(s).

| File | Line | Column | Category | Emoji | Codepoints |
| --- | ---: | ---: | --- | --- | --- |
{{ for row in rows }}| `{row.path}` | {row.line} | {row.column} | {row.category} | {row.emoji} | {row.codepoints} |
{{ endfor }}{{ endif }}{{ if has_errors }}
**Errors**

{{ for err in errors }}- `{err.path}`: {err.message}
{{ endfor }}{{ endif }}";

#[derive(Serialize)]
struct GithubRow<'a> {
    path: &'a str,
    line: usize,
    column: usize,
    category: &'static str,
    emoji: &'a str,
    codepoints: &'a str,
}

#[derive(Serialize)]
struct GithubContext<'a> {
    clean: bool,
    files_scanned: usize,
    files_with_findings: usize,
    total_findings: usize,
    rows: Vec<GithubRow<'a>>,
    has_errors: bool,
    errors: Vec<JsonError<'a>>,
}

pub fn render_github<W: Write>(report: &ScanReport, writer: &mut W) -> Result<()> {
    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template("github", GITHUB_TEMPLATE)
        .context("Failed to parse GitHub comment template")?;

    let ctx = GithubContext {
        clean: report.total_findings() == 0,
        files_scanned: report.files_scanned,
        files_with_findings: report.files_with_findings(),
        total_findings: report.total_findings(),
        rows: report
            .rows()
            .map(|(path, reported)| GithubRow {
                path,
                line: reported.finding.line,
                column: reported.finding.column_start,
                category: reported.finding.category.as_str(),
                emoji: &reported.finding.text,
                codepoints: &reported.codepoints,
            })
            .collect(),
        has_errors: report.has_errors(),
        errors: report.errors().map(|(path, message)| JsonError { path, message }).collect(),
    };

    let rendered = tt
        .render("github", &ctx)
        .map_err(|e| anyhow!("Failed to render GitHub comment: {}", e))?;
    write!(writer, "{}", rendered)?;
    Ok(())
}
