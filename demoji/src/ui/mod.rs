//! Terminal output: theme, status messages, diffs and check reports.

pub mod diff_viewer;
pub mod output_format;
pub mod report;
pub mod theme;
