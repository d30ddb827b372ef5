// demoji/src/ui/diff_viewer.rs
//! Unified diff output for `demoji fix --diff`.
//!
//! Renders the change between a file's original and cleaned content as a
//! unified diff, coloring removed lines red and added lines green.

use diffy::{create_patch, Line as DiffLine};
use std::io::{self, Write};

use crate::ui::theme::{paint, ThemeEntry, ThemeMap};

/// Writes a unified diff of `original` -> `cleaned` for `path`, or nothing if equal.
pub fn print_diff<W: Write>(
    path: &str,
    original: &str,
    cleaned: &str,
    writer: &mut W,
    theme_map: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    if original == cleaned {
        return Ok(());
    }
    let patch = create_patch(original, cleaned);

    writeln!(writer, "{}", paint(&format!("--- a/{}", path), ThemeEntry::DiffHeader, theme_map, enable_colors))?;
    writeln!(writer, "{}", paint(&format!("+++ b/{}", path), ThemeEntry::DiffHeader, theme_map, enable_colors))?;

    for hunk in patch.hunks() {
        let header = format!(
            "@@ -{},{} +{},{} @@",
            hunk.old_range().start(),
            hunk.old_range().len(),
            hunk.new_range().start(),
            hunk.new_range().len()
        );
        writeln!(writer, "{}", paint(&header, ThemeEntry::DiffHeader, theme_map, enable_colors))?;

        for line_change in hunk.lines() {
            let (prefix, text, entry) = match line_change {
                DiffLine::Delete(s) => ("-", *s, Some(ThemeEntry::DiffRemoved)),
                DiffLine::Insert(s) => ("+", *s, Some(ThemeEntry::DiffAdded)),
                DiffLine::Context(s) => (" ", *s, None),
            };
            let body = text.strip_suffix('\n').unwrap_or(text);
            let rendered = format!("{}{}", prefix, body);
            match entry {
                Some(entry) => writeln!(writer, "{}", paint(&rendered, entry, theme_map, enable_colors))?,
                None => writeln!(writer, "{}", rendered)?,
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::default_theme_map;

    #[test]
    fn diff_marks_removed_and_added_lines() {
        let mut out = Vec::new();
        print_diff("a.txt", "keep\nship 🚀\n", "keep\nship \n", &mut out, &default_theme_map(), false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("--- a/a.txt\n+++ b/a.txt\n@@ "));
        assert!(text.contains("-ship 🚀\n"));
        assert!(text.contains("+ship \n"));
        assert!(text.contains(" keep\n"));
    }

    #[test]
    fn identical_content_prints_nothing() {
        let mut out = Vec::new();
        print_diff("a.txt", "same", "same", &mut out, &default_theme_map(), false).unwrap();
        assert!(out.is_empty());
    }
}
