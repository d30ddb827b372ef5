//! Converts offsets into line and column positions.
//!
//! Regex matches report byte offsets; findings report character offsets and
//! 1-based line/column numbers. `CharIndexMapper` bridges the first gap and
//! `PositionResolver` the second.

use std::cmp::Ordering;

/// Maps byte offsets in a string to character offsets.
#[derive(Debug)]
pub struct CharIndexMapper {
    /// Byte index of every character, followed by the total byte length.
    char_starts: Vec<usize>,
}

impl CharIndexMapper {
    pub fn new(text: &str) -> Self {
        let mut char_starts: Vec<usize> = Vec::with_capacity(text.len() + 1);
        char_starts.extend(text.char_indices().map(|(i, _)| i));
        char_starts.push(text.len());
        Self { char_starts }
    }

    /// Number of characters in the mapped text.
    pub fn char_len(&self) -> usize {
        self.char_starts.len() - 1
    }

    /// Character offset of a byte offset that lies on a character boundary.
    pub fn char_offset(&self, byte_offset: usize) -> usize {
        match self.char_starts.binary_search(&byte_offset) {
            Ok(idx) => idx,
            // Inside a character: round down to the character containing it.
            Err(idx) => idx.saturating_sub(1),
        }
    }
}

/// Resolves character offsets to 1-based `(line, column)` pairs.
#[derive(Debug)]
pub enum PositionResolver {
    /// The caller pre-split its text: every offset is on `line`.
    SingleLine { line: usize },
    /// Lines are counted from `\n` characters in the buffer.
    Buffer { line_starts: Vec<usize> },
}

impl PositionResolver {
    pub fn new(text: &str, base_line: Option<usize>) -> Self {
        match base_line {
            Some(line) => PositionResolver::SingleLine { line },
            None => {
                let mut line_starts = vec![0];
                line_starts.extend(
                    text.chars()
                        .enumerate()
                        .filter(|&(_, c)| c == '\n')
                        .map(|(i, _)| i + 1),
                );
                PositionResolver::Buffer { line_starts }
            }
        }
    }

    /// Line and starting column of the character at `offset`.
    pub fn resolve(&self, offset: usize) -> (usize, usize) {
        match self {
            PositionResolver::SingleLine { line } => (*line, offset + 1),
            PositionResolver::Buffer { line_starts } => {
                // Index of the last line start <= offset.
                let idx = match line_starts.binary_search_by(|start| match start.cmp(&offset) {
                    Ordering::Greater => Ordering::Greater,
                    _ => Ordering::Less,
                }) {
                    Ok(idx) | Err(idx) => idx.saturating_sub(1),
                };
                (idx + 1, offset - line_starts[idx] + 1)
            }
        }
    }

    /// `(line, column_start, column_end)` of a span of `char_len` characters.
    pub fn span(&self, offset: usize, char_len: usize) -> (usize, usize, usize) {
        let (line, column_start) = self.resolve(offset);
        (line, column_start, column_start + char_len)
    }
}

/// One-shot form of [`PositionResolver::resolve`].
pub fn resolve(text: &str, offset: usize, base_line: Option<usize>) -> (usize, usize) {
    PositionResolver::new(text, base_line).resolve(offset)
}
