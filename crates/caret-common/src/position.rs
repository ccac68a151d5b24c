//! Position and location utilities.
//!
//! Editors address the document by line/column, while tokens, AST spans and
//! scope ranges use flat offsets. Both are measured in UTF-16 code units so
//! that offsets agree with what a browser-hosted editor reports.

/// A position in a document (0-indexed line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column in UTF-16 code units
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Position { line, character }
    }
}

/// Line map for offset <-> position conversion.
/// Stores the UTF-16 starting offset and length of each line.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Starting offset of each line (line_starts[0] is always 0)
    line_starts: Vec<u32>,
    /// Length of each line, excluding its terminator
    line_lengths: Vec<u32>,
    /// Total length of the source in UTF-16 code units
    total_len: u32,
}

impl LineMap {
    /// Build a line map from source text.
    pub fn build(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        let mut line_lengths = Vec::new();
        let mut offset = 0u32;
        let mut current_len = 0u32;
        let mut chars = source.chars().peekable();

        while let Some(ch) = chars.next() {
            let width = ch.len_utf16() as u32;
            offset += width;
            match ch {
                '\n' => {
                    line_lengths.push(current_len);
                    line_starts.push(offset);
                    current_len = 0;
                }
                '\r' => {
                    // \r\n counts as a single terminator
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                        offset += 1;
                    }
                    line_lengths.push(current_len);
                    line_starts.push(offset);
                    current_len = 0;
                }
                _ => current_len += width,
            }
        }
        line_lengths.push(current_len);

        LineMap {
            line_starts,
            line_lengths,
            total_len: offset,
        }
    }

    /// Convert an offset to a Position (line, character).
    pub fn offset_to_position(&self, offset: u32) -> Position {
        let offset = offset.min(self.total_len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        };
        let line_start = self.line_starts[line];
        let character = (offset - line_start).min(self.line_lengths[line]);

        Position {
            line: line as u32,
            character,
        }
    }

    /// Convert a Position (line, character) to an offset.
    ///
    /// Columns past the end of the line clamp to the line end; lines past the
    /// end of the document return `None`.
    pub fn position_to_offset(&self, position: Position) -> Option<u32> {
        let line_idx = position.line as usize;
        let line_start = *self.line_starts.get(line_idx)?;
        let line_len = self.line_lengths[line_idx];
        Some(line_start + position.character.min(line_len))
    }

    /// Get the number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the starting offset of a line.
    pub fn line_start(&self, line: usize) -> Option<u32> {
        self.line_starts.get(line).copied()
    }

    /// Total document length in UTF-16 code units.
    pub fn len(&self) -> u32 {
        self.total_len
    }

    pub fn is_empty(&self) -> bool {
        self.total_len == 0
    }
}

#[cfg(test)]
#[path = "tests/position_tests.rs"]
mod position_tests;
