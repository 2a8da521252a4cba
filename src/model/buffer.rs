//! In-memory text storage for a single document
//!
//! Offsets are byte offsets into UTF-8 text. Line/column conversions count
//! columns in characters, the unit proofreading services report.

use std::ops::Range;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    text: String,
}

impl Buffer {
    pub fn from_str(s: &str) -> Self {
        Self {
            text: s.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Full document text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Insert text at a byte offset (clamped to a valid char boundary)
    pub fn insert(&mut self, offset: usize, text: &str) {
        let offset = self.floor_char_boundary(offset);
        self.text.insert_str(offset, text);
    }

    /// Delete a byte range, returning the removed text
    pub fn delete(&mut self, range: Range<usize>) -> String {
        let range = self.clamp_range(range);
        self.text.drain(range).collect()
    }

    /// Copy out the text in a byte range
    ///
    /// Out-of-bounds or mid-character ranges are clamped rather than rejected.
    pub fn slice(&self, range: Range<usize>) -> String {
        let range = self.clamp_range(range);
        self.text[range].to_string()
    }

    /// Convert (line, column-in-characters) to a byte offset, both 0-indexed
    ///
    /// Columns past the end of a line clamp to the line end (before the
    /// newline); lines past the end of the buffer return the buffer length.
    pub fn line_col_to_position(&self, line: usize, column: usize) -> usize {
        let Some(line_start) = self.line_start_offset(line) else {
            return self.len();
        };
        let rest = &self.text[line_start..];
        let line_text = match rest.find('\n') {
            Some(newline) => &rest[..newline],
            None => rest,
        };
        let byte_offset = line_text
            .char_indices()
            .nth(column)
            .map(|(i, _)| i)
            .unwrap_or(line_text.len());
        line_start + byte_offset
    }

    /// Convert a byte offset to (line, column-in-characters)
    pub fn position_to_line_col(&self, offset: usize) -> (usize, usize) {
        let offset = self.floor_char_boundary(offset);
        let before = &self.text[..offset];
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        (line, before[line_start..].chars().count())
    }

    /// Byte offset of the first character of `line`
    pub fn line_start_offset(&self, line: usize) -> Option<usize> {
        if line == 0 {
            return Some(0);
        }
        self.text
            .match_indices('\n')
            .nth(line - 1)
            .map(|(i, _)| i + 1)
    }

    fn clamp_range(&self, range: Range<usize>) -> Range<usize> {
        let start = self.floor_char_boundary(range.start);
        let end = self.floor_char_boundary(range.end.max(start));
        start..end
    }

    fn floor_char_boundary(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }
}
