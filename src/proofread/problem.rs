use crate::view::overlay::AnchorId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Delimiter the proofreading service uses to join multiple replacements
pub const REPLACEMENT_DELIMITER: char = '#';

/// Position of a problem within the current registry generation.
/// Dense and assigned in report order, so it is also the navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProblemId(pub usize);

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One error record as delivered by the networking layer
///
/// Lines and columns are 0-based; columns count characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedError {
    pub from_line: usize,
    pub from_column: usize,
    pub to_line: usize,
    pub to_column: usize,
    pub category: String,
    pub message: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl ReportedError {
    /// Build a record from the service's `#`-joined replacement string
    pub fn with_joined_replacements(
        (from_line, from_column): (usize, usize),
        (to_line, to_column): (usize, usize),
        category: impl Into<String>,
        message: impl Into<String>,
        replacements: &str,
    ) -> Self {
        Self {
            from_line,
            from_column,
            to_line,
            to_column,
            category: category.into(),
            message: message.into(),
            suggestions: split_replacements(replacements),
        }
    }
}

/// Split a joined replacement string into an ordered suggestion list
///
/// An empty string means "no suggestions". Empty pieces between delimiters
/// are kept: an empty replacement is a legitimate suggestion (delete the text).
pub fn split_replacements(replacements: &str) -> Vec<String> {
    if replacements.is_empty() {
        return Vec::new();
    }
    replacements
        .split(REPLACEMENT_DELIMITER)
        .map(str::to_string)
        .collect()
}

/// A reported grammar or style problem tied to a live span of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub id: ProblemId,

    /// Live span handle in the host
    pub anchor: AnchorId,

    /// Byte range at ingest time; never recomputed
    pub original_span: Range<usize>,

    pub category: String,

    pub message: String,

    pub suggestions: Vec<String>,

    /// Text under `original_span` at ingest time
    pub original_content: String,
}

impl Problem {
    pub fn has_suggestions(&self) -> bool {
        !self.suggestions.is_empty()
    }

    /// Status line text: the message, then the suggestions in parentheses
    pub fn status_text(&self, separator: &str) -> String {
        if self.suggestions.is_empty() {
            self.message.clone()
        } else {
            format!("{} ({})", self.message, self.suggestions.join(separator))
        }
    }
}

/// Derived status of a problem against the current document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemStatus {
    Open,
    Solved,
}
