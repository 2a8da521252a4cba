//! Ordered collection of the problems reported for the current check

use super::problem::{Problem, ProblemId, ReportedError};
use crate::host::EditorHost;
use crate::view::overlay::HighlightFace;

#[derive(Debug, Clone, Default)]
pub struct ProblemRegistry {
    problems: Vec<Problem>,
    /// Bumped on every ingest and every non-empty clear
    generation: u64,
}

impl ProblemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole problem set with a fresh batch
    ///
    /// Existing problems and their anchors are removed first. Each record
    /// becomes one problem, in report order, with a flagged anchor over the
    /// reported range. Returns the number of problems ingested.
    pub fn ingest(&mut self, reported: &[ReportedError], host: &mut dyn EditorHost) -> usize {
        self.clear(host);
        self.generation += 1;

        let len = host.len();
        self.problems.reserve(reported.len());
        for (index, error) in reported.iter().enumerate() {
            let a = host
                .line_col_to_offset(error.from_line, error.from_column)
                .min(len);
            let b = host
                .line_col_to_offset(error.to_line, error.to_column)
                .min(len);
            let span = a.min(b)..a.max(b);

            let anchor = host.add_anchor(span.clone(), HighlightFace::Flagged);
            let original_content = host.slice(span.clone());
            tracing::trace!(
                "problem {}: {:?} {:?} ({})",
                index,
                span,
                original_content,
                error.message
            );

            self.problems.push(Problem {
                id: ProblemId(index),
                anchor,
                original_span: span,
                category: error.category.clone(),
                message: error.message.clone(),
                suggestions: error.suggestions.clone(),
                original_content,
            });
        }

        tracing::debug!(
            "Ingested {} problems (generation {})",
            self.problems.len(),
            self.generation
        );
        self.problems.len()
    }

    /// Remove every problem and its anchor; a no-op when already empty
    pub fn clear(&mut self, host: &mut dyn EditorHost) {
        if self.problems.is_empty() {
            return;
        }
        for problem in self.problems.drain(..) {
            host.remove_anchor(problem.anchor);
        }
        self.generation += 1;
    }

    pub fn get(&self, id: ProblemId) -> Option<&Problem> {
        self.problems.get(id.0)
    }

    /// Problems in id order
    pub fn iter(&self) -> std::slice::Iter<'_, Problem> {
        self.problems.iter()
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
