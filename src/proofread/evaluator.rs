//! Decides whether a problem is still open against the live document

use super::problem::{Problem, ProblemStatus};
use super::registry::ProblemRegistry;
use crate::host::EditorHost;

/// A problem is solved when its live span is empty or its text no longer
/// matches what was flagged. A vanished anchor counts as solved.
pub fn is_solved(problem: &Problem, host: &dyn EditorHost) -> bool {
    let Some(range) = host.anchor_range(problem.anchor) else {
        tracing::warn!(
            "Problem {} has no live span (anchor {:?}), treating it as solved",
            problem.id,
            problem.anchor
        );
        return true;
    };
    range.is_empty() || host.slice(range) != problem.original_content
}

pub fn problem_status(problem: &Problem, host: &dyn EditorHost) -> ProblemStatus {
    if is_solved(problem, host) {
        ProblemStatus::Solved
    } else {
        ProblemStatus::Open
    }
}

/// Number of problems still open
pub fn open_count(registry: &ProblemRegistry, host: &dyn EditorHost) -> usize {
    registry.iter().filter(|p| !is_solved(p, host)).count()
}
