//! Moving the selection between open problems

use super::evaluator::is_solved;
use super::problem::{Problem, ProblemId};
use super::registry::ProblemRegistry;
use crate::host::EditorHost;

pub const NO_FURTHER_PROBLEMS: &str = "no further language problems to fix";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    Selected(ProblemId),
    NoFurtherProblems,
}

/// Select the nearest open problem in `direction` from the selection start
///
/// Forward picks the first open problem (in id order) starting strictly
/// after the selection start; backward picks the last one starting strictly
/// before it. The selection is left alone when nothing qualifies.
pub fn goto_next(
    direction: Direction,
    registry: &ProblemRegistry,
    host: &mut dyn EditorHost,
    separator: &str,
) -> NavigationOutcome {
    let caret = host.selection().start;

    let qualifies = |problem: &Problem, host: &dyn EditorHost| {
        let Some(range) = host.anchor_range(problem.anchor) else {
            return false;
        };
        let ahead = match direction {
            Direction::Forward => range.start > caret,
            Direction::Backward => range.start < caret,
        };
        ahead && !is_solved(problem, host)
    };

    let found = match direction {
        Direction::Forward => registry.iter().find(|&p| qualifies(p, host)),
        Direction::Backward => registry.iter().rev().find(|&p| qualifies(p, host)),
    };

    match found {
        Some(problem) => {
            select_problem(problem, host, separator);
            NavigationOutcome::Selected(problem.id)
        }
        None => {
            tracing::debug!("No open problem {:?} from offset {}", direction, caret);
            host.set_status_message(NO_FURTHER_PROBLEMS.to_string());
            NavigationOutcome::NoFurtherProblems
        }
    }
}

/// Select a problem's live span, bring it into view and describe it
pub fn select_problem(problem: &Problem, host: &mut dyn EditorHost, separator: &str) {
    let Some(range) = host.anchor_range(problem.anchor) else {
        tracing::warn!("Cannot select problem {}: live span is gone", problem.id);
        return;
    };
    tracing::debug!("Selecting problem {} at {:?}", problem.id, range);
    host.set_selection(range.clone());
    host.scroll_into_view(range);
    host.set_status_message(problem.status_text(separator));
}
