//! Fixing and ignoring the selected problem

use super::evaluator::is_solved;
use super::navigator::{goto_next, select_problem, Direction, NavigationOutcome};
use super::problem::{Problem, ProblemId};
use super::registry::ProblemRegistry;
use super::sync::sync_highlights;
use crate::config::ProofreadConfig;
use crate::host::EditorHost;
use crate::view::overlay::AnchorId;

pub const NO_PROBLEM_SELECTED: &str = "no language problem selected";

/// Answer to a suggestion list shown by [`EditorHost::show_choices`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionChoice {
    Chosen(usize),
    Cancelled,
}

/// A fix waiting for the user to pick one of several suggestions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChoice {
    pub problem: ProblemId,
    /// Registry generation the choice was offered in
    pub generation: u64,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// The selected problem's text was replaced by a suggestion
    Fixed {
        problem: ProblemId,
        next: NavigationOutcome,
    },
    /// These problems were dismissed
    Ignored {
        problems: Vec<ProblemId>,
        next: NavigationOutcome,
    },
    /// Several suggestions are on offer; the host is showing the list
    AwaitingChoice(PendingChoice),
    /// The user dismissed the suggestion list; the problem is selected again
    ChoiceCancelled(ProblemId),
    /// The choice belonged to an older set of problems, or its problem is no longer open
    ChoiceDiscarded,
    NoProblemSelected,
}

/// Resolve the problem whose live span is exactly the current selection
///
/// With `apply_fix` and at least one suggestion the problem is fixed (or a
/// choice list is opened when there are several); otherwise it is ignored.
pub fn resolve_selected(
    apply_fix: bool,
    registry: &ProblemRegistry,
    config: &ProofreadConfig,
    host: &mut dyn EditorHost,
) -> ResolveOutcome {
    let Some(problem) = selected_problem(registry, host) else {
        host.set_status_message(NO_PROBLEM_SELECTED.to_string());
        return ResolveOutcome::NoProblemSelected;
    };

    if apply_fix && problem.has_suggestions() {
        if let [suggestion] = problem.suggestions.as_slice() {
            let next = apply_suggestion(problem, suggestion, registry, config, host);
            return ResolveOutcome::Fixed {
                problem: problem.id,
                next,
            };
        }

        tracing::debug!(
            "Offering {} suggestions for problem {}",
            problem.suggestions.len(),
            problem.id
        );
        host.show_choices(problem.suggestions.clone());
        return ResolveOutcome::AwaitingChoice(PendingChoice {
            problem: problem.id,
            generation: registry.generation(),
            suggestions: problem.suggestions.clone(),
        });
    }

    let (problems, next) = ignore(problem, registry, config, host);
    ResolveOutcome::Ignored { problems, next }
}

/// Finish a fix that was waiting on [`ResolveOutcome::AwaitingChoice`]
pub fn complete_choice(
    pending: PendingChoice,
    choice: SuggestionChoice,
    registry: &ProblemRegistry,
    config: &ProofreadConfig,
    host: &mut dyn EditorHost,
) -> ResolveOutcome {
    if pending.generation != registry.generation() {
        tracing::debug!(
            "Dropping choice for problem {} from generation {} (now {})",
            pending.problem,
            pending.generation,
            registry.generation()
        );
        return ResolveOutcome::ChoiceDiscarded;
    }
    let Some(problem) = registry.get(pending.problem) else {
        return ResolveOutcome::ChoiceDiscarded;
    };
    if is_solved(problem, host) {
        tracing::debug!("Dropping choice for problem {}: already solved", problem.id);
        return ResolveOutcome::ChoiceDiscarded;
    }

    let suggestion = match choice {
        SuggestionChoice::Chosen(index) => pending.suggestions.get(index),
        SuggestionChoice::Cancelled => None,
    };
    match suggestion {
        Some(suggestion) => {
            let next = apply_suggestion(problem, suggestion, registry, config, host);
            ResolveOutcome::Fixed {
                problem: problem.id,
                next,
            }
        }
        None => {
            if let SuggestionChoice::Chosen(index) = choice {
                tracing::warn!(
                    "Suggestion index {} out of range for problem {}",
                    index,
                    problem.id
                );
            }
            select_problem(problem, host, &config.suggestion_separator);
            ResolveOutcome::ChoiceCancelled(problem.id)
        }
    }
}

/// The problem whose non-empty live span equals the selection
fn selected_problem<'a>(
    registry: &'a ProblemRegistry,
    host: &dyn EditorHost,
) -> Option<&'a Problem> {
    let selection = host.selection();
    if selection.is_empty() {
        return None;
    }
    registry
        .iter()
        .find(|p| host.anchor_range(p.anchor).as_ref() == Some(&selection))
}

fn apply_suggestion(
    problem: &Problem,
    suggestion: &str,
    registry: &ProblemRegistry,
    config: &ProofreadConfig,
    host: &mut dyn EditorHost,
) -> NavigationOutcome {
    let Some(range) = host.anchor_range(problem.anchor) else {
        tracing::warn!("Cannot fix problem {}: live span is gone", problem.id);
        return goto_next(
            Direction::Forward,
            registry,
            host,
            &config.suggestion_separator,
        );
    };
    tracing::debug!(
        "Fixing problem {}: {:?} -> {:?}",
        problem.id,
        problem.original_content,
        suggestion
    );
    host.replace(range.clone(), suggestion);
    // The fix can also solve problems nested in the replaced text
    sync_highlights(registry, host);

    let caret = range.start + suggestion.len();
    host.set_selection(caret..caret);
    goto_next(
        Direction::Forward,
        registry,
        host,
        &config.suggestion_separator,
    )
}

/// Dismiss a problem, or every identical open typo when it is a typo
fn ignore(
    problem: &Problem,
    registry: &ProblemRegistry,
    config: &ProofreadConfig,
    host: &mut dyn EditorHost,
) -> (Vec<ProblemId>, NavigationOutcome) {
    let caret = host
        .anchor_range(problem.anchor)
        .map(|r| r.start)
        .unwrap_or_else(|| host.selection().start);

    let targets: Vec<(ProblemId, AnchorId)> = if config.is_typo_category(&problem.category) {
        registry
            .iter()
            .filter(|p| {
                p.id == problem.id
                    || (p.category == problem.category
                        && p.original_content == problem.original_content
                        && !is_solved(p, host))
            })
            .map(|p| (p.id, p.anchor))
            .collect()
    } else {
        vec![(problem.id, problem.anchor)]
    };

    tracing::debug!(
        "Ignoring {} problem(s) like {} ({:?})",
        targets.len(),
        problem.id,
        problem.original_content
    );
    let anchors: Vec<AnchorId> = targets.iter().map(|&(_, anchor)| anchor).collect();
    host.collapse_anchors(&anchors);

    host.set_selection(caret..caret);
    let next = goto_next(
        Direction::Forward,
        registry,
        host,
        &config.suggestion_separator,
    );
    (targets.into_iter().map(|(id, _)| id).collect(), next)
}
