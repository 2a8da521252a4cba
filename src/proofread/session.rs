use super::actions::{self, PendingChoice, ResolveOutcome, SuggestionChoice};
use super::evaluator;
use super::navigator::{self, Direction, NavigationOutcome};
use super::problem::ReportedError;
use super::registry::ProblemRegistry;
use super::sync;
use crate::config::ProofreadConfig;
use crate::error::CheckError;
use crate::host::EditorHost;

pub const NO_PROBLEMS_FOUND: &str = "no language problems were found :-)";

/// A check in flight
///
/// Carries what the networking layer sends to the service, and the
/// sequence number used to reject responses that arrive after a newer
/// check was started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckTicket {
    pub id: u64,
    pub text: String,
    pub language: String,
    pub server_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Problems were ingested and the first one selected
    Found { count: usize },
    NoProblems,
}

/// User-facing commands that operate on the current problem set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofreadCommand {
    NextProblem,
    PreviousProblem,
    ApplyFix,
    Ignore,
}

impl ProofreadCommand {
    pub const ALL: [ProofreadCommand; 4] = [
        ProofreadCommand::NextProblem,
        ProofreadCommand::PreviousProblem,
        ProofreadCommand::ApplyFix,
        ProofreadCommand::Ignore,
    ];

    /// Stable name for keybindings and command palettes
    pub fn name(&self) -> &'static str {
        match self {
            ProofreadCommand::NextProblem => "goto_next_language_problem",
            ProofreadCommand::PreviousProblem => "goto_previous_language_problem",
            ProofreadCommand::ApplyFix => "fix_language_problem",
            ProofreadCommand::Ignore => "ignore_language_problem",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Navigated(NavigationOutcome),
    Resolved(ResolveOutcome),
}

/// Proofreading state of one open document
///
/// Owns the problem registry and is passed the document's host for every
/// operation; there is no state shared between documents.
#[derive(Debug, Clone, Default)]
pub struct ProofreadSession {
    config: ProofreadConfig,
    registry: ProblemRegistry,
    /// Id of the most recently started check
    latest_ticket: u64,
    pending_choice: Option<PendingChoice>,
}

impl ProofreadSession {
    pub fn new(config: ProofreadConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ProofreadConfig {
        &self.config
    }

    pub fn registry(&self) -> &ProblemRegistry {
        &self.registry
    }

    pub fn pending_choice(&self) -> Option<&PendingChoice> {
        self.pending_choice.as_ref()
    }

    /// Start a check ("run check"); the caller sends the ticket's text to the service
    ///
    /// Any earlier ticket becomes stale.
    pub fn begin_check(&mut self, host: &dyn EditorHost) -> CheckTicket {
        self.latest_ticket += 1;
        tracing::debug!("Starting check {}", self.latest_ticket);
        CheckTicket {
            id: self.latest_ticket,
            text: host.text(),
            language: self.config.language.clone(),
            server_url: self.config.server_url.clone(),
        }
    }

    /// Deliver the networking layer's result for `ticket`
    ///
    /// Failures and stale responses leave the current problems untouched.
    /// On success the registry is replaced and the first problem selected.
    pub fn complete_check(
        &mut self,
        ticket: &CheckTicket,
        response: Result<Vec<ReportedError>, CheckError>,
        host: &mut dyn EditorHost,
    ) -> Result<CheckOutcome, CheckError> {
        if ticket.id != self.latest_ticket {
            let err = CheckError::StaleResponse {
                ticket: ticket.id,
                latest: self.latest_ticket,
            };
            tracing::debug!("{}", err);
            return Err(err);
        }

        let reported = match response {
            Ok(reported) => reported,
            Err(err) => {
                tracing::warn!("Check {} failed: {}", ticket.id, err);
                if err.is_user_visible() {
                    host.set_status_message(err.to_string());
                }
                return Err(err);
            }
        };

        self.pending_choice = None;
        let count = self.registry.ingest(&reported, host);
        if count == 0 {
            host.set_status_message(NO_PROBLEMS_FOUND.to_string());
            return Ok(CheckOutcome::NoProblems);
        }

        if let Some(first) = self.registry.iter().next() {
            navigator::select_problem(first, host, &self.config.suggestion_separator);
        }
        Ok(CheckOutcome::Found { count })
    }

    /// Run a command against the current selection
    pub fn execute(
        &mut self,
        command: ProofreadCommand,
        host: &mut dyn EditorHost,
    ) -> CommandOutcome {
        match command {
            ProofreadCommand::NextProblem => {
                CommandOutcome::Navigated(self.goto_next(Direction::Forward, host))
            }
            ProofreadCommand::PreviousProblem => {
                CommandOutcome::Navigated(self.goto_next(Direction::Backward, host))
            }
            ProofreadCommand::ApplyFix => CommandOutcome::Resolved(self.resolve_selected(true, host)),
            ProofreadCommand::Ignore => CommandOutcome::Resolved(self.resolve_selected(false, host)),
        }
    }

    pub fn goto_next(&self, direction: Direction, host: &mut dyn EditorHost) -> NavigationOutcome {
        navigator::goto_next(
            direction,
            &self.registry,
            host,
            &self.config.suggestion_separator,
        )
    }

    pub fn resolve_selected(&mut self, apply_fix: bool, host: &mut dyn EditorHost) -> ResolveOutcome {
        let outcome = actions::resolve_selected(apply_fix, &self.registry, &self.config, host);
        self.pending_choice = match &outcome {
            ResolveOutcome::AwaitingChoice(pending) => Some(pending.clone()),
            _ => None,
        };
        outcome
    }

    /// Deliver the user's answer to an open suggestion list
    ///
    /// Returns `None` when no choice was pending.
    pub fn choose_suggestion(
        &mut self,
        choice: SuggestionChoice,
        host: &mut dyn EditorHost,
    ) -> Option<ResolveOutcome> {
        let pending = self.pending_choice.take()?;
        Some(actions::complete_choice(
            pending,
            choice,
            &self.registry,
            &self.config,
            host,
        ))
    }

    /// Document modification hook: refresh every problem highlight
    pub fn on_modified(&self, host: &mut dyn EditorHost) -> usize {
        sync::sync_highlights(&self.registry, host)
    }

    /// Problems not yet fixed, ignored or edited away
    pub fn open_count(&self, host: &dyn EditorHost) -> usize {
        evaluator::open_count(&self.registry, host)
    }

    /// Drop every problem (new document content or document closed)
    pub fn clear(&mut self, host: &mut dyn EditorHost) {
        self.pending_choice = None;
        self.registry.clear(host);
    }
}
