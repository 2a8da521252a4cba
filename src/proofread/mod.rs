//! Tracking, navigating and resolving proofreading problems
//!
//! A check produces a batch of [`ReportedError`]s which the
//! [`ProofreadSession`] ingests into its [`ProblemRegistry`]. From then on
//! each problem follows its live span in the document: it stays open until
//! the span is emptied, its text changes, or the user fixes or ignores it.

pub mod actions;
pub mod evaluator;
pub mod navigator;
pub mod problem;
pub mod registry;
pub mod session;
pub mod sync;

pub use actions::{PendingChoice, ResolveOutcome, SuggestionChoice};
pub use navigator::{Direction, NavigationOutcome};
pub use problem::{split_replacements, Problem, ProblemId, ProblemStatus, ReportedError};
pub use registry::ProblemRegistry;
pub use session::{CheckOutcome, CheckTicket, CommandOutcome, ProofreadCommand, ProofreadSession};
