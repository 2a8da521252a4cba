// ProofreadHarness - an in-memory document with a proofreading session attached

use super::fake_service::FakeProofreader;
use proofmark::proofread::{
    CheckOutcome, CommandOutcome, ProblemId, ProofreadCommand, ProofreadSession, ReportedError,
    ResolveOutcome, SuggestionChoice,
};
use proofmark::view::overlay::OverlayFace;
use proofmark::{CheckError, EditorHost, EditorState, ProofreadConfig};
use std::ops::Range;

pub struct ProofreadHarness {
    pub state: EditorState,
    pub session: ProofreadSession,
}

impl ProofreadHarness {
    pub fn new(text: &str) -> Self {
        Self::with_config(text, ProofreadConfig::default())
    }

    pub fn with_config(text: &str, config: ProofreadConfig) -> Self {
        Self {
            state: EditorState::with_palette(text, config.palette()),
            session: ProofreadSession::new(config),
        }
    }

    /// Run a full check whose response is `reported`
    pub fn run_check(&mut self, reported: Vec<ReportedError>) -> Result<CheckOutcome, CheckError> {
        let ticket = self.session.begin_check(&self.state);
        self.session
            .complete_check(&ticket, Ok(reported), &mut self.state)
    }

    /// Run a full check against a fake service
    pub fn run_check_with(&mut self, service: &FakeProofreader) -> Result<CheckOutcome, CheckError> {
        let ticket = self.session.begin_check(&self.state);
        let reported = service.check(&ticket.text);
        self.session
            .complete_check(&ticket, Ok(reported), &mut self.state)
    }

    /// Insert text as the user would, then fire the modification hook
    pub fn type_text(&mut self, position: usize, text: &str) {
        self.state.insert(position, text);
        self.session.on_modified(&mut self.state);
    }

    pub fn delete(&mut self, range: Range<usize>) {
        self.state.delete(range);
        self.session.on_modified(&mut self.state);
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.state.undo();
        self.session.on_modified(&mut self.state);
        undone
    }

    pub fn execute(&mut self, command: ProofreadCommand) -> CommandOutcome {
        let outcome = self.session.execute(command, &mut self.state);
        self.session.on_modified(&mut self.state);
        outcome
    }

    /// Pick from the open suggestion list
    pub fn choose(&mut self, choice: SuggestionChoice) -> Option<ResolveOutcome> {
        self.state.take_choices();
        let outcome = self.session.choose_suggestion(choice, &mut self.state);
        self.session.on_modified(&mut self.state);
        outcome
    }

    pub fn place_caret(&mut self, offset: usize) {
        self.state.set_selection(offset..offset);
    }

    pub fn selected_text(&self) -> String {
        self.state.slice(self.state.selection())
    }

    pub fn problem_span(&self, id: usize) -> Option<Range<usize>> {
        let problem = self.session.registry().get(ProblemId(id))?;
        self.state.anchor_range(problem.anchor)
    }

    pub fn is_highlighted(&self, id: usize) -> bool {
        let Some(problem) = self.session.registry().get(ProblemId(id)) else {
            return false;
        };
        matches!(
            self.state.anchor_face(problem.anchor),
            Some(OverlayFace::Outline { .. })
        )
    }

    pub fn assert_buffer_content(&self, expected: &str) {
        assert_eq!(self.state.text_string(), expected, "Buffer content mismatch");
    }

    pub fn assert_selected_text(&self, expected: &str) {
        let selected = self.selected_text();
        assert_eq!(
            selected, expected,
            "Expected selection {expected:?}, got {selected:?} at {:?}",
            self.state.selection()
        );
    }

    pub fn assert_status_contains(&self, text: &str) {
        let status = self.state.status_message().unwrap_or_default();
        assert!(
            status.contains(text),
            "Expected status to contain '{text}'\nStatus: {status}"
        );
    }
}
