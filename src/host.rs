//! Editor capabilities the proofreading core drives
//!
//! The core never owns text, spans or UI. Everything it needs from the
//! editing environment goes through [`EditorHost`]; [`crate::state::EditorState`]
//! is the in-memory implementation used by tests and headless callers.

use crate::view::overlay::{AnchorId, HighlightFace};
use std::ops::Range;

pub trait EditorHost {
    /// Document length in bytes
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text in a byte range (clamped to the document)
    fn slice(&self, range: Range<usize>) -> String;

    /// Full document text, as sent to the proofreading service
    fn text(&self) -> String {
        self.slice(0..self.len())
    }

    /// Convert a 0-based (line, column-in-characters) pair to a byte offset
    fn line_col_to_offset(&self, line: usize, column: usize) -> usize;

    /// Register an edit-tracking span drawn with `face`
    fn add_anchor(&mut self, range: Range<usize>, face: HighlightFace) -> AnchorId;

    /// Current span of an anchor, or `None` if it no longer exists
    fn anchor_range(&self, anchor: AnchorId) -> Option<Range<usize>>;

    /// Re-draw an anchor; returns false if the anchor no longer exists
    fn set_anchor_face(&mut self, anchor: AnchorId, face: HighlightFace) -> bool;

    /// Collapse anchors to zero-length spans at their starts and draw them neutral.
    ///
    /// All collapses must be recorded as one undoable step so that a single
    /// undo restores every span. Returns how many anchors were collapsed.
    fn collapse_anchors(&mut self, anchors: &[AnchorId]) -> usize;

    fn remove_anchor(&mut self, anchor: AnchorId);

    /// Replace the text in `range`
    fn replace(&mut self, range: Range<usize>, text: &str);

    /// Primary selection
    fn selection(&self) -> Range<usize>;

    fn set_selection(&mut self, range: Range<usize>);

    fn scroll_into_view(&mut self, range: Range<usize>);

    /// Transient status line message
    fn set_status_message(&mut self, message: String);

    /// Present an ordered list for the user to pick from.
    ///
    /// The answer arrives later as a [`crate::proofread::SuggestionChoice`]
    /// handed to [`crate::proofread::ProofreadSession::choose_suggestion`].
    fn show_choices(&mut self, items: Vec<String>);
}
