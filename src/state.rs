use crate::host::EditorHost;
use crate::model::buffer::Buffer;
use crate::model::event::{Event, EventLog};
use crate::model::marker::MarkerList;
use crate::view::overlay::{AnchorId, HighlightFace, HighlightPalette, OverlayFace, OverlayManager};
use std::ops::Range;

/// Default number of visible text lines used for scrolling decisions
const DEFAULT_VIEWPORT_HEIGHT: usize = 24;

/// The complete state of one open document
///
/// This is the in-memory [`EditorHost`]: text, edit-tracking anchors, the
/// primary selection, a line-based viewport, the status line, the pending
/// choice list and undo history.
#[derive(Debug, Clone)]
pub struct EditorState {
    /// The text buffer
    pub buffer: Buffer,

    /// Marker list for content-anchored overlay positions
    pub marker_list: MarkerList,

    /// Overlays backing the anchors handed out to the proofreading core
    pub overlays: OverlayManager,

    palette: HighlightPalette,

    /// Primary selection (empty range = caret)
    selection: Range<usize>,

    /// First visible line
    top_line: usize,

    viewport_height: usize,

    status_message: Option<String>,

    /// Items of the open choice list, if any
    choices: Option<Vec<String>>,

    event_log: EventLog,
}

impl EditorState {
    pub fn new(text: &str) -> Self {
        Self::with_palette(text, HighlightPalette::default())
    }

    pub fn with_palette(text: &str, palette: HighlightPalette) -> Self {
        let buffer = Buffer::from_str(text);
        let mut marker_list = MarkerList::new();
        marker_list.set_buffer_size(buffer.len());
        Self {
            buffer,
            marker_list,
            overlays: OverlayManager::new(),
            palette,
            selection: 0..0,
            top_line: 0,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            status_message: None,
            choices: None,
            event_log: EventLog::new(),
        }
    }

    /// Apply an event without recording it
    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::Insert { position, text } => {
                let position = (*position).min(self.buffer.len());
                // Adjust markers BEFORE modifying buffer
                self.overlays
                    .adjust_for_insert(&mut self.marker_list, position, text.len());
                self.buffer.insert(position, text);
                self.selection = shift_for_insert(&self.selection, position, text.len());
            }
            Event::Delete { range, .. } => {
                let start = range.start.min(self.buffer.len());
                let end = range.end.clamp(start, self.buffer.len());
                self.marker_list.adjust_for_delete(start, end - start);
                self.buffer.delete(start..end);
                self.selection = shift_for_delete(&self.selection, start, end - start);
            }
            Event::MoveAnchor {
                anchor, new_range, ..
            } => {
                if let Some(overlay) = self.overlays.get(*anchor) {
                    overlay.set_range(new_range.clone(), &mut self.marker_list);
                }
            }
            Event::Batch { events, .. } => {
                for event in events {
                    self.apply(event);
                }
            }
        }
    }

    fn record(&mut self, event: Event) {
        self.apply(&event);
        self.event_log.append(event);
    }

    /// Record an edit of `range`, preceded by a no-op move of every anchor it touches
    ///
    /// Deleted anchors collapse and collapsed anchors never grow back, so
    /// undo restores them from these moves once the text is back.
    fn record_edit(&mut self, range: &Range<usize>, mut edits: Vec<Event>, description: &str) {
        let mut events: Vec<Event> = self
            .overlays
            .touching(range, &self.marker_list)
            .into_iter()
            .map(|(anchor, span)| Event::MoveAnchor {
                anchor,
                old_range: span.clone(),
                new_range: span,
            })
            .collect();

        if events.is_empty() && edits.len() == 1 {
            if let Some(edit) = edits.pop() {
                self.record(edit);
            }
            return;
        }
        events.append(&mut edits);
        self.record(Event::Batch {
            events,
            description: description.to_string(),
        });
    }

    /// Insert text as a user edit
    pub fn insert(&mut self, position: usize, text: &str) {
        self.record(Event::Insert {
            position,
            text: text.to_string(),
        });
    }

    /// Delete text as a user edit
    pub fn delete(&mut self, range: Range<usize>) {
        let deleted_text = self.buffer.slice(range.clone());
        let start = range.start.min(self.buffer.len());
        let range = start..start + deleted_text.len();
        let edit = Event::Delete {
            range: range.clone(),
            deleted_text,
        };
        self.record_edit(&range, vec![edit], "Delete");
    }

    /// Undo the last recorded change; returns false if there was nothing to undo
    pub fn undo(&mut self) -> bool {
        match self.event_log.undo() {
            Some(event) => {
                self.apply(&event);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.event_log.redo() {
            Some(event) => {
                self.apply(&event);
                true
            }
            None => false,
        }
    }

    pub fn text_string(&self) -> String {
        self.buffer.text().to_string()
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Items of the open choice list
    pub fn choices(&self) -> Option<&[String]> {
        self.choices.as_deref()
    }

    /// Close the choice list, returning its items
    pub fn take_choices(&mut self) -> Option<Vec<String>> {
        self.choices.take()
    }

    pub fn top_line(&self) -> usize {
        self.top_line
    }

    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height.max(1);
    }

    /// Overlay face currently drawn for an anchor
    pub fn anchor_face(&self, anchor: AnchorId) -> Option<OverlayFace> {
        self.overlays.get(anchor).map(|o| o.face)
    }

    /// Anchors currently drawn with a visible face
    pub fn visible_highlights(&self) -> Vec<(AnchorId, Range<usize>)> {
        self.overlays.visible(&self.marker_list)
    }
}

impl EditorHost for EditorState {
    fn len(&self) -> usize {
        self.buffer.len()
    }

    fn slice(&self, range: Range<usize>) -> String {
        self.buffer.slice(range)
    }

    fn line_col_to_offset(&self, line: usize, column: usize) -> usize {
        self.buffer.line_col_to_position(line, column)
    }

    fn add_anchor(&mut self, range: Range<usize>, face: HighlightFace) -> AnchorId {
        let face = self.palette.resolve(face);
        self.overlays.add(&mut self.marker_list, range, face)
    }

    fn anchor_range(&self, anchor: AnchorId) -> Option<Range<usize>> {
        self.overlays.get(anchor)?.range(&self.marker_list)
    }

    fn set_anchor_face(&mut self, anchor: AnchorId, face: HighlightFace) -> bool {
        let face = self.palette.resolve(face);
        match self.overlays.get_mut(anchor) {
            Some(overlay) => {
                overlay.face = face;
                true
            }
            None => false,
        }
    }

    fn collapse_anchors(&mut self, anchors: &[AnchorId]) -> usize {
        let moves: Vec<Event> = anchors
            .iter()
            .filter_map(|&anchor| {
                let old_range = self.anchor_range(anchor)?;
                let new_range = old_range.start..old_range.start;
                Some(Event::MoveAnchor {
                    anchor,
                    old_range,
                    new_range,
                })
            })
            .collect();
        if moves.is_empty() {
            return 0;
        }
        let collapsed = moves.len();

        // The empty insert ties the anchor moves into the undo history
        let mut events = vec![Event::Insert {
            position: self.buffer.len(),
            text: String::new(),
        }];
        events.extend(moves);
        self.record(Event::Batch {
            events,
            description: "Ignore problems".to_string(),
        });

        for &anchor in anchors {
            self.set_anchor_face(anchor, HighlightFace::Neutral);
        }
        collapsed
    }

    fn remove_anchor(&mut self, anchor: AnchorId) {
        self.overlays.remove(anchor, &mut self.marker_list);
    }

    fn replace(&mut self, range: Range<usize>, text: &str) {
        let deleted_text = self.buffer.slice(range.clone());
        let start = range.start.min(self.buffer.len());
        let range = start..start + deleted_text.len();
        let edits = vec![
            Event::Delete {
                range: range.clone(),
                deleted_text,
            },
            Event::Insert {
                position: start,
                text: text.to_string(),
            },
        ];
        self.record_edit(&range, edits, "Replace");
    }

    fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    fn set_selection(&mut self, range: Range<usize>) {
        let len = self.buffer.len();
        let start = range.start.min(len);
        self.selection = start..range.end.clamp(start, len);
    }

    fn scroll_into_view(&mut self, range: Range<usize>) {
        let (line, _) = self.buffer.position_to_line_col(range.start);
        if line < self.top_line || line >= self.top_line + self.viewport_height {
            // Center the target line
            self.top_line = line.saturating_sub(self.viewport_height / 2);
        }
    }

    fn set_status_message(&mut self, message: String) {
        tracing::debug!("status: {}", message);
        self.status_message = Some(message);
    }

    fn show_choices(&mut self, items: Vec<String>) {
        self.choices = Some(items);
    }
}

fn shift_for_insert(selection: &Range<usize>, position: usize, len: usize) -> Range<usize> {
    let shift = |pos: usize| if pos > position { pos + len } else { pos };
    shift(selection.start)..shift(selection.end)
}

fn shift_for_delete(selection: &Range<usize>, position: usize, len: usize) -> Range<usize> {
    let shift = |pos: usize| {
        if pos >= position + len {
            pos - len
        } else if pos > position {
            position
        } else {
            pos
        }
    };
    shift(selection.start)..shift(selection.end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_tracks_user_edits() {
        let mut state = EditorState::new("I teh cat");
        let anchor = state.add_anchor(2..5, HighlightFace::Flagged);

        state.insert(0, "Now ");
        assert_eq!(state.anchor_range(anchor), Some(6..9));
        assert_eq!(state.slice(6..9), "teh");

        state.delete(0..4);
        assert_eq!(state.anchor_range(anchor), Some(2..5));
    }

    #[test]
    fn test_replace_collapses_anchor_and_undo_restores_it() {
        let mut state = EditorState::new("I teh cat");
        let anchor = state.add_anchor(2..5, HighlightFace::Flagged);
        let inner = state.add_anchor(3..5, HighlightFace::Flagged);
        let after = state.add_anchor(6..9, HighlightFace::Flagged);

        state.replace(2..5, "pet the");
        assert_eq!(state.text_string(), "I pet the cat");
        assert_eq!(state.anchor_range(anchor), Some(2..2));
        assert_eq!(state.anchor_range(inner), Some(2..2));
        assert_eq!(state.anchor_range(after), Some(10..13));

        assert!(state.undo());
        assert_eq!(state.text_string(), "I teh cat");
        assert_eq!(state.anchor_range(anchor), Some(2..5));
        assert_eq!(state.anchor_range(inner), Some(3..5));
        assert_eq!(state.anchor_range(after), Some(6..9));

        assert!(state.redo());
        assert_eq!(state.anchor_range(inner), Some(2..2));
    }

    #[test]
    fn test_collapsed_anchor_stays_collapsed_when_typing_at_it() {
        let mut state = EditorState::new("teh cat");
        let anchor = state.add_anchor(0..3, HighlightFace::Flagged);

        state.delete(0..3);
        state.insert(0, "teh");
        assert_eq!(state.text_string(), "teh cat");
        assert_eq!(state.anchor_range(anchor), Some(0..0));

        // Undoing the insert and then the delete brings the span back
        assert!(state.undo());
        assert!(state.undo());
        assert_eq!(state.anchor_range(anchor), Some(0..3));
    }

    #[test]
    fn test_undo_delete_next_to_anchor_keeps_its_end() {
        let mut state = EditorState::new("ab cd");
        let anchor = state.add_anchor(0..2, HighlightFace::Flagged);

        state.delete(2..3);
        assert_eq!(state.anchor_range(anchor), Some(0..2));
        assert!(state.undo());
        assert_eq!(state.text_string(), "ab cd");
        assert_eq!(state.anchor_range(anchor), Some(0..2));
    }

    #[test]
    fn test_collapse_anchor_is_undoable() {
        let mut state = EditorState::new("a recieve b");
        let anchor = state.add_anchor(2..9, HighlightFace::Flagged);

        let other = state.add_anchor(10..11, HighlightFace::Flagged);

        assert_eq!(state.collapse_anchors(&[anchor, other]), 2);
        assert_eq!(state.anchor_range(anchor), Some(2..2));
        assert_eq!(state.anchor_range(other), Some(10..10));
        assert_eq!(state.anchor_face(anchor), Some(OverlayFace::None));
        assert_eq!(state.text_string(), "a recieve b");

        // One undo restores both spans
        assert!(state.undo());
        assert_eq!(state.anchor_range(anchor), Some(2..9));
        assert_eq!(state.anchor_range(other), Some(10..11));

        assert!(state.redo());
        assert_eq!(state.anchor_range(anchor), Some(2..2));
    }

    #[test]
    fn test_collapse_missing_anchor() {
        let mut state = EditorState::new("abc");
        let anchor = state.add_anchor(0..1, HighlightFace::Flagged);
        state.remove_anchor(anchor);
        assert_eq!(state.collapse_anchors(&[anchor]), 0);
        assert!(!state.set_anchor_face(anchor, HighlightFace::Neutral));
        assert!(!state.undo());
    }

    #[test]
    fn test_selection_follows_edits_and_clamps() {
        let mut state = EditorState::new("hello world");
        state.set_selection(6..11);
        state.insert(0, ">> ");
        assert_eq!(state.selection(), 9..14);

        state.delete(0..10);
        assert_eq!(state.selection(), 0..4);

        state.set_selection(3..100);
        assert_eq!(state.selection(), 3..state.len());
    }

    #[test]
    fn test_scroll_into_view_centers_far_lines() {
        let text = (0..100).map(|i| format!("line {i}\n")).collect::<String>();
        let mut state = EditorState::new(&text);
        state.set_viewport_height(10);

        let offset = state.line_col_to_offset(50, 0);
        state.scroll_into_view(offset..offset + 4);
        assert_eq!(state.top_line(), 45);

        // Already visible: no scroll
        let offset = state.line_col_to_offset(47, 0);
        state.scroll_into_view(offset..offset);
        assert_eq!(state.top_line(), 45);
    }
}
