use crate::model::marker::AnchorId;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Undoable document changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Insert text at a position
    Insert { position: usize, text: String },

    /// Delete a range of text
    Delete {
        range: Range<usize>,
        deleted_text: String,
    },

    /// Move an anchor's span explicitly (e.g. collapsing it when a problem is ignored)
    MoveAnchor {
        anchor: AnchorId,
        old_range: Range<usize>,
        new_range: Range<usize>,
    },

    /// Batch of events that should be undone/redone atomically
    Batch {
        events: Vec<Event>,
        description: String,
    },
}

impl Event {
    /// Returns the inverse event for undo
    pub fn inverse(&self) -> Self {
        match self {
            Self::Insert { position, text } => Self::Delete {
                range: *position..(position + text.len()),
                deleted_text: text.clone(),
            },
            Self::Delete {
                range,
                deleted_text,
            } => Self::Insert {
                position: range.start,
                text: deleted_text.clone(),
            },
            Self::MoveAnchor {
                anchor,
                old_range,
                new_range,
            } => Self::MoveAnchor {
                anchor: *anchor,
                old_range: new_range.clone(),
                new_range: old_range.clone(),
            },
            Self::Batch {
                events,
                description,
            } => Self::Batch {
                // Invert all events in the batch in reverse order
                events: events.iter().rev().map(Self::inverse).collect(),
                description: format!("Undo: {description}"),
            },
        }
    }

}

/// Linear undo history
///
/// Appending after an undo discards the redo tail.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Vec<Event>,
    current_index: usize,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event to the log, returning its index
    pub fn append(&mut self, event: Event) -> usize {
        if self.current_index < self.entries.len() {
            self.entries.truncate(self.current_index);
        }
        self.entries.push(event);
        self.current_index = self.entries.len();
        self.current_index - 1
    }

    pub fn can_undo(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current_index < self.entries.len()
    }

    /// Step back one entry, returning the event that reverts it
    pub fn undo(&mut self) -> Option<Event> {
        if !self.can_undo() {
            return None;
        }
        self.current_index -= 1;
        Some(self.entries[self.current_index].inverse())
    }

    /// Step forward one entry, returning the event to re-apply
    pub fn redo(&mut self) -> Option<Event> {
        if !self.can_redo() {
            return None;
        }
        let event = self.entries[self.current_index].clone();
        self.current_index += 1;
        Some(event)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
