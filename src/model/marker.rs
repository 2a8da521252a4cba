//! Content-anchored positions
//!
//! A marker is a byte offset that follows the text it was placed next to.
//! Edits before a marker shift it, deletions spanning it collapse it onto the
//! deletion point, and insertions exactly at a marker are resolved by the
//! marker's affinity.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque handle for an anchored span, returned by the host at creation.
/// Stable across text edits (unlike offset-based identifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnchorId(pub u64);

/// Unique identifier for a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u64);

#[derive(Debug, Clone, Copy)]
struct Marker {
    position: usize,
    /// Left affinity: text inserted at the marker's position goes after it
    left_affinity: bool,
}

/// Set of markers for one buffer
#[derive(Debug, Clone, Default)]
pub struct MarkerList {
    markers: BTreeMap<MarkerId, Marker>,
    next_id: u64,
    buffer_size: usize,
}

impl MarkerList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current buffer length; new markers are clamped to it
    pub fn set_buffer_size(&mut self, size: usize) {
        self.buffer_size = size;
    }

    /// Create a marker at `position`
    ///
    /// `left_affinity` markers stay put when text is inserted exactly at their
    /// position; right affinity markers move past the inserted text.
    pub fn create(&mut self, position: usize, left_affinity: bool) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.markers.insert(
            id,
            Marker {
                position: position.min(self.buffer_size),
                left_affinity,
            },
        );
        id
    }

    pub fn delete(&mut self, id: MarkerId) -> bool {
        self.markers.remove(&id).is_some()
    }

    pub fn get_position(&self, id: MarkerId) -> Option<usize> {
        self.markers.get(&id).map(|m| m.position)
    }

    /// Move a marker explicitly (used when an anchor is collapsed or restored)
    pub fn set_position(&mut self, id: MarkerId, position: usize) -> bool {
        let buffer_size = self.buffer_size;
        match self.markers.get_mut(&id) {
            Some(marker) => {
                marker.position = position.min(buffer_size);
                true
            }
            None => false,
        }
    }

    /// Shift markers for `len` bytes inserted at `position`
    ///
    /// Must be called before the buffer itself changes.
    pub fn adjust_for_insert(&mut self, position: usize, len: usize) {
        if len == 0 {
            return;
        }
        for marker in self.markers.values_mut() {
            if marker.position > position || (marker.position == position && !marker.left_affinity)
            {
                marker.position += len;
            }
        }
        self.buffer_size += len;
    }

    /// Shift markers for `len` bytes deleted starting at `position`
    ///
    /// Markers inside the deleted range collapse onto `position`.
    pub fn adjust_for_delete(&mut self, position: usize, len: usize) {
        if len == 0 {
            return;
        }
        let end = position + len;
        for marker in self.markers.values_mut() {
            if marker.position >= end {
                marker.position -= len;
            } else if marker.position > position {
                marker.position = position;
            }
        }
        self.buffer_size = self.buffer_size.saturating_sub(len);
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
