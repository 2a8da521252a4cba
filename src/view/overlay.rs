pub use crate::model::marker::AnchorId;
use crate::model::marker::{MarkerId, MarkerList};
use ratatui::style::Color;
use std::ops::Range;

/// Semantic highlight requested by the proofreading core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightFace {
    /// Problem is open: outlined marker, no fill
    Flagged,
    /// Problem is resolved: no visible decoration
    Neutral,
}

/// Overlay face - defines the visual appearance of an overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayFace {
    /// Outline around the text, background untouched
    Outline { color: Color },
    /// Tracked but not drawn
    None,
}

impl OverlayFace {
    pub fn is_visible(&self) -> bool {
        !matches!(self, OverlayFace::None)
    }
}

/// Colors used to draw semantic highlights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightPalette {
    pub flagged: Color,
}

impl HighlightPalette {
    pub fn resolve(&self, face: HighlightFace) -> OverlayFace {
        match face {
            HighlightFace::Flagged => OverlayFace::Outline {
                color: self.flagged,
            },
            HighlightFace::Neutral => OverlayFace::None,
        }
    }
}

impl Default for HighlightPalette {
    fn default() -> Self {
        Self {
            flagged: Color::Rgb(220, 120, 40),
        }
    }
}

/// An overlay is a decorated span of text
/// Uses markers for content-anchored positions that automatically adjust with edits
#[derive(Debug, Clone)]
pub struct Overlay {
    pub anchor: AnchorId,

    /// Start marker (left affinity - stays before inserted text)
    pub start_marker: MarkerId,

    /// End marker (right affinity - moves after inserted text)
    pub end_marker: MarkerId,

    pub face: OverlayFace,
}

impl Overlay {
    /// Create a new overlay with markers at the given range
    pub fn new(
        marker_list: &mut MarkerList,
        anchor: AnchorId,
        range: Range<usize>,
        face: OverlayFace,
    ) -> Self {
        let start_marker = marker_list.create(range.start, true); // left affinity
        let end_marker = marker_list.create(range.end, false); // right affinity

        Self {
            anchor,
            start_marker,
            end_marker,
            face,
        }
    }

    /// Get the current byte range by resolving markers
    pub fn range(&self, marker_list: &MarkerList) -> Option<Range<usize>> {
        let start = marker_list.get_position(self.start_marker)?;
        let end = marker_list.get_position(self.end_marker)?;
        Some(start..end.max(start))
    }

    /// Reposition both markers
    pub fn set_range(&self, range: Range<usize>, marker_list: &mut MarkerList) -> bool {
        marker_list.set_position(self.start_marker, range.start)
            && marker_list.set_position(self.end_marker, range.end.max(range.start))
    }
}

/// Manages the overlays of one document
#[derive(Debug, Clone, Default)]
pub struct OverlayManager {
    overlays: Vec<Overlay>,
    next_anchor: u64,
}

impl OverlayManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an overlay over `range` and return the anchor that identifies it
    pub fn add(
        &mut self,
        marker_list: &mut MarkerList,
        range: Range<usize>,
        face: OverlayFace,
    ) -> AnchorId {
        let anchor = AnchorId(self.next_anchor);
        self.next_anchor += 1;
        self.overlays
            .push(Overlay::new(marker_list, anchor, range, face));
        anchor
    }

    /// Remove an overlay and its markers
    pub fn remove(&mut self, anchor: AnchorId, marker_list: &mut MarkerList) -> bool {
        if let Some(pos) = self.overlays.iter().position(|o| o.anchor == anchor) {
            let overlay = self.overlays.remove(pos);
            marker_list.delete(overlay.start_marker);
            marker_list.delete(overlay.end_marker);
            true
        } else {
            false
        }
    }

    /// Clear all overlays and their markers
    pub fn clear(&mut self, marker_list: &mut MarkerList) {
        for overlay in &self.overlays {
            marker_list.delete(overlay.start_marker);
            marker_list.delete(overlay.end_marker);
        }
        self.overlays.clear();
    }

    pub fn get(&self, anchor: AnchorId) -> Option<&Overlay> {
        self.overlays.iter().find(|o| o.anchor == anchor)
    }

    pub fn get_mut(&mut self, anchor: AnchorId) -> Option<&mut Overlay> {
        self.overlays.iter_mut().find(|o| o.anchor == anchor)
    }

    /// Shift overlay markers for `len` bytes inserted at `position`
    ///
    /// Overlays already collapsed at `position` stay collapsed; the inserted
    /// text lands after them. Must be called before the buffer changes.
    pub fn adjust_for_insert(&self, marker_list: &mut MarkerList, position: usize, len: usize) {
        let collapsed: Vec<MarkerId> = self
            .overlays
            .iter()
            .filter(|o| {
                o.range(marker_list)
                    .is_some_and(|r| r.is_empty() && r.start == position)
            })
            .map(|o| o.end_marker)
            .collect();
        marker_list.adjust_for_insert(position, len);
        for end_marker in collapsed {
            marker_list.set_position(end_marker, position);
        }
    }

    /// Overlays whose range overlaps or touches `range`
    pub fn touching(
        &self,
        range: &Range<usize>,
        marker_list: &MarkerList,
    ) -> Vec<(AnchorId, Range<usize>)> {
        self.overlays
            .iter()
            .filter_map(|o| Some((o.anchor, o.range(marker_list)?)))
            .filter(|(_, r)| r.start <= range.end && r.end >= range.start)
            .collect()
    }

    /// Overlays that are currently drawn, with their resolved ranges
    pub fn visible(&self, marker_list: &MarkerList) -> Vec<(AnchorId, Range<usize>)> {
        self.overlays
            .iter()
            .filter(|o| o.face.is_visible())
            .filter_map(|o| Some((o.anchor, o.range(marker_list)?)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}
