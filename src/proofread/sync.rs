//! Keeps problem highlights in step with document edits

use super::evaluator::is_solved;
use super::registry::ProblemRegistry;
use crate::host::EditorHost;
use crate::view::overlay::HighlightFace;

/// Re-draw every live problem span: flagged while open, neutral once solved.
///
/// Runs after every modification. Only faces change; the registry is
/// untouched, so calling this redundantly is harmless. Returns the number
/// of problems still open.
pub fn sync_highlights(registry: &ProblemRegistry, host: &mut dyn EditorHost) -> usize {
    let mut open = 0;
    for problem in registry.iter() {
        if host.anchor_range(problem.anchor).is_none() {
            continue;
        }
        let face = if is_solved(problem, host) {
            HighlightFace::Neutral
        } else {
            open += 1;
            HighlightFace::Flagged
        };
        host.set_anchor_face(problem.anchor, face);
    }
    tracing::trace!("Synced {} problem highlights, {} open", registry.len(), open);
    open
}
