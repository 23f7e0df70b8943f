//! Video candidate scanner.
//!
//! Walks the top-level document and every nested frame it is allowed to
//! enter, collecting video elements that carry a source. Cross-origin
//! frames are skipped; that is the browser's security boundary, not an
//! error.

mod candidate;
mod report;

pub use candidate::{CandidateSet, VideoCandidate};
pub use report::describe_videos;

use crate::page::{Document, NodeId, Point, Rect, Viewport};

/// Boxes at or below this size (either axis) never count as visible.
pub const DEFAULT_MIN_VISIBLE_PX: f64 = 50.0;

#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    pub min_visible_px: f64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            min_visible_px: DEFAULT_MIN_VISIBLE_PX,
        }
    }
}

/// Collects every sourced video on the page. Returns an empty set, never an
/// error, when there are none.
pub fn scan(doc: &dyn Document, opts: &ScanOptions) -> CandidateSet {
    let mut candidates = Vec::new();
    collect(doc, opts, Point::default(), &mut candidates);
    tracing::debug!(
        count = candidates.len(),
        visible = candidates.iter().filter(|c| c.is_visible).count(),
        "scan complete"
    );
    CandidateSet::new(doc.viewport(), candidates)
}

/// `page_offset` is the top-left of `doc` in top-level page coordinates.
fn collect(
    doc: &dyn Document,
    opts: &ScanOptions,
    page_offset: Point,
    out: &mut Vec<VideoCandidate>,
) {
    let viewport = doc.viewport();
    for node in doc.videos() {
        if let Some(mut candidate) = candidate_for(doc, node, viewport, opts) {
            candidate.page_rect = candidate.rect.offset(page_offset);
            out.push(candidate);
        }
    }
    for frame in doc.frames() {
        match frame {
            Ok(child) => {
                let at = child.frame_offset();
                let offset = Point::new(page_offset.x + at.x, page_offset.y + at.y);
                collect(child, opts, offset, out)
            }
            Err(e) => tracing::debug!("skipping frame: {}", e),
        }
    }
}

/// Builds the candidate for one video element; `None` when it has no source.
///
/// `page_rect` is left equal to `rect`; [`scan`] shifts it for nested frames.
pub fn candidate_for(
    doc: &dyn Document,
    node: NodeId,
    viewport: Viewport,
    opts: &ScanOptions,
) -> Option<VideoCandidate> {
    let src = doc.video_source(node)?;
    if src.trim().is_empty() {
        return None;
    }
    let rect = doc.bounding_rect(node);
    Some(VideoCandidate {
        handle: doc.handle(node),
        source_url: src.to_string(),
        rect,
        page_rect: rect,
        is_playing: doc.playback(node).is_playing(),
        is_visible: is_visible(&rect, viewport, opts.min_visible_px),
    })
}

/// Larger than `min_px` on both axes and entirely inside the viewport.
pub fn is_visible(rect: &Rect, viewport: Viewport, min_px: f64) -> bool {
    rect.width > min_px && rect.height > min_px && viewport.fully_contains(rect)
}
