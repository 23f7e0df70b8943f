//! Resolution at a viewport point (right-click on something that is not a
//! video element, e.g. an overlay above it).

use crate::page::{Document, NodeId, Point};
use crate::scanner::{candidate_for, ScanOptions, VideoCandidate};

/// A wrapper counts as "this video's card" only while it is less than this
/// many times the video's size on both axes.
pub const DEFAULT_CONTAINER_RATIO: f64 = 2.0;

/// Walks the element stack at `point`, topmost first, and returns the first
/// element that is itself a sourced video or that tightly wraps one.
pub fn resolve_target_at_position(
    doc: &dyn Document,
    point: Point,
    container_ratio: f64,
    opts: &ScanOptions,
) -> Option<VideoCandidate> {
    let viewport = doc.viewport();
    let found = doc
        .elements_at(point)
        .into_iter()
        .find_map(|node| video_for(doc, node, container_ratio))
        .and_then(|video| candidate_for(doc, video, viewport, opts));
    match &found {
        Some(c) => tracing::debug!(x = point.x, y = point.y, handle = %c.handle, "video at position"),
        None => tracing::debug!(x = point.x, y = point.y, "no video at position"),
    }
    found
}

fn video_for(doc: &dyn Document, node: NodeId, ratio: f64) -> Option<NodeId> {
    if doc.is_video(node) {
        return has_source(doc, node).then_some(node);
    }
    let video = doc.first_descendant_video(node)?;
    if !has_source(doc, video) {
        return None;
    }
    let outer = doc.bounding_rect(node);
    let inner = doc.bounding_rect(video);
    (outer.width < inner.width * ratio && outer.height < inner.height * ratio).then_some(video)
}

fn has_source(doc: &dyn Document, node: NodeId) -> bool {
    doc.video_source(node)
        .map_or(false, |s| !s.trim().is_empty())
}
