//! Scan output types.

use serde::Serialize;

use crate::filename::is_valid_source;
use crate::page::{ElementHandle, Rect, Viewport};

/// One video element eligible for selection, captured at scan time.
///
/// Candidates are rebuilt on every scan and never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoCandidate {
    pub handle: ElementHandle,
    pub source_url: String,
    /// Layout box in the owning document's coordinates.
    pub rect: Rect,
    /// The same box in top-level page coordinates.
    pub page_rect: Rect,
    pub is_playing: bool,
    pub is_visible: bool,
}

impl VideoCandidate {
    /// Non-empty, absolute http(s) source.
    pub fn has_valid_source(&self) -> bool {
        is_valid_source(&self.source_url)
    }
}

/// Result of one scan pass over a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateSet {
    pub viewport: Viewport,
    /// Document order; top-level videos first, then each accessible frame's.
    pub candidates: Vec<VideoCandidate>,
}

impl CandidateSet {
    pub fn new(viewport: Viewport, candidates: Vec<VideoCandidate>) -> Self {
        Self {
            viewport,
            candidates,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VideoCandidate> {
        self.candidates.iter()
    }

    /// The candidate scanned for `handle`, if the element is still present
    /// and still has a source.
    pub fn get(&self, handle: ElementHandle) -> Option<&VideoCandidate> {
        self.candidates.iter().find(|c| c.handle == handle)
    }

    /// Candidates whose source passes URL validation, in order.
    pub fn valid(&self) -> impl Iterator<Item = &VideoCandidate> {
        self.candidates.iter().filter(|c| c.has_valid_source())
    }
}
