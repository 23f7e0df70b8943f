//! "Force detect" selection used by the dedicated shortcut: ignores
//! interaction state and prefers playing, then largest, videos.

use crate::scanner::{CandidateSet, VideoCandidate};

/// Among candidates with a non-empty box, the first playing one, otherwise
/// the one with the largest area (earliest wins ties).
pub fn force_detect(candidates: &CandidateSet) -> Option<VideoCandidate> {
    let laid_out: Vec<&VideoCandidate> = candidates.iter().filter(|c| !c.rect.is_empty()).collect();
    if let Some(playing) = laid_out.iter().find(|c| c.is_playing) {
        return Some((*playing).clone());
    }
    laid_out
        .into_iter()
        .reduce(|best, c| if c.rect.area() > best.rect.area() { c } else { best })
        .cloned()
}
