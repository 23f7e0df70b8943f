//! Abstract page model.
//!
//! The resolution core never talks to a live DOM. Everything it needs
//! (element tree, geometry, playback state, frame access) goes through the
//! [`Document`] trait. [`PageSnapshot`] is the in-memory implementation used
//! by the CLI and the tests.

mod document;
mod geometry;
mod snapshot;

pub use document::{find_frame, Document, FrameAccessError, PositionStyle};
pub use geometry::{Point, Rect, Viewport};
pub use snapshot::{ElementSpec, PageSnapshot, PageSpec, VideoSpec};

use serde::{Deserialize, Serialize};

/// Identifies a document: `FrameId(0)` is the top-level page, nested frames
/// get increasing ids in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FrameId(pub u32);

impl FrameId {
    pub const TOP: FrameId = FrameId(0);
}

/// Index of an element inside its document (pre-order, document order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Opaque reference to an element in some document of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle {
    pub frame: FrameId,
    pub node: NodeId,
}

impl ElementHandle {
    pub fn new(frame: FrameId, node: NodeId) -> Self {
        Self { frame, node }
    }

    /// Handle to an element of the top-level document.
    pub fn top(node: u32) -> Self {
        Self::new(FrameId::TOP, NodeId(node))
    }
}

impl std::fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.frame.0, self.node.0)
    }
}

/// Parses `frame:node`, or a bare `node` in the top-level document.
impl std::str::FromStr for ElementHandle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|e| format!("invalid element handle {s:?}: {e}"))
        };
        match s.split_once(':') {
            Some((frame, node)) => Ok(Self::new(FrameId(parse(frame)?), NodeId(parse(node)?))),
            None => Ok(Self::top(parse(s)?)),
        }
    }
}

/// Media playback state of a video element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    #[serde(default = "default_paused")]
    pub paused: bool,
    #[serde(default)]
    pub ended: bool,
    #[serde(default)]
    pub current_time: f64,
}

fn default_paused() -> bool {
    true
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            paused: true,
            ended: false,
            current_time: 0.0,
        }
    }
}

impl PlaybackState {
    /// Not paused, not ended and past the first frame.
    pub fn is_playing(&self) -> bool {
        !self.paused && !self.ended && self.current_time > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playing_requires_progress() {
        let fresh = PlaybackState {
            paused: false,
            ended: false,
            current_time: 0.0,
        };
        assert!(!fresh.is_playing());

        let running = PlaybackState {
            current_time: 1.5,
            ..fresh
        };
        assert!(running.is_playing());

        let ended = PlaybackState {
            ended: true,
            ..running
        };
        assert!(!ended.is_playing());
    }

    #[test]
    fn handle_display() {
        assert_eq!(ElementHandle::top(7).to_string(), "0:7");
    }

    #[test]
    fn handle_parse() {
        assert_eq!("2:5".parse::<ElementHandle>(), Ok(ElementHandle::new(FrameId(2), NodeId(5))));
        assert_eq!("9".parse::<ElementHandle>(), Ok(ElementHandle::top(9)));
        assert!("a:1".parse::<ElementHandle>().is_err());
        assert!("1:".parse::<ElementHandle>().is_err());
    }
}
