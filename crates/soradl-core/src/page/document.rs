//! The candidate-provider interface the core is written against.

use serde::{Deserialize, Serialize};

use super::{ElementHandle, FrameId, NodeId, PlaybackState, Point, Rect, Viewport};

/// A nested frame could not be entered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameAccessError {
    /// Same-origin policy blocks access to the frame's document.
    #[error("frame {frame:?} is cross-origin ({origin})")]
    CrossOrigin { frame: FrameId, origin: String },
}

/// Computed CSS `position` of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionStyle {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

impl PositionStyle {
    /// Whether an absolutely positioned overlay can anchor to this element.
    pub fn is_anchor(&self) -> bool {
        matches!(self, PositionStyle::Relative | PositionStyle::Absolute)
    }
}

/// Read-only view of one document (top-level page or nested frame).
///
/// Node ids are only meaningful for the document that produced them.
/// Queries on unknown ids return empty/default values rather than failing,
/// since handles recorded earlier may refer to elements that are gone.
pub trait Document {
    fn frame_id(&self) -> FrameId;

    fn viewport(&self) -> Viewport;

    /// Top-left of this document's frame box in the parent document's
    /// coordinates. Zero for the top-level page.
    fn frame_offset(&self) -> Point;

    /// All video elements, in document order.
    fn videos(&self) -> Vec<NodeId>;

    /// Nested frames in document order, or why each cannot be entered.
    fn frames(&self) -> Vec<Result<&dyn Document, FrameAccessError>>;

    /// Lower-case tag name; `None` for unknown nodes.
    fn tag(&self, node: NodeId) -> Option<&str>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// First video strictly below `node`, in document order.
    fn first_descendant_video(&self, node: NodeId) -> Option<NodeId>;

    fn bounding_rect(&self, node: NodeId) -> Rect;

    /// The element's `src`, if it is a video and has one.
    fn video_source(&self, node: NodeId) -> Option<&str>;

    fn playback(&self, node: NodeId) -> PlaybackState;

    /// Intrinsic media size (`videoWidth` x `videoHeight`).
    fn intrinsic_size(&self, node: NodeId) -> (u32, u32);

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    fn has_attribute(&self, node: NodeId, name: &str) -> bool;

    fn position_style(&self, node: NodeId) -> PositionStyle;

    /// Elements whose box contains `point`, topmost first.
    fn elements_at(&self, point: Point) -> Vec<NodeId>;

    fn is_video(&self, node: NodeId) -> bool {
        self.tag(node) == Some("video")
    }

    fn handle(&self, node: NodeId) -> ElementHandle {
        ElementHandle::new(self.frame_id(), node)
    }
}

/// Finds the (accessible) document with the given frame id, searching
/// nested frames depth-first.
pub fn find_frame(doc: &dyn Document, frame: FrameId) -> Option<&dyn Document> {
    if doc.frame_id() == frame {
        return Some(doc);
    }
    doc.frames()
        .into_iter()
        .filter_map(Result::ok)
        .find_map(|child| find_frame(child, frame))
}
