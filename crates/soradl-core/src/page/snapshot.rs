//! In-memory page snapshot.
//!
//! A snapshot is a serialized element tree (JSON) with layout boxes and media
//! state, as captured from a rendered page. Nested frames carry their own
//! origin; frames whose origin differs from the top document behave like a
//! real cross-origin frame and refuse access.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::document::{Document, FrameAccessError, PositionStyle};
use super::{FrameId, NodeId, PlaybackState, Point, Rect, Viewport};

/// Serialized form of one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSpec {
    /// `scheme://host[:port]` of the document.
    pub origin: String,
    /// Defaults to 1280x720 for the top page and to the frame box for frames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
    pub root: ElementSpec,
}

impl PageSpec {
    pub fn new(origin: &str, viewport: Viewport, root: ElementSpec) -> Self {
        Self {
            origin: origin.to_string(),
            viewport: Some(viewport),
            root,
        }
    }
}

/// Media attributes of a `<video>` element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoSpec {
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub playback: PlaybackState,
    #[serde(default)]
    pub video_width: u32,
    #[serde(default)]
    pub video_height: u32,
}

/// Serialized form of one element and its subtree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementSpec {
    pub tag: String,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub rect: Rect,
    #[serde(default)]
    pub z_index: i32,
    #[serde(default)]
    pub position: PositionStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoSpec>,
    /// Content document of an `<iframe>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<Box<PageSpec>>,
    #[serde(default)]
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// A paused `<video>` with the given source.
    pub fn video(src: &str, rect: Rect) -> Self {
        let mut el = Self::new("video").with_rect(rect);
        el.video = Some(VideoSpec {
            src: (!src.is_empty()).then(|| src.to_string()),
            playback: PlaybackState::default(),
            video_width: rect.width as u32,
            video_height: rect.height as u32,
        });
        el
    }

    pub fn iframe(rect: Rect, content: PageSpec) -> Self {
        let mut el = Self::new("iframe").with_rect(rect);
        el.frame = Some(Box::new(content));
        el
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_position(mut self, position: PositionStyle) -> Self {
        self.position = position;
        self
    }

    pub fn with_z(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }

    /// Marks a video as playing at `current_time` seconds.
    pub fn playing(mut self, current_time: f64) -> Self {
        if let Some(v) = self.video.as_mut() {
            v.playback = PlaybackState {
                paused: false,
                ended: false,
                current_time,
            };
        }
        self
    }
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    rect: Rect,
    z_index: i32,
    position: PositionStyle,
    video: Option<VideoSpec>,
    parent: Option<NodeId>,
    /// One past the last descendant (nodes are stored in pre-order).
    subtree_end: u32,
}

#[derive(Debug, Clone)]
struct FrameSlot {
    id: FrameId,
    origin: String,
    accessible: bool,
    doc: PageSnapshot,
}

/// Flattened, queryable page built from a [`PageSpec`].
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    frame_id: FrameId,
    offset: Point,
    viewport: Viewport,
    nodes: Vec<Node>,
    frames: Vec<FrameSlot>,
}

impl PageSnapshot {
    pub fn from_spec(spec: PageSpec) -> Self {
        let top_origin = spec.origin.clone();
        let mut next_frame = 1;
        Self::build(spec, FrameId::TOP, &top_origin, None, &mut next_frame)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let spec: PageSpec = serde_json::from_str(json).context("invalid page snapshot JSON")?;
        Ok(Self::from_spec(spec))
    }

    /// Load a snapshot file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading page snapshot {}", path.display()))?;
        Self::from_json(&data).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn build(
        spec: PageSpec,
        frame_id: FrameId,
        top_origin: &str,
        frame_box: Option<Rect>,
        next_frame: &mut u32,
    ) -> Self {
        // The top page has no frame box: default viewport, zero offset.
        let (offset, fallback) = match frame_box {
            Some(r) => (Point::new(r.left, r.top), Viewport::new(r.width, r.height)),
            None => (Point::default(), Viewport::default()),
        };
        let mut page = PageSnapshot {
            frame_id,
            offset,
            viewport: spec.viewport.unwrap_or(fallback),
            nodes: Vec::new(),
            frames: Vec::new(),
        };
        page.push(spec.root, None, top_origin, next_frame);
        page
    }

    fn push(
        &mut self,
        spec: ElementSpec,
        parent: Option<NodeId>,
        top_origin: &str,
        next_frame: &mut u32,
    ) {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            tag: spec.tag.to_ascii_lowercase(),
            classes: spec.classes,
            attributes: spec.attributes,
            rect: spec.rect,
            z_index: spec.z_index,
            position: spec.position,
            video: spec.video,
            parent,
            subtree_end: id.0 + 1,
        });

        if let Some(content) = spec.frame {
            let frame = FrameId(*next_frame);
            *next_frame += 1;
            let origin = content.origin.clone();
            let doc = Self::build(*content, frame, top_origin, Some(spec.rect), next_frame);
            self.frames.push(FrameSlot {
                id: frame,
                accessible: origin == top_origin,
                origin,
                doc,
            });
        }

        for child in spec.children {
            self.push(child, Some(id), top_origin, next_frame);
        }
        let end = self.nodes.len() as u32;
        self.nodes[id.0 as usize].subtree_end = end;
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }
}

impl Document for PageSnapshot {
    fn frame_id(&self) -> FrameId {
        self.frame_id
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn frame_offset(&self) -> Point {
        self.offset
    }

    fn videos(&self) -> Vec<NodeId> {
        (0..self.nodes.len() as u32)
            .map(NodeId)
            .filter(|&id| self.is_video(id))
            .collect()
    }

    fn frames(&self) -> Vec<Result<&dyn Document, FrameAccessError>> {
        self.frames
            .iter()
            .map(|slot| {
                if slot.accessible {
                    Ok(&slot.doc as &dyn Document)
                } else {
                    Err(FrameAccessError::CrossOrigin {
                        frame: slot.id,
                        origin: slot.origin.clone(),
                    })
                }
            })
            .collect()
    }

    fn tag(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|n| n.tag.as_str())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    fn first_descendant_video(&self, node: NodeId) -> Option<NodeId> {
        let end = self.node(node)?.subtree_end;
        (node.0 + 1..end).map(NodeId).find(|&id| self.is_video(id))
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        self.node(node).map(|n| n.rect).unwrap_or_default()
    }

    fn video_source(&self, node: NodeId) -> Option<&str> {
        self.node(node)?.video.as_ref()?.src.as_deref()
    }

    fn playback(&self, node: NodeId) -> PlaybackState {
        self.node(node)
            .and_then(|n| n.video.as_ref())
            .map(|v| v.playback)
            .unwrap_or_default()
    }

    fn intrinsic_size(&self, node: NodeId) -> (u32, u32) {
        self.node(node)
            .and_then(|n| n.video.as_ref())
            .map(|v| (v.video_width, v.video_height))
            .unwrap_or((0, 0))
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node)
            .map_or(false, |n| n.classes.iter().any(|c| c == class))
    }

    fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.node(node)
            .map_or(false, |n| n.attributes.contains_key(name))
    }

    fn position_style(&self, node: NodeId) -> PositionStyle {
        self.node(node).map(|n| n.position).unwrap_or_default()
    }

    fn elements_at(&self, point: Point) -> Vec<NodeId> {
        let mut hits: Vec<(u32, i32)> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| !n.rect.is_empty() && n.rect.contains(point))
            .map(|(i, n)| (i as u32, n.z_index))
            .collect();
        // Higher z-index first; within a layer, later in document order paints on top.
        hits.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
        hits.into_iter().map(|(i, _)| NodeId(i)).collect()
    }
}
