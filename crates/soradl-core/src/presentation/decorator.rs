//! Per-video "Download" buttons.
//!
//! The host page loads cards asynchronously, so decoration is re-run on a
//! timer and on mutation signals; each pass only reports videos that are
//! new or whose source changed.

use std::collections::HashMap;

use crate::page::{Document, ElementHandle, NodeId};

/// Where the button overlay is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// An existing relatively/absolutely positioned ancestor.
    Positioned(ElementHandle),
    /// No such ancestor: the video gets wrapped in a positioned box.
    Wrapper,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    pub video: ElementHandle,
    pub anchor: Anchor,
    pub source_url: String,
}

#[derive(Debug, Default)]
pub struct Decorator {
    decorated: HashMap<ElementHandle, Decoration>,
}

impl Decorator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decorates every sourced video of the top-level document not yet
    /// decorated. Returns only the decorations added in this pass.
    pub fn decorate(&mut self, doc: &dyn Document) -> Vec<Decoration> {
        let mut present = Vec::new();
        let mut added = Vec::new();
        for node in doc.videos() {
            let Some(src) = doc.video_source(node).filter(|s| !s.trim().is_empty()) else {
                continue;
            };
            let handle = doc.handle(node);
            present.push(handle);
            if self
                .decorated
                .get(&handle)
                .map_or(false, |d| d.source_url == src)
            {
                continue;
            }
            let decoration = Decoration {
                video: handle,
                anchor: anchor_for(doc, node),
                source_url: src.to_string(),
            };
            self.decorated.insert(handle, decoration.clone());
            added.push(decoration);
        }
        self.decorated.retain(|h, _| present.contains(h));
        if !added.is_empty() {
            tracing::debug!(added = added.len(), total = self.decorated.len(), "decorated videos");
        }
        added
    }

    pub fn get(&self, video: ElementHandle) -> Option<&Decoration> {
        self.decorated.get(&video)
    }

    pub fn len(&self) -> usize {
        self.decorated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decorated.is_empty()
    }

    pub fn clear(&mut self) {
        self.decorated.clear();
    }
}

/// Nearest positioned ancestor. The direct parent always counts, even
/// `<body>`; further up, the walk stops below `<body>`.
fn anchor_for(doc: &dyn Document, video: NodeId) -> Anchor {
    let Some(parent) = doc.parent(video) else {
        return Anchor::Wrapper;
    };
    let above = std::iter::successors(doc.parent(parent), |&n| doc.parent(n))
        .take_while(|&n| !matches!(doc.tag(n), Some("body") | Some("html")));
    std::iter::once(parent)
        .chain(above)
        .find(|&n| doc.position_style(n).is_anchor())
        .map(|n| Anchor::Positioned(doc.handle(n)))
        .unwrap_or(Anchor::Wrapper)
}
