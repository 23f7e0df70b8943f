//! Capture-phase listener that records which video the user is aiming at.

use serde::{Deserialize, Serialize};

use crate::page::{find_frame, Document, NodeId};

use super::events::{EventKind, EventRegistry, PageEvent, Phase, SubscriptionId};
use super::state::{InteractionState, SharedState};

/// Selector-like predicate for elements the host page uses to wrap a video
/// card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerHint {
    Class(String),
    Attribute(String),
}

impl ContainerHint {
    pub fn class(name: &str) -> Self {
        ContainerHint::Class(name.to_string())
    }

    pub fn attribute(name: &str) -> Self {
        ContainerHint::Attribute(name.to_string())
    }

    fn matches(&self, doc: &dyn Document, node: NodeId) -> bool {
        match self {
            ContainerHint::Class(c) => doc.has_class(node, c),
            ContainerHint::Attribute(a) => doc.has_attribute(node, a),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerOptions {
    /// Ancestor levels searched for a video on pointer-over.
    pub hover_ancestor_depth: usize,
    /// Ancestor levels searched for a video on context-menu.
    pub context_ancestor_depth: usize,
    /// Card containers recognised on click.
    pub click_hints: Vec<ContainerHint>,
    /// Card containers recognised on context-menu, tried in order.
    pub context_hints: Vec<ContainerHint>,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            hover_ancestor_depth: 3,
            context_ancestor_depth: 5,
            click_hints: vec![
                ContainerHint::class("group"),
                ContainerHint::attribute("data-index"),
            ],
            context_hints: vec![
                ContainerHint::class("group"),
                ContainerHint::attribute("data-index"),
                ContainerHint::class("video-container"),
                ContainerHint::class("relative"),
            ],
        }
    }
}

/// A video found near an event target, and the container it was found in
/// (`None` when the target was the video itself).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Hit {
    container: Option<NodeId>,
    video: NodeId,
}

/// Keeps [`InteractionState`] current from pointer events.
pub struct InteractionTracker {
    state: SharedState,
    subscriptions: Vec<SubscriptionId>,
}

impl InteractionTracker {
    /// Subscribes to pointer-over, click and context-menu in the capture
    /// phase.
    pub fn attach(registry: &mut EventRegistry, state: SharedState, opts: TrackerOptions) -> Self {
        let subscriptions = [EventKind::PointerOver, EventKind::Click, EventKind::ContextMenu]
            .into_iter()
            .map(|kind| {
                let state = SharedState::clone(&state);
                let opts = opts.clone();
                registry.subscribe(kind, Phase::Capture, move |doc, event| {
                    observe(&mut state.borrow_mut(), &opts, doc, event);
                })
            })
            .collect();
        Self {
            state,
            subscriptions,
        }
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    pub fn detach(self, registry: &mut EventRegistry) {
        for id in self.subscriptions {
            registry.unsubscribe(id);
        }
    }
}

/// Applies one event to `state`. Last write wins; events that point at no
/// video leave the state untouched (except the right-click position).
pub fn observe(
    state: &mut InteractionState,
    opts: &TrackerOptions,
    root: &dyn Document,
    event: &PageEvent,
) {
    let Some(doc) = find_frame(root, event.target.frame) else {
        return;
    };
    let target = event.target.node;

    let hit = match event.kind {
        EventKind::PointerOver => near_target(doc, target, opts.hover_ancestor_depth),
        EventKind::Click => on_click(doc, target, &opts.click_hints),
        EventKind::ContextMenu => {
            state.record_right_click(event.client);
            on_context_menu(doc, target, opts)
        }
        EventKind::KeyDown => None,
    };

    if let Some(hit) = hit {
        let video = doc.handle(hit.video);
        match hit.container {
            Some(container) => state.record_container(doc.handle(container), video),
            None => state.record_video(video),
        }
        tracing::trace!(kind = ?event.kind, %video, "interaction target updated");
    }
}

/// The target itself, a video inside it, or a video inside one of its
/// first `depth` ancestors.
fn near_target(doc: &dyn Document, target: NodeId, depth: usize) -> Option<Hit> {
    if doc.is_video(target) {
        return Some(Hit {
            container: None,
            video: target,
        });
    }
    if let Some(video) = doc.first_descendant_video(target) {
        return Some(Hit {
            container: Some(target),
            video,
        });
    }
    ancestors(doc, target).take(depth).find_map(|ancestor| {
        doc.first_descendant_video(ancestor).map(|video| Hit {
            container: Some(ancestor),
            video,
        })
    })
}

fn on_click(doc: &dyn Document, target: NodeId, hints: &[ContainerHint]) -> Option<Hit> {
    // Only the first hint that matches an ancestor is considered.
    let container = hints.iter().find_map(|hint| closest(doc, target, hint))?;
    doc.first_descendant_video(container).map(|video| Hit {
        container: Some(container),
        video,
    })
}

fn on_context_menu(doc: &dyn Document, target: NodeId, opts: &TrackerOptions) -> Option<Hit> {
    if doc.is_video(target) {
        return Some(Hit {
            container: None,
            video: target,
        });
    }
    if let Some(video) = doc.first_descendant_video(target) {
        return Some(Hit {
            container: Some(target),
            video,
        });
    }
    let by_hint = opts.context_hints.iter().find_map(|hint| {
        let container = closest(doc, target, hint)?;
        doc.first_descendant_video(container).map(|video| Hit {
            container: Some(container),
            video,
        })
    });
    by_hint.or_else(|| near_target(doc, target, opts.context_ancestor_depth))
}

fn ancestors(doc: &dyn Document, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    std::iter::successors(doc.parent(node), move |&n| doc.parent(n))
}

/// Nearest ancestor-or-self matching `hint`.
fn closest(doc: &dyn Document, node: NodeId, hint: &ContainerHint) -> Option<NodeId> {
    std::iter::once(node)
        .chain(ancestors(doc, node))
        .find(|&n| hint.matches(doc, n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{ElementHandle, ElementSpec, PageSnapshot, PageSpec, Point, Rect, Viewport};

    // body(0)
    //   section(1)
    //     div.group(2)
    //       video(3)
    //       div.overlay(4)
    //         span(5)
    //   div(6)
    //     div(7) > div(8) > div(9) > div(10) > span(11)
    //   div[data-index](12)
    //     p(13)
    fn page() -> PageSnapshot {
        let card = ElementSpec::new("div")
            .with_class("group")
            .with_child(ElementSpec::video(
                "https://cdn.example.com/task_aaaaaaaaaa/v.mp4",
                Rect::new(0.0, 0.0, 300.0, 200.0),
            ))
            .with_child(ElementSpec::new("div").with_child(ElementSpec::new("span")));
        let deep = ElementSpec::new("div").with_child(
            ElementSpec::new("div").with_child(
                ElementSpec::new("div").with_child(
                    ElementSpec::new("div").with_child(ElementSpec::new("span")),
                ),
            ),
        );
        let indexed = ElementSpec::new("div")
            .with_attr("data-index", "4")
            .with_child(ElementSpec::new("p"));
        let root = ElementSpec::new("body")
            .with_child(ElementSpec::new("section").with_child(card))
            .with_child(ElementSpec::new("div").with_child(deep))
            .with_child(indexed);
        PageSnapshot::from_spec(PageSpec::new("https://sora.com", Viewport::default(), root))
    }

    fn fire(state: &mut InteractionState, kind: EventKind, node: u32) {
        let doc = page();
        let ev = PageEvent::pointer(kind, ElementHandle::top(node), Point::new(12.0, 34.0));
        observe(state, &TrackerOptions::default(), &doc, &ev);
    }

    #[test]
    fn hover_on_video_records_video_only() {
        let mut s = InteractionState::default();
        fire(&mut s, EventKind::PointerOver, 3);
        assert_eq!(s.last_hovered_video, Some(ElementHandle::top(3)));
        assert_eq!(s.last_focused_container, None);
    }

    #[test]
    fn hover_on_container_records_both() {
        let mut s = InteractionState::default();
        fire(&mut s, EventKind::PointerOver, 2);
        assert_eq!(s.last_hovered_video, Some(ElementHandle::top(3)));
        assert_eq!(s.last_focused_container, Some(ElementHandle::top(2)));
    }

    #[test]
    fn hover_on_overlay_walks_up() {
        let mut s = InteractionState::default();
        fire(&mut s, EventKind::PointerOver, 5);
        assert_eq!(s.last_hovered_video, Some(ElementHandle::top(3)));
        assert_eq!(s.last_focused_container, Some(ElementHandle::top(2)));
    }

    #[test]
    fn hover_far_from_video_is_ignored() {
        let mut s = InteractionState::default();
        // Three levels up from div(10) reaches div(7); no video in that subtree.
        fire(&mut s, EventKind::PointerOver, 10);
        assert_eq!(s, InteractionState::default());
    }

    #[test]
    fn context_menu_walks_further_and_records_position() {
        let mut s = InteractionState::default();
        // Five levels up from div(10) reaches body(0), which contains video(3).
        fire(&mut s, EventKind::ContextMenu, 10);
        assert_eq!(s.last_right_click, Some(Point::new(12.0, 34.0)));
        assert_eq!(s.last_hovered_video, Some(ElementHandle::top(3)));
        assert_eq!(s.last_focused_container, Some(ElementHandle::top(0)));
    }

    #[test]
    fn context_menu_prefers_card_container() {
        let mut s = InteractionState::default();
        fire(&mut s, EventKind::ContextMenu, 5);
        assert_eq!(s.last_focused_container, Some(ElementHandle::top(2)));
    }

    #[test]
    fn click_uses_card_container() {
        let mut s = InteractionState::default();
        fire(&mut s, EventKind::Click, 5);
        assert_eq!(s.last_hovered_video, Some(ElementHandle::top(3)));
        assert_eq!(s.last_focused_container, Some(ElementHandle::top(2)));

        // data-index card without a video: state stays as it was.
        fire(&mut s, EventKind::Click, 13);
        assert_eq!(s.last_focused_container, Some(ElementHandle::top(2)));
    }

    #[test]
    fn attached_tracker_updates_shared_state() {
        let doc = page();
        let mut registry = EventRegistry::new();
        let tracker = InteractionTracker::attach(
            &mut registry,
            InteractionState::new_shared(),
            TrackerOptions::default(),
        );
        let mut ev = PageEvent::pointer(EventKind::PointerOver, ElementHandle::top(4), Point::default());
        registry.dispatch(&doc, &mut ev);
        assert_eq!(
            tracker.state().borrow().last_hovered_video,
            Some(ElementHandle::top(3))
        );

        let state = SharedState::clone(tracker.state());
        tracker.detach(&mut registry);
        assert_eq!(registry.listener_count(EventKind::PointerOver), 0);
        assert!(state.borrow().last_hovered_video.is_some());
    }
}
