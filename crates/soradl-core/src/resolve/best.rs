//! Best-target selection over a fresh scan.

use crate::interaction::InteractionState;
use crate::page::{find_frame, Document};
use crate::scanner::{CandidateSet, VideoCandidate};

use super::policy::{ResolutionPolicy, ResolutionRule};

/// Picks the single video the user most likely means, or `None` if no
/// candidate qualifies under any rule.
pub fn resolve_best_target(
    doc: &dyn Document,
    candidates: &CandidateSet,
    state: &InteractionState,
    policy: &ResolutionPolicy,
) -> Option<VideoCandidate> {
    resolve_with_rule(doc, candidates, state, policy).map(|(_, c)| c)
}

/// Like [`resolve_best_target`], also reporting which rule decided.
pub fn resolve_with_rule(
    doc: &dyn Document,
    candidates: &CandidateSet,
    state: &InteractionState,
    policy: &ResolutionPolicy,
) -> Option<(ResolutionRule, VideoCandidate)> {
    if candidates.is_empty() {
        return None;
    }
    for &rule in &policy.order {
        if let Some(found) = apply(rule, doc, candidates, state) {
            tracing::debug!(?rule, handle = %found.handle, "resolved target");
            return Some((rule, found.clone()));
        }
    }
    tracing::debug!(candidates = candidates.len(), "no rule matched");
    None
}

fn apply<'a>(
    rule: ResolutionRule,
    doc: &dyn Document,
    candidates: &'a CandidateSet,
    state: &InteractionState,
) -> Option<&'a VideoCandidate> {
    match rule {
        // Recorded handles may be stale; they only count if the fresh scan
        // still lists the element with a source.
        ResolutionRule::Hovered => state
            .last_hovered_video
            .and_then(|h| candidates.get(h))
            .filter(|c| has_source(c)),
        ResolutionRule::FocusedContainer => {
            let container = state.last_focused_container?;
            let frame = find_frame(doc, container.frame)?;
            let video = frame.first_descendant_video(container.node)?;
            candidates.get(frame.handle(video)).filter(|c| has_source(c))
        }
        ResolutionRule::Playing => candidates
            .iter()
            .find(|c| c.is_playing && has_source(c)),
        ResolutionRule::Centered => {
            // Top-level viewport, so frame candidates are measured by page_rect.
            let center = candidates.viewport.center();
            candidates
                .iter()
                .filter(|c| c.is_visible && has_source(c))
                .map(|c| (c, c.page_rect.center().distance_to(center)))
                // min_by keeps the earliest candidate on ties.
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(c, _)| c)
        }
        ResolutionRule::First => candidates.iter().find(|c| has_source(c)),
    }
}

fn has_source(c: &VideoCandidate) -> bool {
    !c.source_url.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{ElementHandle, ElementSpec, PageSnapshot, PageSpec, Rect, Viewport};
    use crate::scanner::{scan, ScanOptions};

    fn doc(children: Vec<ElementSpec>) -> PageSnapshot {
        let mut root = ElementSpec::new("body").with_rect(Rect::new(0.0, 0.0, 1000.0, 800.0));
        root.children = children;
        PageSnapshot::from_spec(PageSpec::new(
            "https://sora.com",
            Viewport::new(1000.0, 800.0),
            root,
        ))
    }

    fn video(n: u32, rect: Rect) -> ElementSpec {
        ElementSpec::video(&format!("https://cdn.example.com/v{n}.mp4"), rect)
    }

    fn resolve(page: &PageSnapshot, state: &InteractionState) -> Option<(ResolutionRule, String)> {
        let set = scan(page, &ScanOptions::default());
        resolve_with_rule(page, &set, state, &ResolutionPolicy::default())
            .map(|(r, c)| (r, c.source_url))
    }

    #[test]
    fn empty_set_resolves_to_none() {
        let page = doc(vec![]);
        assert_eq!(resolve(&page, &InteractionState::default()), None);
    }

    #[test]
    fn hovered_beats_everything() {
        let page = doc(vec![
            video(1, Rect::new(450.0, 350.0, 100.0, 100.0)).playing(3.0),
            video(2, Rect::new(0.0, 0.0, 100.0, 100.0)),
        ]);
        let mut state = InteractionState::default();
        state.record_video(ElementHandle::top(2));
        let (rule, src) = resolve(&page, &state).unwrap();
        assert_eq!(rule, ResolutionRule::Hovered);
        assert_eq!(src, "https://cdn.example.com/v2.mp4");
    }

    #[test]
    fn stale_hover_falls_through() {
        let page = doc(vec![video(1, Rect::new(0.0, 0.0, 100.0, 100.0))]);
        let mut state = InteractionState::default();
        state.record_video(ElementHandle::top(42));
        let (rule, _) = resolve(&page, &state).unwrap();
        assert_eq!(rule, ResolutionRule::Centered);
    }

    #[test]
    fn focused_container_uses_its_first_video() {
        let page = doc(vec![
            video(1, Rect::new(450.0, 350.0, 100.0, 100.0)).playing(1.0),
            ElementSpec::new("div")
                .with_class("group")
                .with_child(video(2, Rect::new(0.0, 0.0, 100.0, 100.0)))
                .with_child(video(3, Rect::new(0.0, 100.0, 100.0, 100.0))),
        ]);
        let mut state = InteractionState::default();
        state.last_focused_container = Some(ElementHandle::top(2));
        let (rule, src) = resolve(&page, &state).unwrap();
        assert_eq!(rule, ResolutionRule::FocusedContainer);
        assert_eq!(src, "https://cdn.example.com/v2.mp4");
    }

    #[test]
    fn playing_beats_paused() {
        let page = doc(vec![
            video(1, Rect::new(450.0, 350.0, 100.0, 100.0)),
            video(2, Rect::new(0.0, 0.0, 100.0, 100.0)).playing(0.5),
            video(3, Rect::new(800.0, 600.0, 100.0, 100.0)),
        ]);
        let (rule, src) = resolve(&page, &InteractionState::default()).unwrap();
        assert_eq!(rule, ResolutionRule::Playing);
        assert_eq!(src, "https://cdn.example.com/v2.mp4");
    }

    #[test]
    fn centered_picks_closest_to_viewport_center() {
        // Viewport centre is (500, 400).
        let page = doc(vec![
            // Centre (500, 600): distance 200.
            video(1, Rect::new(450.0, 550.0, 100.0, 100.0)),
            // Centre (510, 400): distance 10.
            video(2, Rect::new(460.0, 350.0, 100.0, 100.0)),
        ]);
        let (rule, src) = resolve(&page, &InteractionState::default()).unwrap();
        assert_eq!(rule, ResolutionRule::Centered);
        assert_eq!(src, "https://cdn.example.com/v2.mp4");
    }

    #[test]
    fn falls_back_to_first_when_nothing_visible() {
        let page = doc(vec![
            video(1, Rect::new(0.0, -500.0, 100.0, 100.0)),
            video(2, Rect::new(0.0, 900.0, 100.0, 100.0)),
        ]);
        let (rule, src) = resolve(&page, &InteractionState::default()).unwrap();
        assert_eq!(rule, ResolutionRule::First);
        assert_eq!(src, "https://cdn.example.com/v1.mp4");
    }

    #[test]
    fn custom_order_is_respected() {
        let page = doc(vec![
            video(1, Rect::new(450.0, 350.0, 100.0, 100.0)),
            video(2, Rect::new(0.0, 0.0, 100.0, 100.0)).playing(2.0),
        ]);
        let set = scan(&page, &ScanOptions::default());
        let policy = ResolutionPolicy::new(vec![ResolutionRule::Centered, ResolutionRule::Playing]);
        let found = resolve_best_target(&page, &set, &InteractionState::default(), &policy).unwrap();
        assert_eq!(found.source_url, "https://cdn.example.com/v1.mp4");
    }
}
