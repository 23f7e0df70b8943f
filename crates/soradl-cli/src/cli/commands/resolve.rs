//! `soradl resolve` and `soradl force`.

use anyhow::Result;
use clap::Args;
use soradl_core::config::SoradlConfig;
use soradl_core::controller::{MenuItem, Shortcut, Trigger};
use soradl_core::interaction::{EventKind, PageEvent};
use soradl_core::page::{find_frame, Document, ElementHandle, Point};
use std::path::Path;

use super::session::Session;
use crate::cli::{parse_handle, parse_point};

/// Simulated user interactions, applied in the order listed.
#[derive(Debug, Default, Clone, Args)]
pub struct Interactions {
    /// Element the pointer moved over (`frame:node`).
    #[arg(long, value_parser = parse_handle, value_name = "HANDLE")]
    pub hover: Option<ElementHandle>,
    /// Element clicked (`frame:node`).
    #[arg(long, value_parser = parse_handle, value_name = "HANDLE")]
    pub click: Option<ElementHandle>,
    /// Right-click at a viewport position; resolves through the context menu.
    #[arg(long, value_parser = parse_point, value_name = "X,Y")]
    pub right_click: Option<Point>,
}

/// Centre of the element's box, in its own frame's coordinates.
fn center_of(page: &dyn Document, target: ElementHandle) -> Point {
    find_frame(page, target.frame)
        .map(|doc| doc.bounding_rect(target.node).center())
        .unwrap_or_default()
}

impl Interactions {
    fn replay(&self, session: &Session) {
        let page = &session.page;
        let mut agent = session.agent.borrow_mut();
        if let Some(target) = self.hover {
            let at = center_of(page, target);
            agent.on_event(page, PageEvent::pointer(EventKind::PointerOver, target, at));
        }
        if let Some(target) = self.click {
            let at = center_of(page, target);
            agent.on_event(page, PageEvent::pointer(EventKind::Click, target, at));
        }
        if let Some(at) = self.right_click {
            let target = page
                .elements_at(at)
                .first()
                .map(|&n| page.handle(n))
                .unwrap_or(ElementHandle::top(0));
            agent.on_event(page, PageEvent::pointer(EventKind::ContextMenu, target, at));
        }
    }
}

/// The menu entry a right-click at `at` offers: the video entry, with the
/// element's `src` when it has one, if the topmost element is a video.
fn menu_item_at(page: &dyn Document, at: Point) -> MenuItem {
    match page.elements_at(at).first() {
        Some(&node) if page.is_video(node) => MenuItem::DownloadVideo {
            src_url: page
                .video_source(node)
                .filter(|src| !src.trim().is_empty())
                .map(str::to_string),
        },
        _ => MenuItem::DownloadFromElement,
    }
}

pub fn run_resolve(cfg: &SoradlConfig, path: &Path, interactions: &Interactions) -> Result<()> {
    let session = Session::open(cfg, path)?;
    interactions.replay(&session);
    let trigger = match interactions.right_click {
        Some(at) => Trigger::ContextMenu(menu_item_at(&session.page, at)),
        None => Trigger::Command(Shortcut::DownloadVideo),
    };
    let outcome = session.controller().handle(trigger);
    session.finish_single(outcome)
}

pub fn run_force(cfg: &SoradlConfig, path: &Path) -> Result<()> {
    let session = Session::open(cfg, path)?;
    let outcome = session
        .controller()
        .handle(Trigger::Command(Shortcut::ForceDetect));
    session.finish_single(outcome)
}


#[cfg(test)]
mod tests {
    use super::*;
    use soradl_core::page::{ElementSpec, PageSnapshot, PageSpec, Rect, Viewport};

    const SRC: &str = "https://videos.openai.com/vg-assets/task_01jabcdefghij/md.mp4";

    // body > video (sourced), video (no source), div overlay above the first
    fn page(with_overlay: bool) -> PageSnapshot {
        let mut body = ElementSpec::new("body")
            .with_rect(Rect::new(0.0, 0.0, 1280.0, 720.0))
            .with_child(ElementSpec::video(SRC, Rect::new(0.0, 0.0, 400.0, 300.0)))
            .with_child(ElementSpec::video("", Rect::new(500.0, 0.0, 400.0, 300.0)));
        if with_overlay {
            body = body.with_child(
                ElementSpec::new("div")
                    .with_z(1)
                    .with_rect(Rect::new(0.0, 0.0, 400.0, 300.0)),
            );
        }
        PageSnapshot::from_spec(PageSpec::new(
            "https://sora.com",
            Viewport::new(1280.0, 720.0),
            body,
        ))
    }

    #[test]
    fn right_click_on_sourced_video_uses_its_src() {
        assert_eq!(
            menu_item_at(&page(false), Point::new(100.0, 100.0)),
            MenuItem::DownloadVideo {
                src_url: Some(SRC.to_string())
            }
        );
    }

    #[test]
    fn right_click_on_unsourced_video_has_no_src() {
        assert_eq!(
            menu_item_at(&page(false), Point::new(600.0, 100.0)),
            MenuItem::DownloadVideo { src_url: None }
        );
    }

    #[test]
    fn right_click_elsewhere_resolves_from_element() {
        assert_eq!(
            menu_item_at(&page(true), Point::new(100.0, 100.0)),
            MenuItem::DownloadFromElement
        );
        assert_eq!(
            menu_item_at(&page(false), Point::new(1000.0, 600.0)),
            MenuItem::DownloadFromElement
        );
    }
}
