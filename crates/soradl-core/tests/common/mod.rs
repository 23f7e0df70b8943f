//! Shared page fixtures for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::sync::Arc;

use soradl_core::agent::PageAgent;
use soradl_core::clock::FixedClock;
use soradl_core::config::SoradlConfig;
use soradl_core::page::{
    ElementHandle, ElementSpec, PageSnapshot, PageSpec, PositionStyle, Rect, Viewport,
};

pub const ORIGIN: &str = "https://sora.com";
pub const NOW_MS: u64 = 1_718_000_000_000;

pub const SRC_A: &str = "https://videos.openai.com/vg-assets/task_01jaaaaaaaaa/md.mp4";
pub const SRC_B: &str = "https://videos.openai.com/vg-assets/task_01jbbbbbbbbb/md.mp4";
pub const SRC_C: &str = "https://cdn.example.com/clip.mp4";

/// Node ids of [`gallery`].
pub const CARD_A: u32 = 2;
pub const VIDEO_A: u32 = 3;
pub const CARD_B: u32 = 4;
pub const OVERLAY_B: u32 = 5;
pub const VIDEO_B: u32 = 6;
pub const VIDEO_C: u32 = 8;
pub const VIDEO_D: u32 = 9;

fn full() -> Rect {
    Rect::new(0.0, 0.0, 1280.0, 720.0)
}

/// html(0) > body(1) >
///   div.group[data-index=0] relative (2) > video A (3)
///   div.group[data-index=1] relative (4) > div overlay z1 (5), video B playing (6)
///   div.video-container (7) > video C, centred, no task id (8)
///   video D, no source (9)
pub fn gallery() -> PageSpec {
    let card_a = ElementSpec::new("div")
        .with_class("group")
        .with_attr("data-index", "0")
        .with_position(PositionStyle::Relative)
        .with_rect(Rect::new(0.0, 0.0, 400.0, 300.0))
        .with_child(ElementSpec::video(SRC_A, Rect::new(0.0, 0.0, 400.0, 300.0)));
    let card_b = ElementSpec::new("div")
        .with_class("group")
        .with_attr("data-index", "1")
        .with_position(PositionStyle::Relative)
        .with_rect(Rect::new(420.0, 0.0, 400.0, 300.0))
        .with_child(
            ElementSpec::new("div")
                .with_class("overlay")
                .with_z(1)
                .with_rect(Rect::new(420.0, 0.0, 400.0, 300.0)),
        )
        .with_child(ElementSpec::video(SRC_B, Rect::new(420.0, 0.0, 400.0, 300.0)).playing(3.5));
    let card_c = ElementSpec::new("div")
        .with_class("video-container")
        .with_rect(Rect::new(440.0, 210.0, 400.0, 300.0))
        .with_child(ElementSpec::video(SRC_C, Rect::new(440.0, 210.0, 400.0, 300.0)));
    let body = ElementSpec::new("body")
        .with_rect(full())
        .with_child(card_a)
        .with_child(card_b)
        .with_child(card_c)
        .with_child(ElementSpec::video("", Rect::new(900.0, 400.0, 200.0, 100.0)));
    PageSpec::new(
        ORIGIN,
        Viewport::new(1280.0, 720.0),
        ElementSpec::new("html").with_rect(full()).with_child(body),
    )
}

pub fn gallery_page() -> PageSnapshot {
    PageSnapshot::from_spec(gallery())
}

pub fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(NOW_MS))
}

pub fn agent() -> RefCell<PageAgent> {
    RefCell::new(PageAgent::new(SoradlConfig::default(), clock()))
}

pub fn top(node: u32) -> ElementHandle {
    ElementHandle::top(node)
}
