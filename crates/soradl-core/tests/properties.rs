//! Behavioural guarantees of naming, resolution and batching.

mod common;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use soradl_core::clock::{FixedClock, SystemClock};
use soradl_core::dispatch::{Dispatcher, RecordingHost};
use soradl_core::filename::derive_filename;
use soradl_core::interaction::InteractionState;
use soradl_core::page::{ElementHandle, ElementSpec, PageSnapshot, PageSpec, Rect, Viewport};
use soradl_core::resolve::{resolve_best_target, ResolutionPolicy};
use soradl_core::scanner::{scan, CandidateSet, ScanOptions};

fn page_of(videos: Vec<ElementSpec>) -> PageSnapshot {
    let mut body = ElementSpec::new("body").with_rect(Rect::new(0.0, 0.0, 1280.0, 720.0));
    body.children = videos;
    PageSnapshot::from_spec(PageSpec::new(
        common::ORIGIN,
        Viewport::new(1280.0, 720.0),
        body,
    ))
}

fn src(i: usize) -> String {
    format!("https://cdn.example.com/v{i}.mp4")
}

fn tile(i: usize) -> Rect {
    Rect::new(10.0 + 110.0 * i as f64, 10.0, 100.0, 100.0)
}

fn best(page: &PageSnapshot, state: &InteractionState) -> Option<ElementHandle> {
    let set = scan(page, &ScanOptions::default());
    resolve_best_target(page, &set, state, &ResolutionPolicy::default()).map(|c| c.handle)
}

#[test]
fn task_filenames_are_deterministic() {
    let clock = SystemClock::new();
    for id in ["01jabcdefgh", "xyz", "0123456789abcdef"] {
        let url = format!("https://videos.openai.com/vg-assets/task_{id}/md.mp4");
        let first = derive_filename(&url, &clock);
        let expected: String = id.chars().take(8).collect();
        assert_eq!(first, format!("sora-video-{expected}.mp4"));
        assert_eq!(derive_filename(&url, &clock), first);
    }
}

#[test]
fn timestamp_filenames_are_unique_per_call() {
    let clock = SystemClock::new();
    let names: HashSet<_> = (0..50)
        .map(|_| derive_filename("https://cdn.example.com/clip.mp4", &clock))
        .collect();
    assert_eq!(names.len(), 50);
    for name in &names {
        let digits = name
            .strip_prefix("sora-video-")
            .and_then(|s| s.strip_suffix(".mp4"))
            .unwrap();
        assert!(digits.chars().all(|c| c.is_ascii_digit()), "{name}");
    }
}

#[test]
fn empty_page_resolves_to_nothing() {
    assert_eq!(best(&page_of(vec![]), &InteractionState::default()), None);
}

#[test]
fn hovered_video_dominates() {
    for n in 1..6 {
        let mut videos: Vec<_> = (0..n).map(|i| ElementSpec::video(&src(i), tile(i))).collect();
        videos[0] = videos[0].clone().playing(1.0);
        let page = page_of(videos);
        let hovered = ElementHandle::top(n as u32);
        let state = InteractionState {
            last_hovered_video: Some(hovered),
            ..InteractionState::default()
        };
        assert_eq!(best(&page, &state), Some(hovered), "n = {n}");
    }
}

#[test]
fn playing_video_beats_paused() {
    let videos = (0..4)
        .map(|i| {
            let v = ElementSpec::video(&src(i), tile(i));
            if i == 2 {
                v.playing(7.0)
            } else {
                v
            }
        })
        .collect();
    let page = page_of(videos);
    assert_eq!(
        best(&page, &InteractionState::default()),
        Some(ElementHandle::top(3))
    );
}

#[test]
fn closest_to_centre_wins() {
    // Viewport centre is (640, 360).
    let far = ElementSpec::video(&src(0), Rect::new(390.0, 110.0, 100.0, 100.0));
    let near = ElementSpec::video(&src(1), Rect::new(600.0, 300.0, 100.0, 100.0));
    let page = page_of(vec![far, near]);
    assert_eq!(
        best(&page, &InteractionState::default()),
        Some(ElementHandle::top(2))
    );
}

#[tokio::test(start_paused = true)]
async fn three_videos_download_staggered_without_prompt() {
    let page = page_of((0..3).map(|i| ElementSpec::video(&src(i), tile(i))).collect());
    let set: CandidateSet = scan(&page, &ScanOptions::default());
    let host = Arc::new(RecordingHost::new());
    let dispatcher = Dispatcher::new(host.clone(), Duration::from_millis(1000));

    dispatcher.dispatch_all(&set, &FixedClock(common::NOW_MS)).join().await;

    let calls = host.calls();
    assert_eq!(calls.len(), 3);
    let t0 = calls[0].0;
    assert!(calls[1].0 - t0 >= Duration::from_millis(1000));
    assert!(calls[2].0 - t0 >= Duration::from_millis(2000));
    assert!(calls.iter().all(|(_, r)| !r.prompt_save_location));
}

#[tokio::test]
async fn single_video_batch_prompts() {
    let page = page_of(vec![ElementSpec::video(&src(0), tile(0))]);
    let set = scan(&page, &ScanOptions::default());
    let host = Arc::new(RecordingHost::new());
    let dispatcher = Dispatcher::new(host.clone(), Duration::from_millis(1000));

    dispatcher.dispatch_all(&set, &FixedClock(common::NOW_MS)).join().await;

    let reqs = host.requests();
    assert_eq!(reqs.len(), 1);
    assert!(reqs[0].prompt_save_location);
}
