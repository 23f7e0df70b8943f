//! Modal picker shown when several videos could be meant.

use crate::clock::Clock;
use crate::error::ResolveError;
use crate::page::{find_frame, Document, ElementHandle};
use crate::resolve::ResolvedTarget;
use crate::scanner::{CandidateSet, VideoCandidate};

const SOURCE_PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    /// Drawing a cross-origin video taints the canvas.
    #[error("canvas tainted by cross-origin video")]
    Tainted,
    #[error("frame capture unsupported")]
    Unsupported,
}

/// Grabs the currently displayed frame of a video, scaled to the given size.
pub trait FrameCapture {
    fn capture(&self, video: ElementHandle, width: u32, height: u32) -> Result<Vec<u8>, CaptureError>;
}

/// Capture backend for environments without a renderer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFrameCapture;

impl FrameCapture for NoFrameCapture {
    fn capture(&self, _video: ElementHandle, _w: u32, _h: u32) -> Result<Vec<u8>, CaptureError> {
        Err(CaptureError::Unsupported)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Thumbnail {
    Frame { width: u32, height: u32, rgba: Vec<u8> },
    /// Text shown when no frame could be captured.
    Placeholder(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickerEntry {
    pub candidate: VideoCandidate,
    pub thumbnail: Thumbnail,
    /// "Size: 1920×1080" from the intrinsic media size.
    pub size_label: String,
    pub source_preview: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoPicker {
    entries: Vec<PickerEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PickerOutcome {
    /// No video with an http(s) source.
    Empty,
    /// Exactly one; no need to ask.
    Direct(VideoCandidate),
    Choose(VideoPicker),
}

impl VideoPicker {
    pub fn open(
        doc: &dyn Document,
        candidates: &CandidateSet,
        capture: &dyn FrameCapture,
        thumb_size: (u32, u32),
    ) -> PickerOutcome {
        let valid: Vec<&VideoCandidate> = candidates.valid().collect();
        match valid.len() {
            0 => PickerOutcome::Empty,
            1 => PickerOutcome::Direct(valid[0].clone()),
            _ => PickerOutcome::Choose(VideoPicker {
                entries: valid
                    .into_iter()
                    .enumerate()
                    .map(|(i, c)| entry(doc, i, c, capture, thumb_size))
                    .collect(),
            }),
        }
    }

    pub fn entries(&self) -> &[PickerEntry] {
        &self.entries
    }

    /// The user picked entry `index`.
    pub fn choose(&self, index: usize, clock: &dyn Clock) -> Result<ResolvedTarget, ResolveError> {
        let entry = self.entries.get(index).ok_or(ResolveError::NoCandidate)?;
        ResolvedTarget::from_candidate(&entry.candidate, clock)
    }
}

fn entry(
    doc: &dyn Document,
    index: usize,
    candidate: &VideoCandidate,
    capture: &dyn FrameCapture,
    (width, height): (u32, u32),
) -> PickerEntry {
    let thumbnail = match capture.capture(candidate.handle, width, height) {
        Ok(rgba) => Thumbnail::Frame {
            width,
            height,
            rgba,
        },
        Err(e) => {
            tracing::trace!(handle = %candidate.handle, "thumbnail capture failed: {}", e);
            Thumbnail::Placeholder(format!("Video {}", index + 1))
        }
    };
    let (vw, vh) = find_frame(doc, candidate.handle.frame)
        .map(|d| d.intrinsic_size(candidate.handle.node))
        .unwrap_or((0, 0));
    let preview: String = candidate.source_url.chars().take(SOURCE_PREVIEW_CHARS).collect();
    PickerEntry {
        candidate: candidate.clone(),
        thumbnail,
        size_label: format!("Size: {vw}×{vh}"),
        source_preview: format!("{preview}..."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::page::{ElementSpec, PageSnapshot, PageSpec, Rect, Viewport};
    use crate::scanner::{scan, ScanOptions};

    struct OnlyFirst;

    impl FrameCapture for OnlyFirst {
        fn capture(&self, video: ElementHandle, w: u32, h: u32) -> Result<Vec<u8>, CaptureError> {
            if video == ElementHandle::top(1) {
                Ok(vec![0; (w * h * 4) as usize])
            } else {
                Err(CaptureError::Tainted)
            }
        }
    }

    fn page(srcs: &[&str]) -> PageSnapshot {
        let mut root = ElementSpec::new("body");
        for (i, s) in srcs.iter().enumerate() {
            root = root.with_child(ElementSpec::video(
                s,
                Rect::new(0.0, i as f64 * 200.0, 320.0, 180.0),
            ));
        }
        PageSnapshot::from_spec(PageSpec::new("https://sora.com", Viewport::default(), root))
    }

    fn open(doc: &PageSnapshot) -> PickerOutcome {
        let set = scan(doc, &ScanOptions::default());
        VideoPicker::open(doc, &set, &OnlyFirst, (120, 68))
    }

    #[test]
    fn empty_and_direct() {
        assert_eq!(open(&page(&["blob:https://sora.com/x"])), PickerOutcome::Empty);
        match open(&page(&["blob:https://sora.com/x", "https://cdn.example.com/a.mp4"])) {
            PickerOutcome::Direct(c) => assert_eq!(c.source_url, "https://cdn.example.com/a.mp4"),
            other => panic!("expected Direct, got {other:?}"),
        }
    }

    #[test]
    fn thumbnails_fall_back_silently() {
        let doc = page(&[
            "https://cdn.example.com/task_0123456789/a.mp4",
            "https://cdn.example.com/b.mp4",
        ]);
        let PickerOutcome::Choose(picker) = open(&doc) else {
            panic!("expected picker");
        };
        let entries = picker.entries();
        assert_eq!(entries.len(), 2);
        assert!(matches!(entries[0].thumbnail, Thumbnail::Frame { width: 120, height: 68, .. }));
        assert_eq!(entries[1].thumbnail, Thumbnail::Placeholder("Video 2".into()));
        assert_eq!(entries[0].size_label, "Size: 320×180");
        assert!(entries[1].source_preview.ends_with("..."));

        let chosen = picker.choose(0, &FixedClock(1)).unwrap();
        assert_eq!(chosen.filename, "sora-video-01234567.mp4");
        assert_eq!(picker.choose(5, &FixedClock(1)), Err(ResolveError::NoCandidate));
    }
}
