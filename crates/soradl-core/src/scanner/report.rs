//! Human-readable listing of every video on a page, for troubleshooting.

use std::fmt::Write;

use crate::page::Document;

use super::{is_visible, DEFAULT_MIN_VISIBLE_PX};

const SOURCE_PREVIEW_CHARS: usize = 50;

/// Lists all video elements of the top-level document, including ones
/// without a source.
pub fn describe_videos(doc: &dyn Document) -> String {
    let videos = doc.videos();
    let viewport = doc.viewport();
    let mut out = format!("Found {} videos:\n\n", videos.len());
    for (i, node) in videos.iter().enumerate() {
        let rect = doc.bounding_rect(*node);
        let visible = doc.video_source(*node).map_or(false, |s| !s.trim().is_empty())
            && is_visible(&rect, viewport, DEFAULT_MIN_VISIBLE_PX);
        let src = doc
            .video_source(*node)
            .filter(|s| !s.is_empty())
            .unwrap_or("(no source)");
        let preview: String = src.chars().take(SOURCE_PREVIEW_CHARS).collect();
        let _ = writeln!(
            out,
            "Video {}: {}",
            i + 1,
            if visible { "Visible" } else { "Not visible" }
        );
        let _ = writeln!(out, "Size: {}x{}", rect.width, rect.height);
        let _ = writeln!(out, "Position: ({:.0},{:.0})", rect.left, rect.top);
        let _ = writeln!(out, "Source: {preview}...\n");
    }
    out
}
