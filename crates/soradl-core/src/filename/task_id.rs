//! Task identifier extraction from generated-video URLs.

/// Marker that precedes the task identifier in a source URL.
pub const TASK_MARKER: &str = "task_";

/// Number of identifier characters kept in the filename.
pub const TASK_ID_LEN: usize = 8;

/// Returns the text after the first `task_` that is followed by a non-empty
/// segment, up to the next `/`, truncated to [`TASK_ID_LEN`] characters.
/// `None` if no such marker exists.
pub fn extract_task_id(url: &str) -> Option<String> {
    url.match_indices(TASK_MARKER).find_map(|(at, _)| {
        let rest = &url[at + TASK_MARKER.len()..];
        let segment = rest.split('/').next().unwrap_or("");
        (!segment.is_empty()).then(|| segment.chars().take(TASK_ID_LEN).collect())
    })
}
