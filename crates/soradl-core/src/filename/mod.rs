//! Download filename derivation.
//!
//! Names follow `sora-video-<id>.mp4` where `<id>` is the task identifier
//! embedded in the source URL, or the current epoch milliseconds when the
//! URL carries none. Derivation never fails.

mod task_id;

pub use task_id::{extract_task_id, TASK_ID_LEN, TASK_MARKER};

use url::Url;

use crate::clock::Clock;
use crate::error::ResolveError;

const PREFIX: &str = "sora-video";
const EXTENSION: &str = "mp4";

/// Derives the filename for a single download.
///
/// # Examples
///
/// - `.../task_01jabcdefgh/md.mp4` → `sora-video-01jabcde.mp4`
/// - `https://cdn.example.com/clip.mp4` → `sora-video-1718000000000.mp4`
pub fn derive_filename(url: &str, clock: &dyn Clock) -> String {
    match extract_task_id(url) {
        Some(id) => format!("{PREFIX}-{id}.{EXTENSION}"),
        None => format!("{PREFIX}-{}.{EXTENSION}", clock.now_millis()),
    }
}

/// Derives the filename for item `index` of a batch; the timestamp fallback
/// gets the index appended so names stay distinct within the batch.
pub fn derive_batch_filename(url: &str, index: usize, clock: &dyn Clock) -> String {
    match extract_task_id(url) {
        Some(id) => format!("{PREFIX}-{id}.{EXTENSION}"),
        None => format!("{PREFIX}-{}-{index}.{EXTENSION}", clock.now_millis()),
    }
}

/// Checks that `url` is a non-empty, absolute http(s) URL.
pub fn validate_source(url: &str) -> Result<Url, ResolveError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(ResolveError::EmptySource);
    }
    let parsed = Url::parse(trimmed).map_err(|e| ResolveError::InvalidSource {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(ResolveError::InvalidSource {
            url: trimmed.to_string(),
            reason: format!("unsupported scheme {other:?}"),
        }),
    }
}

/// Non-throwing form of [`validate_source`].
pub fn is_valid_source(url: &str) -> bool {
    validate_source(url).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedClock, SystemClock};

    const TASK_URL: &str =
        "https://videos.openai.com/vg-assets/assets%2Ftask_01jq7x2m9kabcdef%2Fsrc.mp4";

    #[test]
    fn task_url_uses_id() {
        let clock = FixedClock(42);
        assert_eq!(
            derive_filename("https://v.example/task_01jq7x2m9k/md.mp4", &clock),
            "sora-video-01jq7x2m.mp4"
        );
        // No slash after the marker: the id runs to the end of the URL.
        assert_eq!(derive_filename(TASK_URL, &clock), "sora-video-01jq7x2m.mp4");
    }

    #[test]
    fn task_url_is_deterministic() {
        let a = derive_filename("https://v.example/task_abcdefghij/x.mp4", &FixedClock(1));
        let b = derive_filename("https://v.example/task_abcdefghij/x.mp4", &FixedClock(2));
        assert_eq!(a, b);
        assert_eq!(
            derive_batch_filename("https://v.example/task_abcdefghij/x.mp4", 3, &FixedClock(1)),
            a
        );
    }

    #[test]
    fn fallback_uses_timestamp() {
        assert_eq!(
            derive_filename("https://cdn.example.com/clip.mp4", &FixedClock(1_718_000_000_000)),
            "sora-video-1718000000000.mp4"
        );
    }

    #[test]
    fn fallback_is_unique_per_call() {
        let clock = SystemClock::new();
        let a = derive_filename("https://cdn.example.com/clip.mp4", &clock);
        let b = derive_filename("https://cdn.example.com/clip.mp4", &clock);
        assert_ne!(a, b);
        for name in [&a, &b] {
            let digits = name
                .strip_prefix("sora-video-")
                .and_then(|s| s.strip_suffix(".mp4"))
                .unwrap();
            assert!(digits.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn batch_fallback_appends_index() {
        let clock = FixedClock(99);
        assert_eq!(
            derive_batch_filename("https://cdn.example.com/a.mp4", 0, &clock),
            "sora-video-99-0.mp4"
        );
        assert_eq!(
            derive_batch_filename("https://cdn.example.com/b.mp4", 1, &clock),
            "sora-video-99-1.mp4"
        );
    }

    #[test]
    fn validate_source_schemes() {
        assert!(validate_source("https://cdn.example.com/a.mp4").is_ok());
        assert!(validate_source("http://cdn.example.com/a.mp4").is_ok());
        assert!(matches!(validate_source("  "), Err(ResolveError::EmptySource)));
        assert!(matches!(
            validate_source("blob:https://sora.com/1234"),
            Err(ResolveError::InvalidSource { .. })
        ));
        assert!(matches!(
            validate_source("not a url"),
            Err(ResolveError::InvalidSource { .. })
        ));
    }
}
