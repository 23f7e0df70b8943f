use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::filename::derive_batch_filename;
use crate::resolve::ResolvedTarget;
use crate::scanner::CandidateSet;

/// One download handed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRequest {
    pub url: String,
    pub filename: String,
    /// Ask the user for a save location before writing.
    pub prompt_save_location: bool,
}

impl DownloadRequest {
    /// A user-confirmed single download.
    pub fn single(target: ResolvedTarget) -> Self {
        Self {
            url: target.source_url,
            filename: target.filename,
            prompt_save_location: true,
        }
    }
}

/// A batch item and how long after the first item it should be issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledDownload {
    #[serde(with = "millis")]
    pub delay: Duration,
    pub request: DownloadRequest,
}

/// Builds the "download all" batch: one request per candidate with a valid
/// http(s) source, item `i` delayed by `i * stagger`.
pub fn plan_batch(
    candidates: &CandidateSet,
    clock: &dyn Clock,
    stagger: Duration,
) -> Vec<ScheduledDownload> {
    let valid: Vec<_> = candidates.valid().collect();
    let prompt = valid.len() == 1;
    valid
        .into_iter()
        .enumerate()
        .map(|(i, c)| ScheduledDownload {
            delay: stagger.saturating_mul(i as u32),
            request: DownloadRequest {
                url: c.source_url.trim().to_string(),
                filename: derive_batch_filename(&c.source_url, i, clock),
                prompt_save_location: prompt,
            },
        })
        .collect()
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
