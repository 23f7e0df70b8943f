use serde::Serialize;

use crate::clock::Clock;
use crate::error::ResolveError;
use crate::filename::{derive_filename, validate_source};
use crate::scanner::VideoCandidate;

/// The outcome of resolution: what to download and under which name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTarget {
    pub source_url: String,
    pub filename: String,
}

impl ResolvedTarget {
    /// Validates the source (http/https only) and derives the filename.
    pub fn from_candidate(
        candidate: &VideoCandidate,
        clock: &dyn Clock,
    ) -> Result<Self, ResolveError> {
        Self::from_source(&candidate.source_url, clock)
    }

    pub fn from_source(url: &str, clock: &dyn Clock) -> Result<Self, ResolveError> {
        let parsed = validate_source(url)?;
        let source_url = url.trim().to_string();
        tracing::trace!(host = parsed.host_str().unwrap_or(""), "validated source");
        Ok(Self {
            filename: derive_filename(&source_url, clock),
            source_url,
        })
    }
}
