//! Errors raised while turning a user action into a download target.

/// Why an action could not produce a download target.
///
/// None of these are fatal: callers turn them into a dismissible
/// notification and stop.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No candidate qualified under any resolution rule.
    #[error("no suitable video found")]
    NoCandidate,
    /// A candidate was picked but its source attribute is empty.
    #[error("video source not found")]
    EmptySource,
    /// Source is not an absolute http(s) URL (blob:, data:, malformed, ...).
    #[error("invalid video source URL {url:?}: {reason}")]
    InvalidSource { url: String, reason: String },
    /// Position-based resolution was requested before any right-click was seen.
    #[error("click position not recorded")]
    PositionNotRecorded,
}

impl ResolveError {
    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            ResolveError::NoCandidate => "No suitable video found to download.",
            ResolveError::EmptySource => "Video source not found.",
            ResolveError::InvalidSource { .. } => "Invalid video source URL.",
            ResolveError::PositionNotRecorded => "Error: Click position not recorded.",
        }
    }
}
