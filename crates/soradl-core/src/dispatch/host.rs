//! The host platform's download capability.

use std::sync::Mutex;

use tokio::time::Instant;

use super::plan::DownloadRequest;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("download rejected by host: {0}")]
    Rejected(String),
}

/// Performs the byte transfer to disk. The core never touches file I/O.
pub trait DownloadHost: Send + Sync {
    fn download(&self, request: DownloadRequest) -> Result<(), HostError>;
}

/// Host that only records what it was asked to download, with the time of
/// each call.
#[derive(Debug, Default)]
pub struct RecordingHost {
    calls: Mutex<Vec<(Instant, DownloadRequest)>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<DownloadRequest> {
        self.lock().iter().map(|(_, r)| r.clone()).collect()
    }

    pub fn calls(&self) -> Vec<(Instant, DownloadRequest)> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Instant, DownloadRequest)>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DownloadHost for RecordingHost {
    fn download(&self, request: DownloadRequest) -> Result<(), HostError> {
        self.lock().push((Instant::now(), request));
        Ok(())
    }
}
