//! Request/response channel between the page-embedded agent and the
//! privileged controller.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use crate::agent::PageAgent;
use crate::dispatch::{DownloadRequest, ScheduledDownload};
use crate::page::Document;
use crate::presentation::Severity;

/// Requests sent to the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Message {
    /// Resolve the best target with the full heuristic.
    ResolveAndDownload,
    /// Resolve at the position recorded by the last right-click.
    DownloadAtLastRightClick,
    /// Look up the video at an explicit viewport position. Read-only.
    GetVideoAtPosition { x: f64, y: f64 },
    /// Playing-or-largest selection, ignoring interaction state.
    ForceDetect,
    DownloadAll,
    ShowNotification { message: String, severity: Severity },
}

/// The page's single reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Response {
    Download { request: DownloadRequest },
    /// Answer to a position lookup. `request` is absent when nothing was
    /// found or the video's source cannot be downloaded.
    #[serde(rename_all = "camelCase")]
    Lookup {
        has_video: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        request: Option<DownloadRequest>,
    },
    Batch { items: Vec<ScheduledDownload> },
    Ack,
    /// The page already showed a notice for this failure.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChannelError {
    /// No listener on the other end (navigated away, not injected yet).
    #[error("page unreachable: {0}")]
    Unreachable(String),
}

/// Notice shown when the page cannot be reached.
pub const UNREACHABLE_NOTICE: &str = "Cannot interact with this page. Try refreshing.";

/// One request, one response; no timeout or cancellation.
pub trait PageChannel {
    fn request(&self, message: Message) -> Result<Response, ChannelError>;
}

/// In-process channel to an agent for a given document.
pub struct LocalChannel<'a> {
    agent: &'a RefCell<PageAgent>,
    doc: &'a dyn Document,
}

impl<'a> LocalChannel<'a> {
    pub fn new(agent: &'a RefCell<PageAgent>, doc: &'a dyn Document) -> Self {
        Self { agent, doc }
    }
}

impl PageChannel for LocalChannel<'_> {
    fn request(&self, message: Message) -> Result<Response, ChannelError> {
        let mut agent = self
            .agent
            .try_borrow_mut()
            .map_err(|_| ChannelError::Unreachable("agent busy".to_string()))?;
        Ok(agent.handle(self.doc, message))
    }
}
