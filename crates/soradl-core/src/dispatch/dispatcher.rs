use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::clock::Clock;
use crate::resolve::ResolvedTarget;
use crate::scanner::CandidateSet;

use super::host::{DownloadHost, HostError};
use super::plan::{plan_batch, DownloadRequest, ScheduledDownload};

/// Issues download requests to the host, staggering batches.
#[derive(Clone)]
pub struct Dispatcher {
    host: Arc<dyn DownloadHost>,
    stagger: Duration,
}

/// Handle to an in-flight batch. Scheduled items fire on their own; there
/// is no cancellation.
#[derive(Debug)]
pub struct BatchDispatch {
    /// Requests in the batch (issued now or scheduled).
    pub total: usize,
    pending: Vec<JoinHandle<()>>,
}

impl BatchDispatch {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Waits until every scheduled request has been handed to the host.
    pub async fn join(self) {
        for task in self.pending {
            if let Err(e) = task.await {
                tracing::warn!("staggered download task failed: {}", e);
            }
        }
    }
}

impl Dispatcher {
    pub fn new(host: Arc<dyn DownloadHost>, stagger: Duration) -> Self {
        Self { host, stagger }
    }

    /// One user-confirmed download.
    pub fn dispatch_single(&self, target: ResolvedTarget) -> Result<(), HostError> {
        issue(self.host.as_ref(), DownloadRequest::single(target))
    }

    /// A request produced elsewhere (e.g. by the page agent).
    pub fn dispatch_request(&self, request: DownloadRequest) -> Result<(), HostError> {
        issue(self.host.as_ref(), request)
    }

    /// Downloads every valid candidate. Must be called within a tokio
    /// runtime when more than one request results.
    pub fn dispatch_all(&self, candidates: &CandidateSet, clock: &dyn Clock) -> BatchDispatch {
        self.dispatch_plan(plan_batch(candidates, clock, self.stagger))
    }

    /// Issues zero-delay items immediately and schedules the rest.
    pub fn dispatch_plan(&self, plan: Vec<ScheduledDownload>) -> BatchDispatch {
        let total = plan.len();
        let mut pending = Vec::new();
        for item in plan {
            if item.delay.is_zero() {
                let _ = issue(self.host.as_ref(), item.request);
                continue;
            }
            let host = Arc::clone(&self.host);
            pending.push(tokio::spawn(async move {
                tokio::time::sleep(item.delay).await;
                let _ = issue(host.as_ref(), item.request);
            }));
        }
        tracing::info!(total, scheduled = pending.len(), "batch dispatched");
        BatchDispatch { total, pending }
    }
}

fn issue(host: &dyn DownloadHost, request: DownloadRequest) -> Result<(), HostError> {
    let url = request.url.clone();
    let filename = request.filename.clone();
    match host.download(request) {
        Ok(()) => {
            tracing::info!(%url, %filename, "download requested");
            Ok(())
        }
        Err(e) => {
            tracing::warn!(%url, %filename, "download failed: {}", e);
            Err(e)
        }
    }
}
