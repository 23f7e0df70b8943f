//! Turning resolved targets into download requests for the host.
//!
//! Single downloads always ask the user where to save. A batch asks only
//! when it holds exactly one item; otherwise items go out unprompted, one
//! per stagger interval, so the host's download manager is not flooded.
//! Nothing is retried.

mod dispatcher;
mod host;
mod plan;

pub use dispatcher::{BatchDispatch, Dispatcher};
pub use host::{DownloadHost, HostError, RecordingHost};
pub use plan::{plan_batch, DownloadRequest, ScheduledDownload};
