//! A loaded page with its agent, and the plumbing shared by the action
//! commands.

use anyhow::{bail, Result};
use soradl_core::agent::PageAgent;
use soradl_core::clock::SystemClock;
use soradl_core::config::SoradlConfig;
use soradl_core::controller::{ActionController, Outcome};
use soradl_core::dispatch::{DownloadHost, DownloadRequest, Dispatcher, HostError};
use soradl_core::messaging::LocalChannel;
use soradl_core::page::PageSnapshot;
use std::cell::RefCell;
use std::path::Path;
use std::sync::Arc;

/// Prints each request as one JSON line; the actual transfer is left to
/// whatever consumes stdout.
pub struct StdoutHost;

impl DownloadHost for StdoutHost {
    fn download(&self, request: DownloadRequest) -> Result<(), HostError> {
        let line =
            serde_json::to_string(&request).map_err(|e| HostError::Rejected(e.to_string()))?;
        println!("{line}");
        Ok(())
    }
}

pub struct Session {
    pub page: PageSnapshot,
    pub agent: RefCell<PageAgent>,
    pub clock: Arc<SystemClock>,
    cfg: SoradlConfig,
}

impl Session {
    pub fn open(cfg: &SoradlConfig, path: &Path) -> Result<Self> {
        let page = PageSnapshot::load(path)?;
        let clock = Arc::new(SystemClock::new());
        tracing::debug!(path = %path.display(), nodes = page.node_count(), "page loaded");
        Ok(Self {
            page,
            agent: RefCell::new(PageAgent::new(cfg.clone(), clock.clone())),
            clock,
            cfg: cfg.clone(),
        })
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(Arc::new(StdoutHost), self.cfg.dispatch.stagger())
    }

    pub fn channel(&self) -> LocalChannel<'_> {
        LocalChannel::new(&self.agent, &self.page)
    }

    pub fn controller(&self) -> ActionController<LocalChannel<'_>> {
        ActionController::new(
            self.channel(),
            self.dispatcher(),
            self.clock.clone(),
            self.cfg.clone(),
        )
    }

    /// Echoes the agent's current notification on stderr.
    pub fn show_toast(&self) {
        if let Some(toast) = self.agent.borrow().toasts().latest() {
            eprintln!("[{:?}] {}", toast.severity, toast.message);
        }
    }

    /// Like [`Session::finish`] for outcomes that never carry pending work.
    pub fn finish_single(&self, outcome: Outcome) -> Result<()> {
        self.show_toast();
        match outcome {
            Outcome::NotStarted { reason } => bail!("{reason}"),
            Outcome::Started | Outcome::Batch(_) => Ok(()),
        }
    }

    /// Maps an action outcome to the command result; batches are awaited.
    pub async fn finish(&self, outcome: Outcome) -> Result<()> {
        self.show_toast();
        match outcome {
            Outcome::Started => Ok(()),
            Outcome::Batch(batch) => {
                batch.join().await;
                Ok(())
            }
            Outcome::NotStarted { reason } => bail!("{reason}"),
        }
    }
}
