//! `soradl decorate <page>` – run the decoration re-scan loop against a
//! snapshot file that may change between passes.

use anyhow::Result;
use soradl_core::agent::PageAgent;
use soradl_core::clock::SystemClock;
use soradl_core::config::SoradlConfig;
use soradl_core::page::PageSnapshot;
use soradl_core::presentation::{spawn_rescan, Anchor, MutationSignal, RescanCause};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;

pub async fn run_decorate(cfg: &SoradlConfig, path: &Path, ticks: usize) -> Result<()> {
    let mut agent = PageAgent::new(cfg.clone(), Arc::new(SystemClock::new()));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let rescan = spawn_rescan(
        cfg.presentation.rescan_interval(),
        MutationSignal::new(),
        move |cause| {
            let _ = tx.send(cause);
        },
    );

    let result = passes(&mut agent, path, ticks, &mut rx).await;
    rescan.cancel();
    result
}

async fn passes(
    agent: &mut PageAgent,
    path: &Path,
    ticks: usize,
    rx: &mut mpsc::UnboundedReceiver<RescanCause>,
) -> Result<()> {
    for pass in 1..=ticks {
        let Some(cause) = rx.recv().await else {
            break;
        };
        let page = PageSnapshot::load(path)?;
        let added = agent.refresh_decorations(&page);
        println!("pass {pass} ({cause:?}): {} new", added.len());
        for d in added {
            let anchor = match d.anchor {
                Anchor::Positioned(container) => format!("in {container}"),
                Anchor::Wrapper => "wrapped".to_string(),
            };
            println!("  {:<6} {:<10} {}", d.video.to_string(), anchor, d.source_url);
        }
    }
    Ok(())
}
