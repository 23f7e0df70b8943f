//! `soradl pick <page> [--index N]` – manual selection.

use anyhow::{bail, Result};
use soradl_core::config::SoradlConfig;
use soradl_core::dispatch::DownloadRequest;
use soradl_core::messaging::Response;
use soradl_core::presentation::{NoFrameCapture, PickerOutcome, Thumbnail};
use soradl_core::resolve::ResolvedTarget;
use std::path::Path;

use super::session::Session;

pub fn run_pick(cfg: &SoradlConfig, path: &Path, index: Option<usize>) -> Result<()> {
    let session = Session::open(cfg, path)?;
    let outcome = session
        .agent
        .borrow_mut()
        .open_picker(&session.page, &NoFrameCapture);

    let picker = match outcome {
        PickerOutcome::Empty => {
            session.show_toast();
            bail!("no valid videos");
        }
        PickerOutcome::Direct(candidate) => {
            let target = ResolvedTarget::from_candidate(&candidate, session.clock.as_ref())?;
            session
                .dispatcher()
                .dispatch_request(DownloadRequest::single(target))?;
            return Ok(());
        }
        PickerOutcome::Choose(picker) => picker,
    };

    let Some(index) = index else {
        for (i, entry) in picker.entries().iter().enumerate() {
            let thumb = match &entry.thumbnail {
                Thumbnail::Frame { width, height, .. } => format!("[{width}x{height} frame]"),
                Thumbnail::Placeholder(label) => format!("[{label}]"),
            };
            println!(
                "{i:<3} {thumb:<12} {:<18} {}",
                entry.size_label, entry.source_preview
            );
        }
        return Ok(());
    };

    let response = session.agent.borrow_mut().pick(&picker, index);
    session.show_toast();
    match response {
        Response::Download { request } => {
            session.dispatcher().dispatch_request(request)?;
            Ok(())
        }
        Response::Failed { reason } => bail!("{reason}"),
        other => bail!("unexpected page response: {other:?}"),
    }
}
