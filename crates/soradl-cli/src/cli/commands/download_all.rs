//! `soradl download-all` and `soradl popup`.

use anyhow::Result;
use soradl_core::config::SoradlConfig;
use soradl_core::controller::{MenuItem, PopupButton, Trigger};
use std::path::Path;

use super::session::Session;

pub async fn run_download_all(cfg: &SoradlConfig, path: &Path) -> Result<()> {
    let session = Session::open(cfg, path)?;
    let outcome = session
        .controller()
        .handle(Trigger::ContextMenu(MenuItem::DownloadAll));
    session.finish(outcome).await
}

pub async fn run_popup(cfg: &SoradlConfig, path: &Path, tab_url: &str, all: bool) -> Result<()> {
    let session = Session::open(cfg, path)?;
    let button = if all {
        PopupButton::DownloadAll
    } else {
        PopupButton::Download
    };
    let outcome = session.controller().handle(Trigger::Popup {
        button,
        tab_url: tab_url.to_string(),
    });
    session.finish(outcome).await
}
