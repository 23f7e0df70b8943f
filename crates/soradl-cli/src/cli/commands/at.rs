//! `soradl at <page> <x> <y>` – look up the video at a viewport position and
//! download it.

use anyhow::{bail, Result};
use soradl_core::config::SoradlConfig;
use soradl_core::messaging::{Message, PageChannel, Response};
use soradl_core::page::Point;
use std::path::Path;

use super::session::Session;

pub fn run_at(cfg: &SoradlConfig, path: &Path, at: Point) -> Result<()> {
    let session = Session::open(cfg, path)?;
    let response = session
        .channel()
        .request(Message::GetVideoAtPosition { x: at.x, y: at.y })?;
    match response {
        Response::Lookup {
            request: Some(request),
            ..
        } => {
            session.dispatcher().dispatch_request(request)?;
            Ok(())
        }
        Response::Lookup {
            has_video: true,
            request: None,
        } => bail!("the video at ({}, {}) has no downloadable source", at.x, at.y),
        Response::Lookup { .. } => {
            bail!("no video associated with the element at ({}, {})", at.x, at.y)
        }
        Response::Failed { reason } => bail!("{reason}"),
        other => bail!("unexpected page response: {other:?}"),
    }
}
