//! `soradl debug <page>` – list every video element with its visibility.

use anyhow::Result;
use soradl_core::page::PageSnapshot;
use soradl_core::scanner::describe_videos;
use std::path::Path;

pub fn run_debug(path: &Path) -> Result<()> {
    let page = PageSnapshot::load(path)?;
    print!("{}", describe_videos(&page));
    Ok(())
}
