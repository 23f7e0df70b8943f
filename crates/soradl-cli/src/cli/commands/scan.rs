//! `soradl scan <page>` – list video candidates.

use anyhow::Result;
use soradl_core::config::SoradlConfig;
use soradl_core::page::PageSnapshot;
use soradl_core::scanner::{scan, VideoCandidate};
use std::path::Path;

pub fn run_scan(cfg: &SoradlConfig, path: &Path, json: bool) -> Result<()> {
    let page = PageSnapshot::load(path)?;
    let set = scan(&page, &cfg.scan.options());
    let candidates: Vec<&VideoCandidate> = set.iter().collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
        return Ok(());
    }
    if candidates.is_empty() {
        println!("No videos found on this page.");
        return Ok(());
    }
    println!(
        "{:<8} {:<8} {:<8} {:<10} {}",
        "HANDLE", "PLAYING", "VISIBLE", "SIZE", "URL"
    );
    for c in candidates {
        println!(
            "{:<8} {:<8} {:<8} {:<10} {}",
            c.handle.to_string(),
            c.is_playing,
            c.is_visible,
            format!("{}x{}", c.rect.width, c.rect.height),
            c.source_url
        );
    }
    Ok(())
}
