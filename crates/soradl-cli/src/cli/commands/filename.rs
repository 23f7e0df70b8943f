//! `soradl filename <url>` – print the name a download would be saved as.

use anyhow::Result;
use soradl_core::clock::SystemClock;
use soradl_core::filename::{derive_batch_filename, derive_filename, validate_source};

pub fn run_filename(url: &str, batch_index: Option<usize>) -> Result<()> {
    if let Err(e) = validate_source(url) {
        // Naming never fails; the host would still refuse the download.
        eprintln!("warning: {e}");
    }
    let clock = SystemClock::new();
    let name = match batch_index {
        Some(index) => derive_batch_filename(url, index, &clock),
        None => derive_filename(url, &clock),
    };
    println!("{name}");
    Ok(())
}
