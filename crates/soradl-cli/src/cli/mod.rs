//! CLI for soradl: replays user actions against a saved page snapshot.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use soradl_core::config;
use soradl_core::page::{ElementHandle, Point};
use std::path::PathBuf;

use commands::{
    run_at, run_completions, run_debug, run_decorate, run_download_all, run_filename, run_force,
    run_man, run_pick, run_popup, run_resolve, run_scan, Interactions,
};

/// Top-level CLI for soradl.
#[derive(Debug, Parser)]
#[command(name = "soradl")]
#[command(about = "soradl: find and download generated videos on a page", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the download filename for a video source URL.
    Filename {
        url: String,
        /// Name it as item N of a "download all" batch.
        #[arg(long, value_name = "N")]
        batch_index: Option<usize>,
    },

    /// List video candidates found on a page snapshot.
    Scan {
        /// Page snapshot (JSON).
        page: PathBuf,
        /// Print candidates as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Pick the best video after the given interactions and emit its download.
    Resolve {
        page: PathBuf,
        #[command(flatten)]
        interactions: Interactions,
    },

    /// Resolve the video at a viewport position.
    At { page: PathBuf, x: f64, y: f64 },

    /// Ignore interaction state: the playing video, else the largest.
    Force { page: PathBuf },

    /// Emit staggered downloads for every video on the page.
    DownloadAll { page: PathBuf },

    /// Press a popup button for a tab showing this page.
    Popup {
        page: PathBuf,
        /// URL of the tab, checked against the compatible domains.
        #[arg(long)]
        tab_url: String,
        /// "Download all" instead of "Download".
        #[arg(long)]
        all: bool,
    },

    /// Describe every video element (the Alt+Shift+V report).
    Debug { page: PathBuf },

    /// Run the decoration re-scan loop, re-reading the snapshot each tick.
    Decorate {
        page: PathBuf,
        /// Stop after this many passes.
        #[arg(long, default_value = "3", value_name = "N")]
        ticks: usize,
    },

    /// Open the manual video picker; with --index, choose an entry.
    Pick {
        page: PathBuf,
        #[arg(long, value_name = "N")]
        index: Option<usize>,
    },

    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the man page (roff) to stdout.
    Man,
}

/// `frame:node` or a top-level node id.
pub(crate) fn parse_handle(s: &str) -> Result<ElementHandle, String> {
    s.parse()
}

/// `x,y` in viewport pixels.
pub(crate) fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got {s:?}"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate {v:?}: {e}"))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        if let CliCommand::Completions { shell } = cli.command {
            return run_completions(shell);
        }
        if let CliCommand::Man = cli.command {
            return run_man();
        }
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Filename { url, batch_index } => run_filename(&url, batch_index),
            CliCommand::Scan { page, json } => run_scan(&cfg, &page, json),
            CliCommand::Resolve { page, interactions } => run_resolve(&cfg, &page, &interactions),
            CliCommand::At { page, x, y } => run_at(&cfg, &page, Point::new(x, y)),
            CliCommand::Force { page } => run_force(&cfg, &page),
            CliCommand::DownloadAll { page } => run_download_all(&cfg, &page).await,
            CliCommand::Popup { page, tab_url, all } => run_popup(&cfg, &page, &tab_url, all).await,
            CliCommand::Debug { page } => run_debug(&page),
            CliCommand::Decorate { page, ticks } => run_decorate(&cfg, &page, ticks).await,
            CliCommand::Pick { page, index } => run_pick(&cfg, &page, index),
            CliCommand::Completions { .. } | CliCommand::Man => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests;
