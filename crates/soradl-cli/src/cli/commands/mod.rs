//! CLI command handlers, one file per command.

mod at;
mod debug;
mod decorate;
mod download_all;
mod filename;
mod generate;
mod pick;
mod resolve;
mod scan;
mod session;

pub use at::run_at;
pub use debug::run_debug;
pub use decorate::run_decorate;
pub use download_all::{run_download_all, run_popup};
pub use filename::run_filename;
pub use generate::{run_completions, run_man};
pub use pick::run_pick;
pub use resolve::{run_force, run_resolve, Interactions};
pub use scan::run_scan;
