//! Library side of the `acadmod` command-line tool.

pub mod config;
pub mod logging;
pub mod run;
pub mod types;

pub use config::Config;
pub use run::{RunOptions, run_semester_command, run_year_command};
pub use types::RunSummary;
