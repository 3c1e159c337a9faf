//! CLI argument definitions for the consolidation pipeline.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use acadmod_model::{AcadYear, Semester};

#[derive(Parser)]
#[command(
    name = "acadmod",
    version,
    about = "Consolidate scraped academic module data into per-semester and per-year records",
    long_about = "Consolidate scraped academic module data.\n\n\
                  Reads the bulletin, bidding-system, bidding statistics, exam timetable,\n\
                  timetable delta and enrollment sources of a semester, merges them into one\n\
                  record per module and writes per-semester, per-year and per-module JSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Consolidate one semester of one academic year.
    Semester(SemesterArgs),

    /// Consolidate every semester of an academic year and aggregate the year.
    Year(YearArgs),

    /// List the source categories and the file names they are read from.
    Categories(CategoriesArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// Root of the scraped data (`<DIR>/<YYYY-YYYY>/<semester>/<file>.json`).
    #[arg(long = "input-dir", value_name = "DIR", default_value = "data")]
    pub input_dir: PathBuf,

    /// Root of the generated output.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// TOML file overriding source file names and output formatting.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run the pipeline and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct SemesterArgs {
    /// Academic year, e.g. `2016/2017`, `2016-2017` or `2016`.
    #[arg(long = "year", value_name = "YEAR")]
    pub year: AcadYear,

    /// Semester number (1-4).
    #[arg(long = "semester", value_name = "N", value_parser = parse_semester)]
    pub semester: Semester,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Args)]
pub struct YearArgs {
    /// Academic year, e.g. `2016/2017`, `2016-2017` or `2016`.
    #[arg(long = "year", value_name = "YEAR")]
    pub year: AcadYear,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Args)]
pub struct CategoriesArgs {
    /// TOML file overriding source file names.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

fn parse_semester(value: &str) -> Result<Semester, String> {
    let number: u8 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid semester `{value}`"))?;
    Semester::new(number).map_err(|error| error.to_string())
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
