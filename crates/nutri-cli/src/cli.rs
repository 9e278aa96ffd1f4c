//! CLI argument definitions for `nutrimart`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use nutri_warehouse::TableRef;

#[derive(Parser)]
#[command(
    name = "nutrimart",
    version,
    about = "OpenFoodFacts ETL - download, clean, load and transform product data",
    long_about = "Download product records from the OpenFoodFacts search API, clean them,\n\
                  round-trip them through a columnar warehouse and derive an\n\
                  analytical table with nutrition scores and quality labels."
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
    /// Run the full pipeline.
    Run(RunArgs),

    /// Clean a product CSV file.
    Clean(StageArgs),

    /// Transform a cleaned product CSV file.
    Transform(StageArgs),

    /// Print the effective configuration as TOML.
    Config(ConfigArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Configuration file (TOML). Defaults apply to anything it leaves out.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of search pages to download.
    #[arg(long = "pages", value_name = "N")]
    pub pages: Option<usize>,

    /// Products requested per page.
    #[arg(long = "page-size", value_name = "N")]
    pub page_size: Option<usize>,

    /// Directory for the original, cleaned and transformed CSV files.
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Warehouse backend.
    #[arg(long = "warehouse", value_enum)]
    pub warehouse: Option<WarehouseArg>,

    /// Target table, overriding the configured project, dataset and table ids.
    #[arg(long = "table", value_name = "PROJECT.DATASET.TABLE")]
    pub table: Option<TableRef>,
}

#[derive(Parser)]
pub struct StageArgs {
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
}

#[derive(Parser)]
pub struct ConfigArgs {
    /// Configuration file (TOML).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum WarehouseArg {
    Local,
    Memory,
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
