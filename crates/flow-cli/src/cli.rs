//! CLI argument definitions for `flowdist`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "flowdist",
    version,
    about = "FlowDistributor - sale splits, list queries, and vault cuts",
    long_about = "Work with FlowDistributor collection snapshots.\n\n\
                  Splits sale prices into freight (FL), vault allocation (BM), and\n\
                  profit (UT), queries exported collections, and computes vault cuts."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: ./flowdist.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

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
    /// Search, filter, sort, and page through a collection export.
    Query(QueryArgs),

    /// Split a sale price into FL, BM, and UT.
    Split(SplitArgs),

    /// Compute the balance of one vault from a snapshot directory.
    Cut(CutArgs),

    /// Ledger (GYA) totals and per-group sums.
    Ledger(LedgerArgs),
}

#[derive(Args)]
pub struct QueryArgs {
    /// Snapshot file (.json or .csv).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Collection held by the file (default: inferred from the file name).
    #[arg(long = "collection", value_name = "NAME")]
    pub collection: Option<String>,

    /// Case-insensitive substring searched in the collection's text fields.
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Exact-match field filter; repeatable. `FIELD=all` matches everything.
    #[arg(long = "filter", value_name = "FIELD=VALUE")]
    pub filters: Vec<String>,

    /// Earliest date included (YYYY-MM-DD).
    #[arg(long = "from", value_name = "DATE")]
    pub from: Option<String>,

    /// Latest date included (YYYY-MM-DD).
    #[arg(long = "to", value_name = "DATE")]
    pub to: Option<String>,

    /// Field to sort by.
    #[arg(long = "sort", value_name = "FIELD")]
    pub sort: Option<String>,

    /// Sort descending instead of ascending.
    #[arg(long = "desc", requires = "sort")]
    pub descending: bool,

    /// Page to show, starting at 1. Out-of-range pages show the last page.
    #[arg(long = "page", value_name = "N", default_value_t = 1)]
    pub page: usize,

    /// Rows per page (default from config).
    #[arg(long = "page-size", value_name = "N")]
    pub page_size: Option<usize>,

    /// Print the page and aggregate as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct SplitArgs {
    /// Sale price.
    #[arg(long = "price", value_name = "AMOUNT")]
    pub price: f64,

    /// Line item as UNIT_COST:QUANTITY; repeatable.
    #[arg(long = "item", value_name = "COST:QTY")]
    pub items: Vec<String>,

    /// Units charged freight (default: sum of item quantities).
    #[arg(long = "units", value_name = "N", allow_negative_numbers = true)]
    pub units: Option<i64>,

    /// Freight per unit (default from config).
    #[arg(long = "freight-rate", value_name = "AMOUNT")]
    pub freight_rate: Option<f64>,
}

#[derive(Args)]
pub struct CutArgs {
    /// Snapshot directory containing the ledger and transfer exports.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Vault id or name.
    #[arg(long = "vault", value_name = "NAME")]
    pub vault: String,

    /// Ignore rows dated after this day (YYYY-MM-DD).
    #[arg(long = "as-of", value_name = "DATE")]
    pub as_of: Option<String>,
}

#[derive(Args)]
pub struct LedgerArgs {
    /// Ledger export, or a snapshot directory containing one.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Field whose values group the sums.
    #[arg(long = "group-by", value_name = "FIELD", default_value = "categoria")]
    pub group_by: String,
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
