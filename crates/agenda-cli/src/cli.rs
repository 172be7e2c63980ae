//! CLI argument definitions for the booking audit.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "agenda-audit",
    version,
    about = "Maternity booking audit - resolve capacity conflicts in a booking export",
    long_about = "Audit a bank export of obstetric bookings against per-maternity capacity.\n\n\
                  Moves bookings off the zero-capacity weekday, spreads same-card duplicates,\n\
                  relieves overbooked days and writes a CSV/JSON audit trail."
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

    /// Allow patient names in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Audit a bank export and write the report files.
    Run(RunArgs),

    /// Cross-check the audited schedule against a maternity calendar listing.
    Compare(CompareArgs),

    /// Show the capacity table and audit window in effect.
    Capacity(ConfigArgs),
}

/// Options shared by every command that needs the audit configuration.
#[derive(Parser, Clone, Default)]
pub struct ConfigArgs {
    /// TOML file replacing the built-in window and capacity table.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// First day of the audit window (YYYY-MM-DD).
    #[arg(long = "window-start", value_name = "DATE")]
    pub window_start: Option<NaiveDate>,

    /// Last day of the audit window (YYYY-MM-DD).
    #[arg(long = "window-end", value_name = "DATE")]
    pub window_end: Option<NaiveDate>,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Bank export with one booking per line.
    #[arg(value_name = "BANK_FILE")]
    pub bank_file: PathBuf,

    /// Output directory for report files (default: <BANK_FILE dir>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Resolve and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Exit with status 1 when any booking is left for review.
    #[arg(long = "fail-on-review")]
    pub fail_on_review: bool,
}

#[derive(Parser)]
pub struct CompareArgs {
    /// Bank export with one booking per line.
    #[arg(value_name = "BANK_FILE")]
    pub bank_file: PathBuf,

    /// Calendar listing of one maternity for one month.
    #[arg(long = "calendar", value_name = "FILE")]
    pub calendar: PathBuf,

    /// Maternity the calendar belongs to (any known spelling).
    #[arg(long = "maternity")]
    pub maternity: String,

    /// Calendar month (1-12).
    #[arg(long = "month", value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: u32,

    /// Calendar year.
    #[arg(long = "year")]
    pub year: i32,

    /// Output directory for the comparison file (default: <BANK_FILE dir>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Print the comparison without writing it.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
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
