//! Command-line interface definitions for dupereview.
//!
//! This module defines all CLI arguments, subcommands, and options using the clap derive API.
//! The CLI follows standard conventions with global options (verbosity, color) and
//! subcommands for different operations.
//!
//! # Example
//!
//! ```bash
//! # Review files sharing a name (the default rule)
//! dupereview review ~/Downloads
//!
//! # Review files sharing both name and size
//! dupereview review ~/Downloads --by-name --by-size
//!
//! # Export same-size groups as JSON
//! dupereview report ~/Downloads --by-size --format json --output dupes.json
//!
//! # Verbose mode for debugging
//! dupereview -v report ~/Downloads
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::duplicates::EquivalenceMode;

/// Find files sharing a name or size and review them one group at a time.
///
/// Files are compared by name and/or size only, never by content. Deleted
/// files go to the system trash unless --permanent is given.
#[derive(Debug, Parser)]
#[command(name = "dupereview")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Print errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Path to a configuration file
    ///
    /// Defaults to config.toml in the platform configuration directory.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for dupereview.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Review duplicate groups interactively and delete redundant copies
    Review(ReviewArgs),
    /// Write duplicate groups to a CSV or JSON report
    Report(ReportArgs),
}

/// Options shared by every command that scans a directory.
#[derive(Debug, Clone, Default, Args)]
pub struct CompareArgs {
    /// Treat files with the same name as duplicates
    ///
    /// Combine with --by-size to require both.
    #[arg(long)]
    pub by_name: bool,

    /// Treat files with the same size as duplicates
    ///
    /// Combine with --by-name to require both.
    #[arg(long)]
    pub by_size: bool,

    /// Follow symbolic links during scan
    ///
    /// Warning: May cause infinite loops if symlinks form cycles.
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Skip hidden files and directories (starting with .)
    #[arg(long)]
    pub skip_hidden: bool,
}

impl CompareArgs {
    /// Mode selected by the flags, or `None` if neither selector was given.
    #[must_use]
    pub fn selected_mode(&self) -> Option<EquivalenceMode> {
        EquivalenceMode::from_selectors(self.by_name, self.by_size)
    }
}

/// Arguments for the review subcommand.
#[derive(Debug, Args)]
pub struct ReviewArgs {
    /// Directory path to scan for duplicates
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    #[command(flatten)]
    pub compare: CompareArgs,

    /// Use permanent deletion instead of moving to trash
    ///
    /// Warning: Files cannot be recovered after permanent deletion.
    #[arg(long)]
    pub permanent: bool,
}

/// Arguments for the report subcommand.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Directory path to scan for duplicates
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    #[command(flatten)]
    pub compare: CompareArgs,

    /// Report format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: ReportFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Label every scanned file DUP, VAR or OK instead of listing groups.
    /// Without --output the CSV goes to dupereview_result_<timestamp>.csv
    #[arg(long)]
    pub classify: bool,
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// CSV output for spreadsheets
    Csv,
    /// JSON output for scripting
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Csv => write!(f, "csv"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}
