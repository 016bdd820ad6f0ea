//! dupereview - interactive duplicate file review
//!
//! Finds files that share a name, a size, or both, groups them, and lets the
//! user delete redundant copies one at a time while the groups stay in sync
//! with the filesystem. A `report` command writes the same groups as CSV or
//! JSON without any interaction.

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;
pub mod tui;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use yansi::Paint;

use crate::actions::FileRemover;
use crate::cli::{Cli, Commands, CompareArgs, ReportArgs, ReportFormat, ReviewArgs};
use crate::config::Config;
use crate::duplicates::{group, EquivalenceMode, Registry};
use crate::error::ExitCode;
use crate::logging::{default_log_path, init_logging, LogTarget};
use crate::output::{default_report_name, ClassifyOutput, CsvOutput, JsonOutput};
use crate::scanner::{Enumerator, Walker, WalkerConfig};
use crate::tui::{run_tui, App, Theme};

/// Scan settings after merging configuration and command-line flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSettings {
    /// Requested equivalence rule. `None` is coerced to by-name.
    pub mode: Option<EquivalenceMode>,
    /// Walker options.
    pub walker: WalkerConfig,
}

impl ScanSettings {
    /// Merge the flags of a scanning command over the loaded configuration.
    ///
    /// Selector flags replace the configured mode only when at least one is
    /// given. Boolean walker flags can only switch an option on.
    #[must_use]
    pub fn resolve(compare: &CompareArgs, config: &Config) -> Self {
        let mode = compare.selected_mode().or(Some(config.mode));
        Self {
            mode,
            walker: WalkerConfig::new(
                compare.follow_symlinks || config.follow_symlinks,
                compare.skip_hidden || config.skip_hidden,
            ),
        }
    }
}

/// Run the command described by `cli`.
///
/// # Errors
///
/// Returns an error if the directory cannot be scanned, the terminal cannot
/// be driven, or the report cannot be written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    if cli.no_color {
        yansi::disable();
    }

    let target = match cli.command {
        Commands::Review(_) => review_log_target(),
        Commands::Report(_) => LogTarget::Stderr,
    };
    init_logging(cli.verbose, cli.quiet, target);

    let config = match &cli.config {
        Some(path) => Config::try_load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load(),
    };
    log::debug!("Effective config: {:?}", config);

    match &cli.command {
        Commands::Review(args) => run_review(args, &config, &cli),
        Commands::Report(args) => run_report(args, &config),
    }
}

/// Log file for the interactive session. Falls back to stderr when no
/// cache directory is usable.
fn review_log_target() -> LogTarget {
    default_log_path()
        .and_then(|path| LogTarget::file(&path).ok())
        .unwrap_or(LogTarget::Stderr)
}

fn run_review(args: &ReviewArgs, config: &Config, cli: &Cli) -> Result<ExitCode> {
    let settings = ScanSettings::resolve(&args.compare, config);
    let permanent = args.permanent || config.permanent_delete;

    let remover = if permanent {
        FileRemover::permanent()
    } else {
        FileRemover::trash()
    };

    let mut registry = Registry::new(Walker::new(settings.walker), remover);
    registry
        .scan(&args.path, settings.mode)
        .with_context(|| format!("Failed to scan {}", args.path.display()))?;

    let mut app = App::new(registry)
        .with_permanent(permanent)
        .with_theme(Theme::for_color(cli.no_color));
    run_tui(&mut app).context("Terminal UI failed")?;

    let registry = app.into_registry();
    if !cli.quiet {
        print_review_summary(&registry, permanent);
    }
    Ok(ExitCode::for_group_count(registry.group_count()))
}

fn print_review_summary(registry: &Registry, permanent: bool) {
    let deleted = registry.deleted_paths().len();
    let verb = if permanent { "deleted" } else { "moved to trash" };

    if deleted == 0 {
        println!("{}", "No files deleted.".dim());
    } else {
        println!(
            "{} {} {}",
            deleted.to_string().green().bold(),
            if deleted == 1 { "file" } else { "files" },
            verb
        );
    }

    let remaining = registry.group_count();
    if remaining == 0 {
        println!("{}", "No duplicate groups remain.".green());
    } else {
        println!(
            "{} duplicate groups remain",
            remaining.to_string().yellow().bold()
        );
    }
}

fn run_report(args: &ReportArgs, config: &Config) -> Result<ExitCode> {
    let settings = ScanSettings::resolve(&args.compare, config);

    if args.classify && args.format != ReportFormat::Csv {
        anyhow::bail!("--classify only produces CSV reports");
    }

    let records = Walker::new(settings.walker)
        .enumerate(&args.path)
        .with_context(|| format!("Failed to scan {}", args.path.display()))?;

    if args.classify {
        return write_status_report(args, &records);
    }

    let groups = group(&records, settings.mode);
    log::info!(
        "Found {} duplicate groups ({} files) in {}",
        groups.len(),
        groups.member_count(),
        args.path.display()
    );

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_report(&mut writer, args.format, &groups, &args.path)?;
            writer.flush()?;
            log::info!("Wrote {} report to {}", args.format, path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_report(&mut writer, args.format, &groups, &args.path)?;
            writer.flush()?;
        }
    }

    Ok(ExitCode::for_group_count(groups.len()))
}

/// Write the DUP/VAR/OK report, defaulting to a timestamped file in the
/// working directory.
fn write_status_report(args: &ReportArgs, records: &[scanner::FileRecord]) -> Result<ExitCode> {
    let report = ClassifyOutput::new(records);
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| default_report_name(&chrono::Local::now()).into());

    let file =
        File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    report
        .write_to(&mut writer)
        .context("Failed to write status report")?;
    writer.flush()?;

    log::info!(
        "Wrote status report for {} files to {}",
        report.files().len(),
        path.display()
    );
    if args.output.is_none() {
        println!("Results written to {}", path.display());
    }

    Ok(ExitCode::for_group_count(report.duplicate_groups()))
}

fn write_report<W: Write>(
    writer: &mut W,
    format: ReportFormat,
    groups: &duplicates::GroupMap,
    directory: &Path,
) -> Result<()> {
    match format {
        ReportFormat::Csv => CsvOutput::new(groups)
            .write_to(writer)
            .context("Failed to write CSV report")?,
        ReportFormat::Json => JsonOutput::new(groups, directory)
            .write_to(writer, true)
            .context("Failed to write JSON report")?,
    }
    Ok(())
}
