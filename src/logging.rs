//! Logging infrastructure for dupereview.
//!
//! Records go through the `log` facade to an `env_logger` backend. A set
//! `RUST_LOG` replaces the level chosen by `-q` / `-v`; without either the
//! level is info.
//!
//! The report command logs to stderr. The review command owns the terminal,
//! so its records go to [`LogTarget::File`] instead.
//!
//! Release builds print `LEVEL message` on stderr. Debug builds and log
//! files add a timestamp, and `-v` adds the module path.
//!
//! # Example
//!
//! ```rust,no_run
//! use dupereview::logging::{init_logging, LogTarget};
//!
//! // Initialize with verbose mode (-v) on stderr
//! init_logging(1, false, LogTarget::Stderr);
//! ```

use anyhow::{Context, Result};
use directories::ProjectDirs;
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::env;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Where log records are written.
#[derive(Debug)]
pub enum LogTarget {
    /// Standard error.
    Stderr,
    /// An already opened file.
    File(File),
}

impl LogTarget {
    /// Open (appending) a log file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its directory cannot be created.
    pub fn file(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        Ok(Self::File(file))
    }
}

/// Default log file for interactive sessions, under the platform cache directory.
#[must_use]
pub fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "dupereview", "dupereview")
        .map(|dirs| dirs.cache_dir().join("dupereview.log"))
}

/// Install the global logger.
///
/// `verbose` is the `-v` count (1 debug, 2 or more trace) and `quiet`
/// limits output to errors. Both are ignored when `RUST_LOG` is set.
///
/// # Panics
///
/// Panics on a second call; `env_logger` installs a process-wide logger.
pub fn init_logging(verbose: u8, quiet: bool, target: LogTarget) {
    let use_env = env::var("RUST_LOG").is_ok();

    let mut builder = Builder::new();

    if use_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    let to_file = matches!(target, LogTarget::File(_));
    match target {
        LogTarget::Stderr => {
            builder.target(Target::Stderr);
        }
        LogTarget::File(file) => {
            builder.target(Target::Pipe(Box::new(file)));
            builder.write_style(env_logger::WriteStyle::Never);
        }
    }

    configure_format(&mut builder, verbose, to_file);

    builder.init();

    if use_env {
        log::debug!(
            "Logging initialized from RUST_LOG environment variable: {:?}",
            env::var("RUST_LOG").ok()
        );
    } else {
        log::debug!(
            "Logging initialized at level: {:?}",
            determine_level(verbose, quiet)
        );
    }
}

/// Level for the `-q` / `-v` flags.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Pick the record layout.
///
/// Log files always carry timestamps.
fn configure_format(builder: &mut Builder, verbose: u8, to_file: bool) {
    let detailed = cfg!(debug_assertions) || to_file;

    builder.format(move |buf, record| {
        let level = record.level();
        let level_style = buf.default_level_style(level);

        if !detailed {
            return writeln!(
                buf,
                "{level_style}{:<5}{level_style:#} {}",
                level,
                record.args()
            );
        }

        let timestamp = buf.timestamp_seconds();
        if verbose >= 1 {
            writeln!(
                buf,
                "{} {level_style}{:<5}{level_style:#} [{}] {}",
                timestamp,
                level,
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        } else {
            writeln!(
                buf,
                "{} {level_style}{:<5}{level_style:#} {}",
                timestamp,
                level,
                record.args()
            )
        }
    });
}
