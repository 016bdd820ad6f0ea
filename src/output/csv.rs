//! CSV output formatter for duplicate groups.
//!
//! Provides machine-readable CSV output for spreadsheets and data analysis.
//! One row is generated for each member of each group, in display order.
//!
//! # Columns
//!
//! - `group_id`: 1-based position of the group
//! - `group_key`: Display key of the group (e.g. `a.txt (100 bytes)`)
//! - `size`: File size in bytes
//! - `name`: Base file name
//! - `path`: Path to the file
//!
//! # Example
//!
//! ```no_run
//! use dupereview::duplicates::{group, EquivalenceMode};
//! use dupereview::output::csv::CsvOutput;
//! use dupereview::scanner::{Enumerator, Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let records = Walker::new(WalkerConfig::default()).enumerate(Path::new(".")).unwrap();
//! let groups = group(&records, Some(EquivalenceMode::BySize));
//!
//! CsvOutput::new(&groups).write_to(std::io::stdout()).unwrap();
//! ```

use std::io;

use serde::Serialize;
use thiserror::Error;

use crate::duplicates::GroupMap;
use crate::scanner::path_utils::normalize_name;

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A single row in the CSV output.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    group_id: usize,
    group_key: &'a str,
    size: u64,
    name: String,
    path: String,
}

/// CSV output formatter.
pub struct CsvOutput<'a> {
    groups: &'a GroupMap,
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(groups: &'a GroupMap) -> Self {
        Self { groups }
    }

    /// Write the CSV output to the given writer.
    ///
    /// The header row is written even when there are no groups.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        if self.groups.is_empty() {
            csv_writer.write_record(["group_id", "group_key", "size", "name", "path"])?;
        }

        for (idx, (key, group)) in self.groups.iter().enumerate() {
            for member in group.members() {
                let name = member
                    .path
                    .file_name()
                    .map(|n| normalize_name(&n.to_string_lossy()))
                    .unwrap_or_default();

                csv_writer.serialize(CsvRow {
                    group_id: idx + 1,
                    group_key: key.as_str(),
                    size: member.size,
                    name,
                    path: member.path.to_string_lossy().into_owned(),
                })?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
