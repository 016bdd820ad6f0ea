//! Status report covering every scanned file.
//!
//! Unlike [`CsvOutput`](super::CsvOutput), which lists only the members of
//! the groups built for one mode, this report labels each file:
//!
//! | Status | Meaning                                     | Color     |
//! |--------|---------------------------------------------|-----------|
//! | `DUP`  | Another file has the same name and size     | `#FF0000` |
//! | `VAR`  | Another file has the same name, other size  | `#FFFF00` |
//! | `OK`   | The name is unique in the tree              | `#FFFFFF` |
//!
//! Rows are ordered `DUP`, `VAR`, `OK`, each largest first. Files of equal
//! status and size keep scan order.
//!
//! # Example
//!
//! ```
//! use dupereview::output::classify::{ClassifyOutput, FileStatus};
//! use dupereview::scanner::FileRecord;
//!
//! let records = vec![
//!     FileRecord::new("a.txt", 10, "/x/a.txt"),
//!     FileRecord::new("a.txt", 10, "/y/a.txt"),
//!     FileRecord::new("a.txt", 99, "/z/a.txt"),
//!     FileRecord::new("b.txt", 5, "/x/b.txt"),
//! ];
//!
//! let report = ClassifyOutput::new(&records);
//! assert_eq!(report.count(FileStatus::Duplicate), 2);
//! assert_eq!(report.count(FileStatus::Variant), 1);
//! assert_eq!(report.count(FileStatus::Unique), 1);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use super::csv::CsvOutputError;
use crate::duplicates::{group, EquivalenceMode};
use crate::scanner::FileRecord;

/// Classification of one scanned file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FileStatus {
    /// Same name and size as another file.
    #[serde(rename = "DUP")]
    Duplicate,
    /// Same name as another file but a different size.
    #[serde(rename = "VAR")]
    Variant,
    /// No other file shares the name.
    #[serde(rename = "OK")]
    Unique,
}

impl FileStatus {
    /// Short label written to the report.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Duplicate => "DUP",
            Self::Variant => "VAR",
            Self::Unique => "OK",
        }
    }

    /// Highlight color for spreadsheet conditional formatting.
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Self::Duplicate => "#FF0000",
            Self::Variant => "#FFFF00",
            Self::Unique => "#FFFFFF",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One labelled file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFile {
    pub status: FileStatus,
    pub size: u64,
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Serialize)]
struct ClassifiedRow<'a> {
    status: FileStatus,
    color: &'static str,
    size: u64,
    name: &'a str,
    path: String,
}

/// Every scanned file with its [`FileStatus`], in report order.
#[derive(Debug, Clone)]
pub struct ClassifyOutput {
    files: Vec<ClassifiedFile>,
    duplicate_groups: usize,
}

impl ClassifyOutput {
    /// Classify the records of one scan.
    ///
    /// A path repeated in `records` is reported once.
    #[must_use]
    pub fn new(records: &[FileRecord]) -> Self {
        let exact = group(records, Some(EquivalenceMode::ByNameAndSize));
        let by_name = group(records, Some(EquivalenceMode::ByName));

        let duplicates: HashSet<&Path> = exact.iter().flat_map(|(_, g)| g.paths()).collect();
        let shared_names: HashSet<&Path> = by_name.iter().flat_map(|(_, g)| g.paths()).collect();

        let mut seen: HashSet<&Path> = HashSet::new();
        let mut files: Vec<ClassifiedFile> = records
            .iter()
            .filter(|r| seen.insert(r.path.as_path()))
            .map(|r| {
                let path = r.path.as_path();
                let status = if duplicates.contains(path) {
                    FileStatus::Duplicate
                } else if shared_names.contains(path) {
                    FileStatus::Variant
                } else {
                    FileStatus::Unique
                };
                ClassifiedFile {
                    status,
                    size: r.size,
                    name: r.name.clone(),
                    path: r.path.clone(),
                }
            })
            .collect();

        // Stable: equal status and size keep scan order.
        files.sort_by(|a, b| a.status.cmp(&b.status).then(b.size.cmp(&a.size)));

        log::debug!(
            "Classified {} files: {} DUP, {} VAR",
            files.len(),
            files.iter().filter(|f| f.status == FileStatus::Duplicate).count(),
            files.iter().filter(|f| f.status == FileStatus::Variant).count()
        );

        Self {
            files,
            duplicate_groups: exact.len(),
        }
    }

    /// Labelled files in report order.
    #[must_use]
    pub fn files(&self) -> &[ClassifiedFile] {
        &self.files
    }

    /// Number of files with `status`.
    #[must_use]
    pub fn count(&self, status: FileStatus) -> usize {
        self.files.iter().filter(|f| f.status == status).count()
    }

    /// Number of distinct name and size pairs shared by two or more files.
    #[must_use]
    pub fn duplicate_groups(&self) -> usize {
        self.duplicate_groups
    }

    /// Write the report as CSV with a header row.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        if self.files.is_empty() {
            csv_writer.write_record(["status", "color", "size", "name", "path"])?;
        }

        for file in &self.files {
            csv_writer.serialize(ClassifiedRow {
                status: file.status,
                color: file.status.color(),
                size: file.size,
                name: &file.name,
                path: file.path.to_string_lossy().into_owned(),
            })?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate the CSV report as a string.
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

/// File name used when a status report is written without `--output`.
#[must_use]
pub fn default_report_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    format!("dupereview_result_{}.csv", now.format("%Y-%m-%d_%H-%M"))
}
