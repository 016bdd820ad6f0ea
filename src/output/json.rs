//! JSON output formatter for duplicate groups.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "mode": "name-and-size",
//!   "directory": "/home/me/Downloads",
//!   "generated_at": "2024-05-01T12:00:00Z",
//!   "summary": {
//!     "groups": 1,
//!     "files": 2,
//!     "total_size": 200
//!   },
//!   "groups": [
//!     {
//!       "key": "a.txt (100 bytes)",
//!       "total_size": 200,
//!       "members": [
//!         { "path": "/home/me/Downloads/x/a.txt", "size": 100 },
//!         { "path": "/home/me/Downloads/y/a.txt", "size": 100 }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::duplicates::{EquivalenceMode, Group, GroupKey, GroupMap};

/// A single group member in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonMember {
    /// Path to the file
    pub path: String,
    /// File size in bytes
    pub size: u64,
}

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonGroup {
    /// Display key of the group
    pub key: String,
    /// Combined size of all members in bytes
    pub total_size: u64,
    /// Members in display order
    pub members: Vec<JsonMember>,
}

impl JsonGroup {
    /// Convert one entry of a [`GroupMap`].
    #[must_use]
    pub fn from_group(key: &GroupKey, group: &Group) -> Self {
        Self {
            key: key.to_string(),
            total_size: group.total_size(),
            members: group
                .members()
                .iter()
                .map(|m| JsonMember {
                    path: m.path.to_string_lossy().into_owned(),
                    size: m.size,
                })
                .collect(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Number of duplicate groups
    pub groups: usize,
    /// Number of files across all groups
    pub files: usize,
    /// Combined size of all grouped files in bytes
    pub total_size: u64,
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Equivalence rule the groups were built with
    pub mode: EquivalenceMode,
    /// Whether the rule was coerced because no selector was active
    pub mode_coerced: bool,
    /// Directory that was scanned
    pub directory: String,
    /// When the report was generated
    pub generated_at: DateTime<Utc>,
    /// Aggregate counts
    pub summary: JsonSummary,
    /// Duplicate groups in display order
    pub groups: Vec<JsonGroup>,
}

impl JsonOutput {
    /// Create a new JSON output for groups found under `directory`.
    ///
    /// # Example
    ///
    /// ```
    /// use dupereview::duplicates::{group, EquivalenceMode};
    /// use dupereview::output::json::JsonOutput;
    /// use dupereview::scanner::FileRecord;
    /// use std::path::Path;
    ///
    /// let records = vec![
    ///     FileRecord::new("a.txt", 100, "/d/x/a.txt"),
    ///     FileRecord::new("a.txt", 100, "/d/y/a.txt"),
    /// ];
    /// let groups = group(&records, Some(EquivalenceMode::ByNameAndSize));
    ///
    /// let output = JsonOutput::new(&groups, Path::new("/d"));
    /// assert_eq!(output.groups.len(), 1);
    /// assert_eq!(output.summary.files, 2);
    /// ```
    #[must_use]
    pub fn new(groups: &GroupMap, directory: &Path) -> Self {
        let json_groups: Vec<JsonGroup> = groups
            .iter()
            .map(|(key, group)| JsonGroup::from_group(key, group))
            .collect();

        Self {
            mode: groups.mode(),
            mode_coerced: groups.was_coerced(),
            directory: directory.to_string_lossy().into_owned(),
            generated_at: Utc::now(),
            summary: JsonSummary {
                groups: json_groups.len(),
                files: groups.member_count(),
                total_size: json_groups.iter().map(|g| g.total_size).sum(),
            },
            groups: json_groups,
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
