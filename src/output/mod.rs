//! Report formatters for duplicate groups.
//!
//! This module provides different output formats for one-shot reports:
//! - JSON for automation and scripting
//! - CSV for spreadsheet import
//! - A status CSV labelling every scanned file `DUP`, `VAR` or `OK`
//!
//! Formatters only read a [`GroupMap`](crate::duplicates::GroupMap); they
//! never touch the filesystem.
//!
//! # Example
//!
//! ```no_run
//! use dupereview::duplicates::group;
//! use dupereview::output::json::JsonOutput;
//! use dupereview::scanner::{Enumerator, Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let root = Path::new(".");
//! let records = Walker::new(WalkerConfig::default()).enumerate(root).unwrap();
//! let groups = group(&records, None);
//!
//! let output = JsonOutput::new(&groups, root);
//! println!("{}", output.to_json_pretty().unwrap());
//! ```

pub mod classify;
pub mod csv;
pub mod json;

// Re-export main types
pub use classify::{default_report_name, ClassifiedFile, ClassifyOutput, FileStatus};
pub use csv::CsvOutput;
pub use json::JsonOutput;
