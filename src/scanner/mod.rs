//! Scanner module for directory traversal.
//!
//! This module provides functionality for:
//! - Sequential directory walking using walkdir
//! - Producing one [`FileRecord`] per readable regular file
//! - Unicode file name normalization
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`path_utils`]: NFC normalization of file names
//!
//! The [`Enumerator`] trait is the seam the session registry depends on, so
//! tests can substitute an in-memory listing for a real directory walk.
//!
//! # Example
//!
//! ```no_run
//! use dupereview::scanner::{Enumerator, Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(WalkerConfig::default());
//! let records = walker.enumerate(Path::new(".")).unwrap();
//! for record in &records {
//!     println!("{} ({} bytes): {}", record.name, record.size, record.path.display());
//! }
//! ```

pub mod path_utils;
pub mod walker;

use std::path::{Path, PathBuf};

// Re-export main types
pub use walker::Walker;

/// One filesystem entry observed during a scan.
///
/// Records are created fresh on every scan and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Base file name (NFC-normalized, not unique)
    pub name: String,
    /// File size in bytes
    pub size: u64,
    /// Path to the file, unique among live entries of one scan
    pub path: PathBuf,
}

impl FileRecord {
    /// Create a new FileRecord.
    #[must_use]
    pub fn new(name: impl Into<String>, size: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            size,
            path: path.into(),
        }
    }

    /// Create a record whose name is taken from the last path component.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>, size: u64) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| path_utils::normalize_name(&n.to_string_lossy()))
            .unwrap_or_default();
        Self { name, size, path }
    }
}

/// Source of file records for one directory tree.
pub trait Enumerator {
    /// List every readable regular file under `root`.
    ///
    /// Entries that cannot be accessed are logged and skipped. Only a root
    /// that is missing or is not a directory fails the whole enumeration.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] when `root` itself cannot be walked.
    fn enumerate(&self, root: &Path) -> Result<Vec<FileRecord>, ScanError>;
}

/// Configuration for directory walking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WalkerConfig {
    /// Follow symbolic links during traversal.
    pub follow_symlinks: bool,

    /// Skip hidden files and directories (names starting with `.`).
    pub skip_hidden: bool,
}

impl WalkerConfig {
    /// Create a new configuration.
    ///
    /// # Arguments
    ///
    /// * `follow_symlinks` - Whether to follow symbolic links
    /// * `skip_hidden` - Whether to skip hidden files
    #[must_use]
    pub fn new(follow_symlinks: bool, skip_hidden: bool) -> Self {
        Self {
            follow_symlinks,
            skip_hidden,
        }
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The file name is not valid UTF-8 and cannot be compared by name.
    #[error("File name is not valid UTF-8: {0}")]
    InvalidName(PathBuf),

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied(p)
            | Self::NotFound(p)
            | Self::NotADirectory(p)
            | Self::InvalidName(p) => p,
            Self::Io { path, .. } => path,
        }
    }
}
