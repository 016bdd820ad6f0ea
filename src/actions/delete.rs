//! File removal using the trash crate or permanent deletion.
//!
//! # Overview
//!
//! This module provides the filesystem side of deleting a duplicate:
//! - Move to system trash (default, recoverable)
//! - Permanent deletion (with explicit configuration)
//! - The [`Remover`] trait the session registry deletes through
//!
//! Every operation checks that the target exists and is a regular file
//! before touching it, so a directory that happens to share a listed path
//! is never removed.
//!
//! # Example
//!
//! ```no_run
//! use dupereview::actions::delete::{delete_to_trash, FileRemover, Remover};
//! use std::path::Path;
//!
//! // Single file deletion to trash
//! match delete_to_trash(Path::new("/path/to/duplicate.txt")) {
//!     Ok(result) => println!("Deleted: {}", result.path.display()),
//!     Err(e) => eprintln!("Failed: {}", e),
//! }
//!
//! // Through the trait, as the registry does
//! let remover = FileRemover::permanent();
//! remover.remove(Path::new("/path/to/other.txt")).unwrap();
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have been deleted or moved).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The path exists but is not a regular file.
    #[error("not a regular file: {0}")]
    NotAFile(PathBuf),

    /// Trash operation failed.
    #[error("trash operation failed for {path}: {message}")]
    TrashFailed { path: PathBuf, message: String },

    /// Permanent delete operation failed.
    #[error("permanent delete failed for {path}: {message}")]
    PermanentDeleteFailed { path: PathBuf, message: String },

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p)
            | Self::PermissionDenied(p)
            | Self::NotAFile(p)
            | Self::TrashFailed { path: p, .. }
            | Self::PermanentDeleteFailed { path: p, .. }
            | Self::Io { path: p, .. } => p,
        }
    }
}

/// Result of a successful deletion operation.
#[derive(Debug, Clone)]
pub struct DeleteResult {
    /// Path that was deleted.
    pub path: PathBuf,
    /// Size of the deleted file in bytes.
    pub size: u64,
    /// Whether deletion was permanent (true) or to trash (false).
    pub permanent: bool,
}

impl DeleteResult {
    /// Create a new delete result.
    #[must_use]
    pub fn new(path: PathBuf, size: u64, permanent: bool) -> Self {
        Self {
            path,
            size,
            permanent,
        }
    }
}

/// Configuration for deletion operations.
#[derive(Debug, Clone, Default)]
pub struct DeleteConfig {
    /// Use permanent deletion instead of trash.
    pub permanent: bool,
}

impl DeleteConfig {
    /// Create config for trash deletion.
    #[must_use]
    pub fn trash() -> Self {
        Self::default()
    }

    /// Create config for permanent deletion.
    #[must_use]
    pub fn permanent() -> Self {
        Self { permanent: true }
    }
}

/// Removes one file from disk.
///
/// The registry only depends on this trait, so a session can be driven
/// against a fake filesystem in tests.
pub trait Remover {
    /// Remove the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DeleteError`] if the file is missing, is not a regular
    /// file, or cannot be removed.
    fn remove(&self, path: &Path) -> Result<(), DeleteError>;
}

/// [`Remover`] backed by the real filesystem.
#[derive(Debug, Clone, Default)]
pub struct FileRemover {
    config: DeleteConfig,
}

impl FileRemover {
    /// Create a remover with the given configuration.
    #[must_use]
    pub fn new(config: DeleteConfig) -> Self {
        Self { config }
    }

    /// Create a remover that moves files to the trash.
    #[must_use]
    pub fn trash() -> Self {
        Self::new(DeleteConfig::trash())
    }

    /// Create a remover that deletes files permanently.
    #[must_use]
    pub fn permanent() -> Self {
        Self::new(DeleteConfig::permanent())
    }

    /// Whether this remover deletes permanently.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        self.config.permanent
    }
}

impl Remover for FileRemover {
    fn remove(&self, path: &Path) -> Result<(), DeleteError> {
        if self.config.permanent {
            permanent_delete(path).map(|_| ())
        } else {
            delete_to_trash(path).map(|_| ())
        }
    }
}

/// Look up the size of a regular file, rejecting anything else.
fn regular_file_size(path: &Path) -> Result<u64, DeleteError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DeleteError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => DeleteError::PermissionDenied(path.to_path_buf()),
        _ => DeleteError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    if metadata.is_dir() {
        return Err(DeleteError::NotAFile(path.to_path_buf()));
    }

    Ok(metadata.len())
}

/// Delete a single file to the system trash.
///
/// This is the safest deletion method - files can be recovered from trash.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `NotAFile` if the path is a directory
/// - `PermissionDenied` if the file cannot be inspected
/// - `TrashFailed` if the trash operation fails
pub fn delete_to_trash(path: &Path) -> Result<DeleteResult, DeleteError> {
    let size = regular_file_size(path)?;

    trash::delete(path).map_err(|e| {
        log::error!("Trash operation failed for {}: {}", path.display(), e);
        DeleteError::TrashFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    log::info!("Moved to trash: {} ({} bytes)", path.display(), size);

    Ok(DeleteResult::new(path.to_path_buf(), size, false))
}

/// Permanently delete a single file.
///
/// **WARNING**: This operation cannot be undone.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `NotAFile` if the path is a directory
/// - `PermissionDenied` if the file cannot be inspected
/// - `PermanentDeleteFailed` if the delete operation fails
pub fn permanent_delete(path: &Path) -> Result<DeleteResult, DeleteError> {
    let size = regular_file_size(path)?;

    fs::remove_file(path).map_err(|e| {
        log::error!("Permanent delete failed for {}: {}", path.display(), e);
        DeleteError::PermanentDeleteFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    log::info!("Permanently deleted: {} ({} bytes)", path.display(), size);

    Ok(DeleteResult::new(path.to_path_buf(), size, true))
}
