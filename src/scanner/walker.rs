//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and producing one [`FileRecord`] per readable regular file.
//! Traversal is sequential; entries within each directory are visited in
//! file-name order so repeated walks of an unchanged tree yield the same
//! sequence.
//!
//! # Features
//!
//! - Configurable symlink following (walkdir detects cycles)
//! - Hidden file filtering
//! - Access errors logged and skipped rather than aborting the walk
//! - Zero-byte files are kept; they are valid duplicates by name or size
//! - Files whose names are not valid UTF-8 are skipped with a warning
//!
//! # Example
//!
//! ```no_run
//! use dupereview::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(WalkerConfig { skip_hidden: true, ..Default::default() });
//! for entry in walker.walk(Path::new("/home/user/Downloads")) {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::path_utils::normalize_name;
use super::{Enumerator, FileRecord, ScanError, WalkerConfig};

/// Directory walker for file discovery.
#[derive(Debug, Clone, Default)]
pub struct Walker {
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker.
    ///
    /// # Example
    ///
    /// ```
    /// use dupereview::scanner::{Walker, WalkerConfig};
    ///
    /// let walker = Walker::new(WalkerConfig::default());
    /// assert!(!walker.config().follow_symlinks);
    /// ```
    #[must_use]
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// Get the walker configuration.
    #[must_use]
    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Walk the directory tree under `root`, yielding file records.
    ///
    /// Errors are yielded as [`ScanError`] values rather than stopping
    /// iteration. Directories, and anything that is not a regular file after
    /// symlink resolution, are not yielded.
    pub fn walk<'a>(
        &'a self,
        root: &'a Path,
    ) -> impl Iterator<Item = Result<FileRecord, ScanError>> + 'a {
        let skip_hidden = self.config.skip_hidden;

        WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| !(skip_hidden && entry.depth() > 0 && is_hidden(entry)))
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => self.process_entry(&entry),
                Err(e) => {
                    let path = e
                        .path()
                        .map_or_else(|| root.to_path_buf(), Path::to_path_buf);
                    Some(Err(self.handle_walkdir_error(path, e)))
                }
            })
    }

    /// Turn a walkdir entry into a record if it is a regular file.
    fn process_entry(&self, entry: &DirEntry) -> Option<Result<FileRecord, ScanError>> {
        let file_type = entry.file_type();
        if file_type.is_dir() {
            return None;
        }

        let path = entry.path();

        if file_type.is_symlink() && !self.config.follow_symlinks {
            log::trace!("Skipping symlink: {}", path.display());
            return None;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                let path = path.to_path_buf();
                return Some(Err(self.handle_walkdir_error(path, e)));
            }
        };

        if !metadata.is_file() {
            log::trace!("Skipping non-regular file: {}", path.display());
            return None;
        }

        let Some(name) = entry.file_name().to_str() else {
            log::warn!("Skipping file with non-UTF-8 name: {}", path.display());
            return Some(Err(ScanError::InvalidName(path.to_path_buf())));
        };
        let name = normalize_name(name);

        Some(Ok(FileRecord {
            name,
            size: metadata.len(),
            path: path.to_path_buf(),
        }))
    }

    /// Handle I/O errors during file access.
    fn handle_io_error(&self, path: PathBuf, error: io::Error) -> ScanError {
        match error.kind() {
            io::ErrorKind::PermissionDenied => {
                log::warn!("Permission denied: {}", path.display());
                ScanError::PermissionDenied(path)
            }
            io::ErrorKind::NotFound => {
                log::debug!("File not found (may have been deleted): {}", path.display());
                ScanError::NotFound(path)
            }
            _ => {
                log::warn!("I/O error for {}: {}", path.display(), error);
                ScanError::Io {
                    path,
                    source: error,
                }
            }
        }
    }

    /// Handle walkdir errors, unwrapping the underlying I/O error if present.
    fn handle_walkdir_error(&self, path: PathBuf, error: walkdir::Error) -> ScanError {
        if error.loop_ancestor().is_some() {
            log::warn!("Symlink cycle skipped at {}", path.display());
            return ScanError::Io {
                path,
                source: io::Error::other(error.to_string()),
            };
        }

        match error.into_io_error() {
            Some(io_error) => self.handle_io_error(path, io_error),
            None => {
                log::warn!("Walker error for {}", path.display());
                ScanError::Io {
                    path,
                    source: io::Error::other("unknown walk error"),
                }
            }
        }
    }
}

impl Enumerator for Walker {
    fn enumerate(&self, root: &Path) -> Result<Vec<FileRecord>, ScanError> {
        let metadata = fs::metadata(root).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ScanError::NotFound(root.to_path_buf()),
            io::ErrorKind::PermissionDenied => ScanError::PermissionDenied(root.to_path_buf()),
            _ => ScanError::Io {
                path: root.to_path_buf(),
                source: e,
            },
        })?;

        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }

        let mut records = Vec::new();
        let mut skipped = 0usize;

        for entry in self.walk(root) {
            match entry {
                Ok(record) => records.push(record),
                // Already logged by the error handlers.
                Err(_) => skipped += 1,
            }
        }

        log::info!(
            "Enumerated {} files under {} ({} skipped)",
            records.len(),
            root.display(),
            skipped
        );

        Ok(records)
    }
}

/// Check whether an entry's name marks it hidden.
fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
