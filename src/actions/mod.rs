//! File actions module.
//!
//! This module provides the filesystem side of resolving a duplicate:
//! - Safe deletion via the trash crate (default, recoverable)
//! - Permanent deletion (explicit configuration)
//!
//! ```no_run
//! use dupereview::actions::{FileRemover, Remover};
//! use std::path::Path;
//!
//! let remover = FileRemover::trash();
//! if let Err(e) = remover.remove(Path::new("/path/to/duplicate.txt")) {
//!     eprintln!("Failed: {}", e);
//! }
//! ```

pub mod delete;

// Re-export commonly used types
pub use delete::{
    delete_to_trash, permanent_delete, DeleteConfig, DeleteError, DeleteResult, FileRemover,
    Remover,
};
