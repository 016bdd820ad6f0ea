//! Session state for an interactive review.
//!
//! # Overview
//!
//! The [`Registry`] owns everything a review session needs between key
//! presses: the current [`GroupMap`], the set of paths deleted so far, the
//! selected group, and the directory and mode of the last scan. It talks to
//! the filesystem only through an [`Enumerator`] and a [`Remover`], so the
//! whole session can be driven against fakes.
//!
//! Every mutating operation takes `&mut self` and either completes fully or
//! leaves the registry as it was.
//!
//! # Example
//!
//! ```no_run
//! use dupereview::actions::FileRemover;
//! use dupereview::duplicates::{EquivalenceMode, Registry};
//! use dupereview::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let mut registry = Registry::new(
//!     Walker::new(WalkerConfig::default()),
//!     FileRemover::trash(),
//! );
//! registry.scan(Path::new("/some/dir"), Some(EquivalenceMode::ByNameAndSize))?;
//!
//! if let Some((key, group)) = registry.current_group() {
//!     let key = key.clone();
//!     let victim = group.members()[1].path.clone();
//!     registry.delete_member(&key, &victim)?;
//! }
//! # Ok::<(), dupereview::duplicates::RegistryError>(())
//! ```

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::groups::{group, EquivalenceMode, Group, GroupKey, GroupMap};
use crate::actions::{DeleteError, Remover};
use crate::scanner::{Enumerator, ScanError};

/// Errors returned by [`Registry`] operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// `rescan` was called before any scan succeeded.
    #[error("no directory selected")]
    NoDirectorySelected,

    /// The remover refused to delete a file. Nothing was changed.
    #[error("failed to delete {path}: {source}")]
    DeletionFailed {
        path: PathBuf,
        #[source]
        source: DeleteError,
    },

    /// The key is not a current group, or the path is not one of its members.
    #[error("{path} is not a member of group '{key}'")]
    UnknownMember { key: GroupKey, path: PathBuf },

    /// The scan root could not be enumerated.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// What happened to a group after one of its members was deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The group still has at least two members.
    Shrunk {
        /// Members left in the group.
        remaining: usize,
    },
    /// The group dropped below two members and was removed.
    Resolved,
}

/// Live duplicate groups plus the state of one review session.
pub struct Registry {
    enumerator: Box<dyn Enumerator>,
    remover: Box<dyn Remover>,
    mode: EquivalenceMode,
    groups: GroupMap,
    deleted: HashSet<PathBuf>,
    cursor: usize,
    source_dir: Option<PathBuf>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("mode", &self.mode)
            .field("groups", &self.groups.len())
            .field("deleted", &self.deleted.len())
            .field("cursor", &self.cursor())
            .field("source_dir", &self.source_dir)
            .finish_non_exhaustive()
    }
}

impl Registry {
    /// Create an empty registry with no directory selected.
    pub fn new(enumerator: impl Enumerator + 'static, remover: impl Remover + 'static) -> Self {
        let mode = EquivalenceMode::default();
        Self {
            enumerator: Box::new(enumerator),
            remover: Box::new(remover),
            mode,
            groups: GroupMap::empty(mode),
            deleted: HashSet::new(),
            cursor: 0,
            source_dir: None,
        }
    }

    /// Scan `directory` and replace all groups.
    ///
    /// The cursor moves to the first group. Deleted paths are kept, and a
    /// new group that shares a file with a previous group inherits that
    /// group's history, so a past deletion is still reported after a fresh
    /// scan of the same tree.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Scan`] if the directory is missing or not a
    /// directory. The registry is unchanged in that case.
    pub fn scan(
        &mut self,
        directory: &Path,
        mode: Option<EquivalenceMode>,
    ) -> Result<(), RegistryError> {
        let mut groups = self.build(directory, mode)?;
        carry_history(&self.groups, &mut groups);

        log::info!(
            "Scanned {}: {} duplicate groups by {}",
            directory.display(),
            groups.len(),
            groups.mode()
        );

        self.mode = groups.mode();
        self.groups = groups;
        self.cursor = 0;
        self.source_dir = Some(directory.to_path_buf());
        Ok(())
    }

    /// Scan the last directory again with the active mode.
    ///
    /// The cursor stays on the same group if its key still exists. When the
    /// key changed, for example because a by-size count dropped, it moves to
    /// the first group that still holds one of the selected files. Otherwise
    /// it falls back to the first group.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NoDirectorySelected`] if no scan has
    /// succeeded yet, or [`RegistryError::Scan`] if the directory has since
    /// become unreadable.
    pub fn rescan(&mut self) -> Result<(), RegistryError> {
        let directory = self
            .source_dir
            .clone()
            .ok_or(RegistryError::NoDirectorySelected)?;

        let mut groups = self.build(&directory, Some(self.mode))?;
        carry_history(&self.groups, &mut groups);

        let cursor = self
            .current_group()
            .and_then(|(key, selected)| {
                groups.position(key).or_else(|| {
                    groups
                        .iter()
                        .position(|(_, group)| group.shares_member(selected))
                })
            })
            .unwrap_or(0);
        self.cursor = cursor;
        self.groups = groups;

        log::debug!(
            "Rescanned {}: {} groups, cursor at {:?}",
            directory.display(),
            self.groups.len(),
            self.cursor()
        );
        Ok(())
    }

    /// Change the active mode, returning the mode actually in effect.
    ///
    /// Groups are not rebuilt; call [`Registry::rescan`] afterwards.
    pub fn set_mode(&mut self, mode: Option<EquivalenceMode>) -> EquivalenceMode {
        let (mode, coerced) = EquivalenceMode::resolve(mode);
        if coerced {
            log::warn!("No comparison mode selected, defaulting to comparing by name");
        }
        self.mode = mode;
        mode
    }

    /// Select the group at `index`, clamping to the last group.
    pub fn select_group(&mut self, index: usize) {
        if self.groups.is_empty() {
            return;
        }
        self.cursor = index.min(self.groups.len() - 1);
    }

    /// Move the cursor to the next group, stopping at the last.
    pub fn next_group(&mut self) {
        self.select_group(self.cursor.saturating_add(1));
    }

    /// Move the cursor to the previous group, stopping at the first.
    pub fn previous_group(&mut self) {
        self.select_group(self.cursor.saturating_sub(1));
    }

    /// Delete one member of a group from disk and from the registry.
    ///
    /// A group left with fewer than two members is removed. When a group
    /// before the cursor disappears the cursor moves with the selected
    /// group.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnknownMember`] if `path` is not a member of `key`
    /// - [`RegistryError::DeletionFailed`] if the remover fails
    ///
    /// Nothing changes when an error is returned.
    pub fn delete_member(
        &mut self,
        key: &GroupKey,
        path: &Path,
    ) -> Result<DeleteOutcome, RegistryError> {
        let index = match self.groups.position(key) {
            Some(index) if self.groups.get(key).is_some_and(|g| g.contains(path)) => index,
            _ => {
                return Err(RegistryError::UnknownMember {
                    key: key.clone(),
                    path: path.to_path_buf(),
                })
            }
        };

        self.remover
            .remove(path)
            .map_err(|source| RegistryError::DeletionFailed {
                path: path.to_path_buf(),
                source,
            })?;

        self.deleted.insert(path.to_path_buf());

        let remaining = match self.groups.get_mut(key) {
            Some(group) => {
                group.remove(path);
                group.len()
            }
            None => 0,
        };

        if remaining >= 2 {
            log::debug!("Group '{}' now has {} members", key, remaining);
            return Ok(DeleteOutcome::Shrunk { remaining });
        }

        self.groups.remove_index(index);
        if index < self.cursor {
            self.cursor -= 1;
        }
        if self.cursor >= self.groups.len() {
            self.cursor = self.groups.len().saturating_sub(1);
        }

        log::info!(
            "Group '{}' resolved, {} groups remain",
            key,
            self.groups.len()
        );
        Ok(DeleteOutcome::Resolved)
    }

    /// The selected group, if any.
    #[must_use]
    pub fn current_group(&self) -> Option<(&GroupKey, &Group)> {
        self.groups.get_index(self.cursor)
    }

    /// Check if any file that has belonged to `key` was deleted this session.
    #[must_use]
    pub fn has_deleted_member(&self, key: &GroupKey) -> bool {
        self.groups
            .get(key)
            .is_some_and(|g| self.group_has_deletion(g))
    }

    /// Same as [`Registry::has_deleted_member`] for a group already in hand.
    #[must_use]
    pub fn group_has_deletion(&self, group: &Group) -> bool {
        group.history().iter().any(|p| self.deleted.contains(p))
    }

    /// All current groups in display order.
    #[must_use]
    pub fn groups(&self) -> &GroupMap {
        &self.groups
    }

    /// Index of the selected group, or `None` when there are no groups.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        if self.groups.is_empty() {
            None
        } else {
            Some(self.cursor)
        }
    }

    /// Check if `path` was deleted this session.
    #[must_use]
    pub fn is_deleted(&self, path: &Path) -> bool {
        self.deleted.contains(path)
    }

    /// Every path deleted this session.
    #[must_use]
    pub fn deleted_paths(&self) -> &HashSet<PathBuf> {
        &self.deleted
    }

    /// Directory of the last successful scan.
    #[must_use]
    pub fn source_directory(&self) -> Option<&Path> {
        self.source_dir.as_deref()
    }

    /// The active mode.
    #[must_use]
    pub fn mode(&self) -> EquivalenceMode {
        self.mode
    }

    /// Number of current groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Check if there are no groups to review.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn build(
        &self,
        directory: &Path,
        mode: Option<EquivalenceMode>,
    ) -> Result<GroupMap, RegistryError> {
        let records = self.enumerator.enumerate(directory).map_err(|e| {
            log::error!("Cannot scan {}: {}", directory.display(), e);
            e
        })?;
        Ok(group(&records, mode))
    }
}

/// Seed each group in `next` with the history of every group in `previous`
/// that listed one of its current members.
///
/// Matching is by file rather than by key, since a by-size key changes
/// whenever its member count does.
fn carry_history(previous: &GroupMap, next: &mut GroupMap) {
    if previous.is_empty() {
        return;
    }

    let mut owners: HashMap<&Path, Vec<usize>> = HashMap::new();
    for (index, (_, group)) in previous.iter().enumerate() {
        for path in group.history() {
            owners.entry(path.as_path()).or_default().push(index);
        }
    }

    for (_, group) in next.iter_mut() {
        let sources: BTreeSet<usize> = group
            .paths()
            .filter_map(|p| owners.get(p))
            .flatten()
            .copied()
            .collect();
        for index in sources {
            if let Some((_, old)) = previous.get_index(index) {
                group.inherit_history(old);
            }
        }
    }
}
