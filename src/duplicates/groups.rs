//! Duplicate grouping by name and/or size.
//!
//! # Overview
//!
//! This module turns the flat list of [`FileRecord`]s produced by one scan
//! into named duplicate groups under an [`EquivalenceMode`]:
//!
//! | Mode              | Partition key    | Group key                              |
//! |-------------------|------------------|----------------------------------------|
//! | `ByNameAndSize`   | `(name, size)`   | `"{name} ({size} bytes)"`              |
//! | `BySize`          | `size`           | `"Size: {size} bytes ({count} files)"` |
//! | `ByName`          | `name`           | `"{name}"`                             |
//!
//! Only partitions with at least two distinct paths become groups. Groups
//! are listed in the order their partition was first encountered in the
//! scan. Members of a by-name group are ordered largest first; the other
//! modes keep scan order.
//!
//! No file content is read: two files are duplicates here purely because
//! their name and/or size match.
//!
//! # Example
//!
//! ```
//! use dupereview::duplicates::{group, EquivalenceMode};
//! use dupereview::scanner::FileRecord;
//!
//! let records = vec![
//!     FileRecord::new("a.txt", 100, "/x/a.txt"),
//!     FileRecord::new("a.txt", 100, "/y/a.txt"),
//!     FileRecord::new("b.txt", 50, "/x/b.txt"),
//! ];
//!
//! let groups = group(&records, Some(EquivalenceMode::ByNameAndSize));
//!
//! assert_eq!(groups.len(), 1);
//! let (key, members) = groups.get_index(0).unwrap();
//! assert_eq!(key.as_str(), "a.txt (100 bytes)");
//! assert_eq!(members.len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::scanner::FileRecord;

/// Rule deciding when two files are duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EquivalenceMode {
    /// Same base file name
    #[default]
    #[serde(rename = "name")]
    ByName,
    /// Same size in bytes
    #[serde(rename = "size")]
    BySize,
    /// Same base file name and same size
    #[serde(rename = "name-and-size")]
    ByNameAndSize,
}

impl EquivalenceMode {
    /// Derive a mode from the two comparison selectors.
    ///
    /// Returns `None` when neither selector is active; [`group`] and the
    /// registry coerce that to [`EquivalenceMode::ByName`].
    ///
    /// ```
    /// use dupereview::duplicates::EquivalenceMode;
    ///
    /// assert_eq!(EquivalenceMode::from_selectors(true, true), Some(EquivalenceMode::ByNameAndSize));
    /// assert_eq!(EquivalenceMode::from_selectors(false, true), Some(EquivalenceMode::BySize));
    /// assert_eq!(EquivalenceMode::from_selectors(true, false), Some(EquivalenceMode::ByName));
    /// assert_eq!(EquivalenceMode::from_selectors(false, false), None);
    /// ```
    #[must_use]
    pub fn from_selectors(by_name: bool, by_size: bool) -> Option<Self> {
        match (by_name, by_size) {
            (true, true) => Some(Self::ByNameAndSize),
            (false, true) => Some(Self::BySize),
            (true, false) => Some(Self::ByName),
            (false, false) => None,
        }
    }

    /// Resolve an optional mode, substituting `ByName` when none is selected.
    ///
    /// The boolean is `true` when the substitution happened.
    #[must_use]
    pub fn resolve(mode: Option<Self>) -> (Self, bool) {
        match mode {
            Some(mode) => (mode, false),
            None => (Self::ByName, true),
        }
    }

    /// Whether the name selector is active in this mode.
    #[must_use]
    pub fn compares_name(self) -> bool {
        matches!(self, Self::ByName | Self::ByNameAndSize)
    }

    /// Whether the size selector is active in this mode.
    #[must_use]
    pub fn compares_size(self) -> bool {
        matches!(self, Self::BySize | Self::ByNameAndSize)
    }

    /// Short human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ByName => "name",
            Self::BySize => "size",
            Self::ByNameAndSize => "name + size",
        }
    }
}

impl fmt::Display for EquivalenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display identifier of a duplicate group, unique within one grouping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(String);

impl GroupKey {
    /// Key for a name-and-size group.
    #[must_use]
    pub fn name_and_size(name: &str, size: u64) -> Self {
        Self(format!("{} ({} bytes)", name, size))
    }

    /// Key for a size group with `count` members.
    #[must_use]
    pub fn size(size: u64, count: usize) -> Self {
        Self(format!("Size: {} bytes ({} files)", size, count))
    }

    /// Key for a name group.
    #[must_use]
    pub fn name(name: &str) -> Self {
        Self(name.to_string())
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for GroupKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for GroupKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One file listed in a duplicate group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// File size in bytes at scan time
    pub size: u64,
    /// Path to the file
    pub path: PathBuf,
}

impl Member {
    /// Create a new member.
    #[must_use]
    pub fn new(size: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            size,
            path: path.into(),
        }
    }
}

/// Ordered members of one duplicate group.
///
/// Besides the live members, a group remembers every path that has ever
/// belonged to it. The registry uses that history to tell whether a group
/// has had a member deleted, even after the deleted member is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    members: Vec<Member>,
    history: BTreeSet<PathBuf>,
}

impl Group {
    /// Create a group from its members.
    #[must_use]
    pub fn new(members: Vec<Member>) -> Self {
        let history = members.iter().map(|m| m.path.clone()).collect();
        Self { members, history }
    }

    /// Members in display order.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if this group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Check if this group still lists at least two files.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.members.len() > 1
    }

    /// Check if `path` is a current member.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.members.iter().any(|m| m.path == path)
    }

    /// Get a member by position.
    #[must_use]
    pub fn member(&self, index: usize) -> Option<&Member> {
        self.members.get(index)
    }

    /// Paths of the current members.
    pub fn paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.members.iter().map(|m| m.path.as_path())
    }

    /// Every path that has been a member of this group.
    #[must_use]
    pub fn history(&self) -> &BTreeSet<PathBuf> {
        &self.history
    }

    /// Total size of all members in bytes.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.members.iter().map(|m| m.size).sum()
    }

    /// Remove a member by path, returning it if present.
    pub(crate) fn remove(&mut self, path: &Path) -> Option<Member> {
        let index = self.members.iter().position(|m| m.path == path)?;
        Some(self.members.remove(index))
    }

    /// Check if any current member of `other` is also a current member here.
    #[must_use]
    pub fn shares_member(&self, other: &Group) -> bool {
        other.paths().any(|p| self.contains(p))
    }

    /// Fold another group's history into this one.
    pub(crate) fn inherit_history(&mut self, other: &Group) {
        self.history.extend(other.history.iter().cloned());
    }
}

/// Insertion-ordered mapping of [`GroupKey`] to [`Group`].
///
/// Iteration order is display order. Keys are indexed, so lookups stay
/// constant time however many groups a scan produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMap {
    mode: EquivalenceMode,
    coerced: bool,
    entries: Vec<(GroupKey, Group)>,
    positions: HashMap<GroupKey, usize>,
}

impl GroupMap {
    /// Create an empty map for `mode`.
    #[must_use]
    pub fn empty(mode: EquivalenceMode) -> Self {
        Self {
            mode,
            coerced: false,
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Mode the groups were built with.
    #[must_use]
    pub fn mode(&self) -> EquivalenceMode {
        self.mode
    }

    /// Whether no mode was selected and `ByName` was substituted.
    #[must_use]
    pub fn was_coerced(&self) -> bool {
        self.coerced
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a group by key.
    #[must_use]
    pub fn get(&self, key: &GroupKey) -> Option<&Group> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    /// Check if a key is present.
    #[must_use]
    pub fn contains_key(&self, key: &GroupKey) -> bool {
        self.position(key).is_some()
    }

    /// Display position of a key.
    #[must_use]
    pub fn position(&self, key: &GroupKey) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Get the entry at a display position.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&GroupKey, &Group)> {
        self.entries.get(index).map(|(k, g)| (k, g))
    }

    /// Iterate over keys in display order.
    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterate over entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &Group)> + '_ {
        self.entries.iter().map(|(k, g)| (k, g))
    }

    /// Total number of listed files across all groups.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.entries.iter().map(|(_, g)| g.len()).sum()
    }

    pub(crate) fn get_mut(&mut self, key: &GroupKey) -> Option<&mut Group> {
        let index = self.position(key)?;
        Some(&mut self.entries[index].1)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&GroupKey, &mut Group)> + '_ {
        self.entries.iter_mut().map(|(k, g)| (&*k, g))
    }

    /// Remove the group at `index`, shifting later groups up.
    pub(crate) fn remove_index(&mut self, index: usize) -> Option<(GroupKey, Group)> {
        if index >= self.entries.len() {
            return None;
        }
        let (key, group) = self.entries.remove(index);
        self.positions.remove(&key);
        for (k, _) in &self.entries[index..] {
            if let Some(slot) = self.positions.get_mut(k) {
                *slot -= 1;
            }
        }
        Some((key, group))
    }

    fn push(&mut self, key: GroupKey, group: Group) {
        debug_assert!(!self.contains_key(&key), "duplicate group key {}", key);
        self.positions.insert(key.clone(), self.entries.len());
        self.entries.push((key, group));
    }
}

/// Partition identity for one mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Partition<'a> {
    NameAndSize(&'a str, u64),
    Size(u64),
    Name(&'a str),
}

impl<'a> Partition<'a> {
    fn of(record: &'a FileRecord, mode: EquivalenceMode) -> Self {
        match mode {
            EquivalenceMode::ByNameAndSize => Self::NameAndSize(&record.name, record.size),
            EquivalenceMode::BySize => Self::Size(record.size),
            EquivalenceMode::ByName => Self::Name(&record.name),
        }
    }

    fn key(&self, count: usize) -> GroupKey {
        match *self {
            Self::NameAndSize(name, size) => GroupKey::name_and_size(name, size),
            Self::Size(size) => GroupKey::size(size, count),
            Self::Name(name) => GroupKey::name(name),
        }
    }
}

/// Partition file records into duplicate groups.
///
/// This is a pure function of its inputs: calling it twice with the same
/// records and mode yields identical maps.
///
/// # Arguments
///
/// * `records` - The full enumeration from one scan, in walk order
/// * `mode` - Equivalence rule; `None` is coerced to [`EquivalenceMode::ByName`]
///   and reported through [`GroupMap::was_coerced`]
///
/// # Returns
///
/// Groups with two or more distinct paths, in order of first encounter.
/// A path repeated in `records` counts once.
///
/// # Example
///
/// ```
/// use dupereview::duplicates::{group, EquivalenceMode};
/// use dupereview::scanner::FileRecord;
///
/// let records = vec![
///     FileRecord::new("a.txt", 100, "/x/a.txt"),
///     FileRecord::new("a.txt", 100, "/y/a.txt"),
///     FileRecord::new("c.bin", 100, "/x/c.bin"),
/// ];
///
/// let groups = group(&records, Some(EquivalenceMode::BySize));
/// let (key, members) = groups.get_index(0).unwrap();
/// assert_eq!(key.as_str(), "Size: 100 bytes (3 files)");
/// assert_eq!(members.len(), 3);
///
/// let coerced = group(&records, None);
/// assert!(coerced.was_coerced());
/// assert_eq!(coerced.mode(), EquivalenceMode::ByName);
/// ```
#[must_use]
pub fn group(records: &[FileRecord], mode: Option<EquivalenceMode>) -> GroupMap {
    let (mode, coerced) = EquivalenceMode::resolve(mode);
    if coerced {
        log::warn!("No comparison mode selected, defaulting to comparing by name");
    }

    let mut index: HashMap<Partition<'_>, usize> = HashMap::new();
    let mut partitions: Vec<(Partition<'_>, Vec<Member>)> = Vec::new();
    let mut seen_paths: HashSet<&Path> = HashSet::new();

    for record in records {
        if !seen_paths.insert(record.path.as_path()) {
            log::debug!("Ignoring repeated path: {}", record.path.display());
            continue;
        }

        let partition = Partition::of(record, mode);
        let slot = *index.entry(partition.clone()).or_insert_with(|| {
            partitions.push((partition, Vec::new()));
            partitions.len() - 1
        });
        partitions[slot]
            .1
            .push(Member::new(record.size, record.path.clone()));
    }

    let mut groups = GroupMap::empty(mode);
    groups.coerced = coerced;

    for (partition, mut members) in partitions {
        if members.len() < 2 {
            continue;
        }

        if mode == EquivalenceMode::ByName {
            // Stable: equal sizes keep scan order.
            members.sort_by(|a, b| b.size.cmp(&a.size));
        }

        let key = partition.key(members.len());
        log::trace!("Group {}: {} members", key, members.len());
        groups.push(key, Group::new(members));
    }

    log::debug!(
        "Grouped {} records by {} into {} groups",
        records.len(),
        mode,
        groups.len()
    );

    groups
}
