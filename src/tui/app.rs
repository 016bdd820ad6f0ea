//! TUI application state management.
//!
//! # Overview
//!
//! This module manages the application state for the interactive TUI:
//! - Current mode (Reviewing, Confirming, Quitting)
//! - The session [`Registry`] holding groups, cursor and deletion history
//! - Which member of the current group is highlighted
//! - The two comparison selectors and the status line
//!
//! # Architecture
//!
//! The `App` struct is the central state container for the TUI. It is
//! accessed only from the main thread. Group navigation, deletion and
//! rescans are delegated to the registry; the app only adds the member
//! highlight and the user-facing messages.
//!
//! # Example
//!
//! ```no_run
//! use dupereview::actions::FileRemover;
//! use dupereview::duplicates::Registry;
//! use dupereview::scanner::{Walker, WalkerConfig};
//! use dupereview::tui::app::{Action, App, AppMode};
//! use std::path::Path;
//!
//! let mut registry = Registry::new(Walker::new(WalkerConfig::default()), FileRemover::trash());
//! registry.scan(Path::new("/some/dir"), None).unwrap();
//!
//! let mut app = App::new(registry);
//! app.handle_action(Action::NextMember);
//! app.handle_action(Action::Delete);
//! assert_eq!(app.mode(), AppMode::Confirming);
//! ```

use crate::duplicates::{
    DeleteOutcome, EquivalenceMode, Group, GroupKey, Member, Registry, RegistryError,
};

use super::theme::Theme;

/// Application mode/state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Reviewing duplicate groups - main navigation mode
    #[default]
    Reviewing,
    /// Confirming deletion of the highlighted file
    Confirming,
    /// Application is quitting
    Quitting,
}

impl AppMode {
    /// Check if the application is in a navigable state.
    #[must_use]
    pub fn is_navigable(&self) -> bool {
        matches!(self, Self::Reviewing)
    }

    /// Check if the application is done (quitting).
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Quitting)
    }
}

/// User action triggered by keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Highlight the next file in the current group
    NextMember,
    /// Highlight the previous file in the current group
    PreviousMember,
    /// Navigate to next group
    NextGroup,
    /// Navigate to previous group
    PreviousGroup,
    /// Ask to delete the highlighted file
    Delete,
    /// Confirm current action
    Confirm,
    /// Cancel current action
    Cancel,
    /// Scan the directory again
    Rescan,
    /// Toggle the by-name selector and rescan
    ToggleByName,
    /// Toggle the by-size selector and rescan
    ToggleBySize,
    /// Quit the application
    Quit,
}

/// TUI application state.
#[derive(Debug)]
pub struct App {
    /// Current application mode
    mode: AppMode,
    /// Session state: groups, cursor, deleted paths
    registry: Registry,
    /// Highlighted file within the current group
    member_index: usize,
    /// Compare by name selector
    by_name: bool,
    /// Compare by size selector
    by_size: bool,
    /// Last status message shown in the footer
    status: Option<String>,
    /// Whether deletions bypass the trash
    permanent: bool,
    /// Color palette
    theme: Theme,
}

impl App {
    /// Create an app over an already scanned registry.
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        let mode = registry.mode();
        Self {
            mode: AppMode::Reviewing,
            registry,
            member_index: 0,
            by_name: mode.compares_name(),
            by_size: mode.compares_size(),
            status: None,
            permanent: false,
            theme: Theme::default(),
        }
    }

    /// Mark deletions as permanent (affects the confirmation text only).
    #[must_use]
    pub fn with_permanent(mut self, permanent: bool) -> Self {
        self.permanent = permanent;
        self
    }

    /// Use a specific color palette.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    // ==================== Mode Management ====================

    /// Get the current application mode.
    #[must_use]
    pub fn mode(&self) -> AppMode {
        self.mode
    }

    /// Set the application mode.
    pub fn set_mode(&mut self, mode: AppMode) {
        log::debug!("Mode transition: {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
    }

    /// Check if the application should quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.mode.is_done()
    }

    // ==================== Accessors ====================

    /// The session registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Consume the app, returning the registry.
    #[must_use]
    pub fn into_registry(self) -> Registry {
        self.registry
    }

    /// The selected group, if any.
    #[must_use]
    pub fn current_group(&self) -> Option<(&GroupKey, &Group)> {
        self.registry.current_group()
    }

    /// The highlighted file, if any.
    #[must_use]
    pub fn current_member(&self) -> Option<&Member> {
        self.current_group()
            .and_then(|(_, group)| group.member(self.member_index))
    }

    /// Index of the highlighted file within the current group.
    #[must_use]
    pub fn member_index(&self) -> usize {
        self.member_index
    }

    /// The two comparison selectors as `(by_name, by_size)`.
    #[must_use]
    pub fn selectors(&self) -> (bool, bool) {
        (self.by_name, self.by_size)
    }

    /// The last status message.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Whether deletions bypass the trash.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        self.permanent
    }

    /// The color palette.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    fn set_status(&mut self, message: String) {
        log::info!("{}", message);
        self.status = Some(message);
    }

    // ==================== Navigation ====================

    /// Highlight the next file in the current group, stopping at the last.
    pub fn next_member(&mut self) {
        if !self.mode.is_navigable() {
            return;
        }
        if let Some((_, group)) = self.current_group() {
            if self.member_index + 1 < group.len() {
                self.member_index += 1;
                log::trace!("Navigate next: member_index = {}", self.member_index);
            }
        }
    }

    /// Highlight the previous file in the current group, stopping at the first.
    pub fn previous_member(&mut self) {
        if !self.mode.is_navigable() {
            return;
        }
        self.member_index = self.member_index.saturating_sub(1);
    }

    /// Navigate to the next duplicate group.
    pub fn next_group(&mut self) {
        if !self.mode.is_navigable() {
            return;
        }
        let before = self.registry.cursor();
        self.registry.next_group();
        if self.registry.cursor() != before {
            self.member_index = 0;
        }
    }

    /// Navigate to the previous duplicate group.
    pub fn previous_group(&mut self) {
        if !self.mode.is_navigable() {
            return;
        }
        let before = self.registry.cursor();
        self.registry.previous_group();
        if self.registry.cursor() != before {
            self.member_index = 0;
        }
    }

    fn clamp_member_index(&mut self) {
        let len = self.current_group().map_or(0, |(_, g)| g.len());
        if self.member_index >= len {
            self.member_index = len.saturating_sub(1);
        }
    }

    // ==================== Registry Commands ====================

    /// Delete the highlighted file through the registry.
    ///
    /// Success and failure are both reported in the status line; the
    /// session continues either way.
    pub fn delete_current(&mut self) {
        let Some((key, path)) = self
            .current_group()
            .zip(self.current_member())
            .map(|((key, _), member)| (key.clone(), member.path.clone()))
        else {
            return;
        };

        match self.registry.delete_member(&key, &path) {
            Ok(DeleteOutcome::Shrunk { .. }) => {
                self.clamp_member_index();
                self.set_status(format!("Deleted: {}", path.display()));
            }
            Ok(DeleteOutcome::Resolved) => {
                self.member_index = 0;
                self.set_status(format!("Deleted: {}", path.display()));
            }
            Err(RegistryError::DeletionFailed { path, source }) => {
                self.set_status(format!("Failed to delete: {} - {}", path.display(), source));
            }
            Err(e) => {
                self.set_status(format!("Failed to delete: {} - {}", path.display(), e));
            }
        }
    }

    /// Scan the directory again, keeping the selected group if it survives.
    ///
    /// The highlighted file stays highlighted when it is still listed in the
    /// selected group, even if the group's key changed.
    pub fn rescan(&mut self) {
        let selected = self.current_group().map(|(key, _)| key.clone());
        let highlighted = self.current_member().map(|m| m.path.clone());
        match self.registry.rescan() {
            Ok(()) => {
                let position = self.current_group().and_then(|(_, group)| {
                    let path = highlighted.as_deref()?;
                    group.paths().position(|p| p == path)
                });
                let same_group =
                    selected.as_ref() == self.current_group().map(|(key, _)| key);
                match position {
                    Some(index) => self.member_index = index,
                    None if same_group => self.clamp_member_index(),
                    None => self.member_index = 0,
                }
                self.set_status(format!(
                    "Rescanned: {} duplicate groups",
                    self.registry.group_count()
                ));
            }
            Err(e) => self.set_status(format!("Rescan failed: {}", e)),
        }
    }

    /// Flip one selector, derive the new mode and rescan.
    ///
    /// Turning both selectors off falls back to comparing by name.
    fn toggle_selector(&mut self, name: bool) {
        if name {
            self.by_name = !self.by_name;
        } else {
            self.by_size = !self.by_size;
        }

        let requested = EquivalenceMode::from_selectors(self.by_name, self.by_size);
        let effective = self.registry.set_mode(requested);
        self.by_name = effective.compares_name();
        self.by_size = effective.compares_size();

        self.rescan();
        if requested.is_none() {
            self.set_status("No comparison selected, comparing by name".to_string());
        }
    }

    // ==================== Action Handling ====================

    /// Handle a user action and update state accordingly.
    ///
    /// Returns true if the action was handled.
    pub fn handle_action(&mut self, action: Action) -> bool {
        log::trace!("Handling action: {:?} in mode {:?}", action, self.mode);

        match action {
            Action::NextMember => {
                self.next_member();
                true
            }
            Action::PreviousMember => {
                self.previous_member();
                true
            }
            Action::NextGroup => {
                self.next_group();
                true
            }
            Action::PreviousGroup => {
                self.previous_group();
                true
            }
            Action::Delete => {
                if self.mode == AppMode::Reviewing && self.current_member().is_some() {
                    self.set_mode(AppMode::Confirming);
                    true
                } else {
                    false
                }
            }
            Action::Confirm => {
                if self.mode == AppMode::Confirming {
                    self.delete_current();
                    self.set_mode(AppMode::Reviewing);
                    true
                } else {
                    false
                }
            }
            Action::Cancel => {
                if self.mode == AppMode::Confirming {
                    self.set_mode(AppMode::Reviewing);
                } else {
                    self.status = None;
                }
                true
            }
            Action::Rescan => {
                if self.mode.is_navigable() {
                    self.rescan();
                    true
                } else {
                    false
                }
            }
            Action::ToggleByName | Action::ToggleBySize => {
                if self.mode.is_navigable() {
                    self.toggle_selector(action == Action::ToggleByName);
                    true
                } else {
                    false
                }
            }
            Action::Quit => {
                self.set_mode(AppMode::Quitting);
                true
            }
        }
    }
}
