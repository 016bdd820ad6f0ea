//! TUI event handling with crossterm.
//!
//! # Overview
//!
//! This module reads keyboard input and translates it to [`Action`]s. The
//! mapping depends on the current [`AppMode`]: while a deletion is being
//! confirmed only the confirm, cancel and quit keys do anything.
//!
//! | Key                         | Action          |
//! |-----------------------------|-----------------|
//! | `j` / Down                  | Next file       |
//! | `k` / Up                    | Previous file   |
//! | `J` / Right / PageDown / Tab| Next group      |
//! | `K` / Left / PageUp         | Previous group  |
//! | `d` / Delete                | Delete file     |
//! | `r` / F5                    | Rescan          |
//! | `n`                         | Toggle by name  |
//! | `s`                         | Toggle by size  |
//! | `q` / Ctrl+C                | Quit            |

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use thiserror::Error;

use super::app::{Action, AppMode};

/// Errors that can occur while reading terminal events.
#[derive(Debug, Error)]
pub enum EventError {
    /// Polling or reading from the terminal failed.
    #[error("failed to read terminal event: {0}")]
    Read(#[from] std::io::Error),
}

/// Reads terminal events and maps key presses to actions.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventHandler;

impl EventHandler {
    /// Create a new event handler.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Wait up to `timeout` for a key press and map it for `mode`.
    ///
    /// Returns `Ok(None)` on timeout, for non-key events and for unbound keys.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Read`] if the terminal cannot be read.
    pub fn poll(&self, timeout: Duration, mode: AppMode) -> Result<Option<Action>, EventError> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key(&key, mode)),
            _ => Ok(None),
        }
    }
}

/// Map a key press to an action for the given mode.
///
/// ```
/// use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
/// use dupereview::tui::app::{Action, AppMode};
/// use dupereview::tui::events::map_key;
///
/// let d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE);
/// assert_eq!(map_key(&d, AppMode::Reviewing), Some(Action::Delete));
/// assert_eq!(map_key(&d, AppMode::Confirming), None);
/// ```
#[must_use]
pub fn map_key(key: &KeyEvent, mode: AppMode) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match mode {
        AppMode::Confirming => match key.code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::Confirm),
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => Some(Action::Cancel),
            _ => None,
        },
        AppMode::Reviewing => match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextMember),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PreviousMember),
            KeyCode::Char('J') | KeyCode::Right | KeyCode::PageDown | KeyCode::Tab => {
                Some(Action::NextGroup)
            }
            KeyCode::Char('K') | KeyCode::Left | KeyCode::PageUp | KeyCode::BackTab => {
                Some(Action::PreviousGroup)
            }
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::Delete),
            KeyCode::Char('r') | KeyCode::F(5) => Some(Action::Rescan),
            KeyCode::Char('n') => Some(Action::ToggleByName),
            KeyCode::Char('s') => Some(Action::ToggleBySize),
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
        AppMode::Quitting => None,
    }
}
