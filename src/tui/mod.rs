//! Terminal User Interface module.
//!
//! This module provides the interactive review of duplicate groups using
//! ratatui with the crossterm backend.
//!
//! # Overview
//!
//! - [`app`]: Application state (modes, navigation, selectors, status line)
//! - [`events`]: Keyboard event handling
//! - [`ui`]: Ratatui rendering
//! - [`run`]: Terminal setup and the main loop
//! - [`theme`]: Color palettes
//!
//! # Architecture
//!
//! The TUI follows a unidirectional data flow:
//! 1. Events are captured from the terminal (crossterm)
//! 2. Events are translated to Actions
//! 3. Actions modify the App state and its registry
//! 4. The UI renders based on the current App state

pub mod app;
pub mod events;
pub mod run;
pub mod theme;
pub mod ui;

pub use app::{Action, App, AppMode};
pub use events::{EventError, EventHandler};
pub use run::{run_tui, TuiError};
pub use theme::Theme;
pub use ui::{format_size, render, truncate_path, truncate_string};
