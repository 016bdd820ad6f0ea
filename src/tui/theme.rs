//! TUI theming support.
//!
//! This module provides the `Theme` struct which defines the color palette
//! for the TUI. A monochrome palette is used when colors are disabled
//! (`--no-color` or `NO_COLOR`).

use ratatui::style::Color;

/// A collection of colors used for TUI components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub danger: Color,
    pub success: Color,
    pub dim: Color,
    pub normal: Color,
    pub inverted_fg: Color,
}

impl Theme {
    /// Create a high-contrast dark theme (default).
    ///
    /// Palette:
    /// - Primary: Cyan (headers, borders)
    /// - Secondary: Yellow (highlights)
    /// - Danger: Red (groups that lost a file, errors)
    /// - Success: Green (status messages)
    /// - Dim: DarkGray (secondary text)
    /// - Normal: White (main text)
    /// - Inverted FG: Black (text on colored background)
    pub fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Yellow,
            danger: Color::Red,
            success: Color::Green,
            dim: Color::DarkGray,
            normal: Color::White,
            inverted_fg: Color::Black,
        }
    }

    /// Create a palette that only uses the terminal's default colors.
    pub fn monochrome() -> Self {
        Self {
            primary: Color::Reset,
            secondary: Color::Reset,
            danger: Color::Reset,
            success: Color::Reset,
            dim: Color::Reset,
            normal: Color::Reset,
            inverted_fg: Color::Reset,
        }
    }

    /// Pick the palette for the `--no-color` setting.
    pub fn for_color(no_color: bool) -> Self {
        if no_color {
            Self::monochrome()
        } else {
            Self::dark()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
