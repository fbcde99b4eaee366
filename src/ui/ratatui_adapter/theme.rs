//! Color theme definitions for the ratatui TUI
//!
//! Defines colors and styles used throughout the picker.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color for the row under the cursor
    pub selection_bg: Color,
    /// Foreground color for the row under the cursor
    pub selection_fg: Color,
    /// Color for the cursor indicator and focused borders
    pub cursor: Color,
    /// Color for checked boxes
    pub checked: Color,
    /// Color for sheet numbers
    pub number: Color,
    /// Color for grouping values
    pub group: Color,
    /// Color for the active filter tab
    pub active_filter: Color,
    /// Color for invalid entry field contents
    pub error: Color,
    /// Color for borders
    pub border: Color,
    /// Color for dimmed/inactive text
    pub dimmed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            selection_bg: Color::Blue,
            selection_fg: Color::White,
            cursor: Color::Cyan,
            checked: Color::Green,
            number: Color::Yellow,
            group: Color::Magenta,
            active_filter: Color::Cyan,
            error: Color::Red,
            border: Color::DarkGray,
            dimmed: Color::DarkGray,
        }
    }

    /// Style for the row under the cursor
    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn normal_style(&self) -> Style {
        Style::default()
    }

    /// Style for the cursor indicator (>)
    #[must_use]
    pub fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.cursor)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for a checked box
    #[must_use]
    pub fn checked_style(&self) -> Style {
        Style::default()
            .fg(self.checked)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn number_style(&self) -> Style {
        Style::default().fg(self.number)
    }

    #[must_use]
    pub fn group_style(&self) -> Style {
        Style::default().fg(self.group)
    }

    /// Style for the filter tab currently shown
    #[must_use]
    pub fn active_filter_style(&self) -> Style {
        Style::default()
            .fg(self.active_filter)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Border style, highlighted when the block has the focus
    #[must_use]
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            self.cursor_style()
        } else {
            Style::default().fg(self.border)
        }
    }

    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }
}
