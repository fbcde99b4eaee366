//! Help bar widget for displaying keybind hints

use crate::ui::ratatui_adapter::state::Focus;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// A keybind hint to display in the help bar
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// Key combination (e.g., "Space", "shift+click")
    pub key: String,
    /// Action description (e.g., "toggle", "renumber")
    pub action: String,
}

impl KeyHint {
    /// Create a new key hint
    #[must_use]
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Help bar widget that displays keybind hints at the bottom
pub struct HelpBar<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
}

impl<'a> HelpBar<'a> {
    #[must_use]
    pub const fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }

    /// Hints for whatever currently has the focus
    #[must_use]
    pub fn hints_for(focus: Focus) -> Vec<KeyHint> {
        match focus {
            Focus::List => vec![
                KeyHint::new("Space", "toggle"),
                KeyHint::new("shift+Space/r", "range"),
                KeyHint::new("a/n", "all/none"),
                KeyHint::new("Tab", "filter"),
                KeyHint::new("s/p", "start/prefix"),
                KeyHint::new("Enter", "renumber"),
                KeyHint::new("ESC", "cancel"),
            ],
            Focus::StartNumber | Focus::Prefix => vec![
                KeyHint::new("Tab", "next field"),
                KeyHint::new("ctrl+u", "clear"),
                KeyHint::new("Enter/ESC", "back to list"),
            ],
        }
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", self.theme.dimmed_style()));
            }
            spans.push(Span::styled(
                hint.key.as_str(),
                self.theme.cursor_style(),
            ));
            spans.push(Span::styled(":", self.theme.dimmed_style()));
            spans.push(Span::raw(hint.action.as_str()));
        }

        let line = Line::from(spans);
        Paragraph::new(line).render(area, buf);
    }
}
