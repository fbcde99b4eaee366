//! Filter bar widget showing every bucket with its size

use crate::ui::ratatui_adapter::state::PickerState;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Row of filter tabs; the one currently shown is highlighted
pub struct FilterBar<'a, 'c> {
    state: &'a PickerState<'c>,
    theme: &'a Theme,
}

impl<'a, 'c> FilterBar<'a, 'c> {
    #[must_use]
    pub const fn new(state: &'a PickerState<'c>, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for FilterBar<'_, '_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let catalog = self.state.selection.catalog();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false))
            .title(format!(" {} by {} ", self.state.title, catalog.attribute()));

        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = Vec::new();
        for (i, selector) in self.state.filters.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", self.theme.dimmed_style()));
            }
            let style = if i == self.state.filter_index {
                self.theme.active_filter_style()
            } else {
                self.theme.normal_style()
            };
            let count = catalog.filter(selector).len();
            spans.push(Span::styled(format!("{} ({count})", selector.label()), style));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
