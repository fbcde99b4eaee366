//! Entry bar widget with the start number and prefix fields

use crate::renumber::DEFAULT_START_NUMBER;
use crate::ui::ratatui_adapter::state::{Focus, PickerState, TextField};
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use std::num::NonZeroU64;

/// Two side-by-side text fields below the list
pub struct EntryBar<'a, 'c> {
    state: &'a PickerState<'c>,
    theme: &'a Theme,
}

impl<'a, 'c> EntryBar<'a, 'c> {
    #[must_use]
    pub const fn new(state: &'a PickerState<'c>, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    fn field_line(field: &TextField, focused: bool, style: Style) -> Line<'static> {
        if !focused {
            return Line::from(Span::styled(field.value().to_string(), style));
        }
        let split = field
            .value()
            .char_indices()
            .nth(field.cursor())
            .map_or(field.value().len(), |(i, _)| i);
        let (before, after) = field.value().split_at(split);
        Line::from(vec![
            Span::styled(before.to_string(), style),
            Span::styled("│", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            Span::styled(after.to_string(), style),
        ])
    }

    fn render_field(
        &self,
        field: &TextField,
        title: String,
        focus: Focus,
        style: Style,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let focused = self.state.focus == focus;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(focused))
            .title(title);
        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(Self::field_line(field, focused, style)).render(inner, buf);
    }
}

impl Widget for EntryBar<'_, '_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [start_area, prefix_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(area);

        // Show what the start number will actually be when the text is not usable
        let start = &self.state.start_number;
        let (start_title, start_style) = if start.value().trim().parse::<NonZeroU64>().is_ok() {
            (" Start number (s) ".to_string(), self.theme.normal_style())
        } else {
            (
                format!(" Start number (s): uses {DEFAULT_START_NUMBER} "),
                self.theme.error_style(),
            )
        };
        self.render_field(
            start,
            start_title,
            Focus::StartNumber,
            start_style,
            start_area,
            buf,
        );
        self.render_field(
            &self.state.prefix,
            " Prefix (p) ".to_string(),
            Focus::Prefix,
            self.theme.normal_style(),
            prefix_area,
            buf,
        );
    }
}
