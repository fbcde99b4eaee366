//! Sheet list widget with one checkbox per displayed sheet

use crate::model::Sheet;
use crate::ui::ratatui_adapter::state::{Focus, PickerState};
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Widget},
};

/// List of the sheets in the current filter, in natural order
pub struct SheetList<'a, 'c> {
    state: &'a PickerState<'c>,
    theme: &'a Theme,
}

impl<'a, 'c> SheetList<'a, 'c> {
    #[must_use]
    pub const fn new(state: &'a PickerState<'c>, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    fn render_row(&self, sheet: &Sheet, index: usize) -> ListItem<'static> {
        let is_cursor = index == self.state.cursor && self.state.focus == Focus::List;
        let checked = self.state.selection.is_checked(index);

        let cursor_char = if is_cursor { ">" } else { " " };
        let checkbox = if checked { "[x]" } else { "[ ]" };
        let checkbox_style = if checked {
            self.theme.checked_style()
        } else {
            self.theme.dimmed_style()
        };

        let mut spans = vec![
            Span::styled(cursor_char, self.theme.cursor_style()),
            Span::raw(" "),
            Span::styled(checkbox, checkbox_style),
            Span::raw(" "),
            Span::styled(format!("[{}]", sheet.number), self.theme.number_style()),
            Span::raw(" "),
            Span::raw(sheet.name.clone()),
        ];

        let group = self
            .state
            .selection
            .catalog()
            .group_of(sheet.id)
            .unwrap_or_default();
        if !group.trim().is_empty() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(group.to_string(), self.theme.group_style()));
        }

        let item = ListItem::new(Line::from(spans));
        if is_cursor {
            item.style(self.theme.selected_style())
        } else {
            item
        }
    }
}

impl Widget for SheetList<'_, '_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(
            " {} ({} shown, {} selected) ",
            self.state.selection.filter().label(),
            self.state.selection.len(),
            self.state.selection.chosen_count()
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.state.focus == Focus::List))
            .title(title);

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let displayed = self.state.selection.displayed();
        if displayed.is_empty() {
            Line::styled("No sheets in this group", self.theme.dimmed_style()).render(inner, buf);
            return;
        }

        let start = self.state.scroll_offset.min(displayed.len());
        let end = (start + usize::from(inner.height)).min(displayed.len());
        let items: Vec<ListItem> = displayed[start..end]
            .iter()
            .enumerate()
            .map(|(offset, sheet)| self.render_row(sheet, start + offset))
            .collect();

        List::new(items).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{AttributeIndex, NoReferences};
    use crate::catalog::SheetCatalog;
    use crate::testing::sample_sheets;
    use crate::ui::traits::PickerConfig;
    use crate::ui::types::PickerAction;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_renders_checkboxes_in_natural_order() {
        let catalog = SheetCatalog::build(
            sample_sheets(),
            &AttributeIndex::new("Discipline", &NoReferences),
        );
        let mut state = PickerState::new(&catalog, &PickerConfig::default());
        state.apply(&PickerAction::Toggle(1));
        let theme = Theme::default();

        let area = Rect::new(0, 0, 50, 7);
        let mut buf = Buffer::empty(area);
        SheetList::new(&state, &theme).render(area, &mut buf);

        assert!(row_text(&buf, 0).contains("All (5 shown, 1 selected)"));
        assert!(row_text(&buf, 1).contains("> [ ] [A1]"));
        assert!(row_text(&buf, 2).contains("[x] [A2]"));
        assert!(row_text(&buf, 3).contains("[A10]"));
        assert!(row_text(&buf, 3).contains("Architectural"));
    }
}
