//! Picker state for the ratatui TUI
//!
//! Wraps a [`SelectionModel`] with everything the terminal needs on top:
//! cursor and scroll position, the filter cycle, the two entry fields and the
//! last rendered list area for mouse hit testing.

use crate::catalog::{BucketSelector, SheetCatalog};
use crate::selection::SelectionModel;
use crate::ui::traits::{PickerConfig, PickerOutcome};
use crate::ui::types::PickerAction;
use ratatui::layout::Rect;

/// Which part of the picker receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    StartNumber,
    Prefix,
}

/// Single-line editable text with a character cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    /// Cursor position in characters
    cursor: usize,
}

impl TextField {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map_or(self.value.len(), |(i, _)| i)
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub const fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub const fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

/// Complete state of one picker session
#[derive(Debug)]
pub struct PickerState<'c> {
    pub title: String,
    pub selection: SelectionModel<'c>,
    /// Filters in cycle order, `All` first
    pub filters: Vec<BucketSelector>,
    pub filter_index: usize,
    /// Row under the cursor, an index into the displayed list
    pub cursor: usize,
    pub scroll_offset: usize,
    /// Rows that fit in the list area at the last render
    pub visible_height: usize,
    /// Inner area of the list at the last render
    pub list_area: Rect,
    pub focus: Focus,
    pub start_number: TextField,
    pub prefix: TextField,
}

impl<'c> PickerState<'c> {
    #[must_use]
    pub fn new(catalog: &'c SheetCatalog, config: &PickerConfig) -> Self {
        let filters = catalog.selectors();
        let filter_index = filters
            .iter()
            .position(|f| *f == config.initial_filter)
            .unwrap_or(0);
        let mut selection = SelectionModel::new(catalog);
        selection.show(config.initial_filter.clone());
        Self {
            title: config.title.clone(),
            selection,
            filters,
            filter_index,
            cursor: 0,
            scroll_offset: 0,
            visible_height: 10,
            list_area: Rect::default(),
            focus: Focus::List,
            start_number: TextField::new(config.start_number.clone()),
            prefix: TextField::new(config.prefix.clone()),
        }
    }

    /// Apply a gesture and keep the cursor on a valid row
    pub fn apply(&mut self, action: &PickerAction) {
        action.apply(&mut self.selection);
        if matches!(action, PickerAction::Show(_)) {
            self.cursor = 0;
            self.scroll_offset = 0;
        }
        self.clamp_cursor();
    }

    /// Move to the next (`forward`) or previous filter
    pub fn cycle_filter(&mut self, forward: bool) {
        if self.filters.is_empty() {
            return;
        }
        let len = self.filters.len();
        self.filter_index = if forward {
            (self.filter_index + 1) % len
        } else {
            (self.filter_index + len - 1) % len
        };
        let selector = self.filters[self.filter_index].clone();
        self.apply(&PickerAction::Show(selector));
    }

    fn clamp_cursor(&mut self) {
        let len = self.selection.len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
        self.ensure_visible();
    }

    fn ensure_visible(&mut self) {
        let height = self.visible_height.max(1);
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + height {
            self.scroll_offset = self.cursor + 1 - height;
        }
    }

    /// Record where the list rows were drawn and keep the cursor in view
    pub fn set_list_area(&mut self, area: Rect) {
        self.list_area = area;
        self.visible_height = usize::from(area.height);
        self.ensure_visible();
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.ensure_visible();
    }

    pub fn cursor_down(&mut self) {
        self.cursor += 1;
        self.clamp_cursor();
    }

    pub fn page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.visible_height.max(1));
        self.ensure_visible();
    }

    pub fn page_down(&mut self) {
        self.cursor += self.visible_height.max(1);
        self.clamp_cursor();
    }

    pub fn jump_to_start(&mut self) {
        self.cursor = 0;
        self.ensure_visible();
    }

    pub fn jump_to_end(&mut self) {
        self.cursor = self.selection.len().saturating_sub(1);
        self.ensure_visible();
    }

    /// Displayed row at a terminal position, if the position is on the list
    #[must_use]
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.list_area;
        if column < area.x
            || column >= area.x + area.width
            || row < area.y
            || row >= area.y + area.height
        {
            return None;
        }
        let index = self.scroll_offset + usize::from(row - area.y);
        (index < self.selection.len()).then_some(index)
    }

    /// Text field with the focus, if any
    pub fn focused_field(&mut self) -> Option<&mut TextField> {
        match self.focus {
            Focus::List => None,
            Focus::StartNumber => Some(&mut self.start_number),
            Focus::Prefix => Some(&mut self.prefix),
        }
    }

    /// Finish the session as a confirmation
    #[must_use]
    pub fn into_outcome(self) -> PickerOutcome<'c> {
        PickerOutcome::Confirmed {
            selection: self.selection,
            start_number: self.start_number.value,
            prefix: self.prefix.value,
        }
    }
}
