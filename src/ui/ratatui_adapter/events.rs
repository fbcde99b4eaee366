//! Event handling for the ratatui TUI
//!
//! Handles keyboard and mouse events, mapping them to picker actions.

use super::state::{Focus, PickerState};
use crate::ui::types::PickerAction;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running the event loop
    Continue,
    /// Close the picker and renumber the selection
    Confirm,
    /// Close the picker without renumbering
    Abort,
    /// No action taken
    Ignored,
}

fn act(state: &mut PickerState<'_>, action: &PickerAction) -> EventResult {
    state.apply(action);
    EventResult::Continue
}

/// Handle keys while the sheet list has the focus
fn handle_list_key(state: &mut PickerState<'_>, key: KeyEvent) -> EventResult {
    match (key.code, key.modifiers) {
        (KeyCode::Esc | KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            EventResult::Abort
        }
        (KeyCode::Enter, _) => EventResult::Confirm,

        // Navigation
        (KeyCode::Up | KeyCode::Char('k'), _) => {
            state.cursor_up();
            EventResult::Continue
        }
        (KeyCode::Down | KeyCode::Char('j'), _) => {
            state.cursor_down();
            EventResult::Continue
        }
        (KeyCode::PageUp, _) => {
            state.page_up();
            EventResult::Continue
        }
        (KeyCode::PageDown, _) => {
            state.page_down();
            EventResult::Continue
        }
        (KeyCode::Home, _) => {
            state.jump_to_start();
            EventResult::Continue
        }
        (KeyCode::End, _) => {
            state.jump_to_end();
            EventResult::Continue
        }

        // Checkboxes
        (KeyCode::Char(' '), KeyModifiers::SHIFT) | (KeyCode::Char('r'), _) => {
            let row = state.cursor;
            act(state, &PickerAction::RangeToggle(row))
        }
        (KeyCode::Char(' '), _) => {
            let row = state.cursor;
            act(state, &PickerAction::Toggle(row))
        }
        (KeyCode::Char('a'), _) => act(state, &PickerAction::SelectAll),
        (KeyCode::Char('n'), _) => act(state, &PickerAction::DeselectAll),

        // Filters
        (KeyCode::Tab | KeyCode::Right, _) => {
            state.cycle_filter(true);
            EventResult::Continue
        }
        (KeyCode::BackTab | KeyCode::Left, _) => {
            state.cycle_filter(false);
            EventResult::Continue
        }

        // Entry fields
        (KeyCode::Char('s'), _) => {
            state.focus = Focus::StartNumber;
            EventResult::Continue
        }
        (KeyCode::Char('p'), _) => {
            state.focus = Focus::Prefix;
            EventResult::Continue
        }

        _ => EventResult::Ignored,
    }
}

/// Handle keys while an entry field has the focus
fn handle_field_key(state: &mut PickerState<'_>, key: KeyEvent) -> EventResult {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return EventResult::Abort,
        (KeyCode::Esc | KeyCode::Enter, _) => {
            state.focus = Focus::List;
            return EventResult::Continue;
        }
        (KeyCode::Tab | KeyCode::BackTab, _) => {
            state.focus = match state.focus {
                Focus::StartNumber => Focus::Prefix,
                Focus::Prefix | Focus::List => Focus::StartNumber,
            };
            return EventResult::Continue;
        }
        _ => {}
    }

    let Some(field) = state.focused_field() else {
        return EventResult::Ignored;
    };
    match (key.code, key.modifiers) {
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => field.clear(),
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => field.insert(c),
        (KeyCode::Backspace, _) => field.backspace(),
        (KeyCode::Delete, _) => field.delete(),
        (KeyCode::Left, _) => field.left(),
        (KeyCode::Right, _) => field.right(),
        (KeyCode::Home, _) => field.home(),
        (KeyCode::End, _) => field.end(),
        _ => return EventResult::Ignored,
    }
    EventResult::Continue
}

/// Handle a key press
pub fn handle_key(state: &mut PickerState<'_>, key: KeyEvent) -> EventResult {
    if key.kind == KeyEventKind::Release {
        return EventResult::Ignored;
    }
    match state.focus {
        Focus::List => handle_list_key(state, key),
        Focus::StartNumber | Focus::Prefix => handle_field_key(state, key),
    }
}

/// Handle mouse events: click toggles a row, shift-click toggles a range
pub fn handle_mouse(state: &mut PickerState<'_>, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            state.cursor_up();
            EventResult::Continue
        }
        MouseEventKind::ScrollDown => {
            state.cursor_down();
            EventResult::Continue
        }
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(row) = state.row_at(mouse.column, mouse.row) else {
                return EventResult::Ignored;
            };
            state.focus = Focus::List;
            state.cursor = row;
            if mouse.modifiers.contains(KeyModifiers::SHIFT) {
                act(state, &PickerAction::RangeToggle(row))
            } else {
                act(state, &PickerAction::Toggle(row))
            }
        }
        _ => EventResult::Ignored,
    }
}

/// Poll for events and handle them
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn poll_and_handle(
    state: &mut PickerState<'_>,
    timeout: Duration,
) -> std::io::Result<EventResult> {
    if !event::poll(timeout)? {
        return Ok(EventResult::Continue);
    }

    let result = match event::read()? {
        Event::Key(key) => handle_key(state, key),
        Event::Mouse(mouse) => handle_mouse(state, mouse),
        Event::Resize(_, _) => EventResult::Continue,
        _ => EventResult::Ignored,
    };

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{AttributeIndex, NoReferences};
    use crate::catalog::{BucketSelector, SheetCatalog};
    use crate::testing::sample_sheets;
    use crate::ui::traits::PickerConfig;
    use ratatui::layout::Rect;

    fn catalog() -> SheetCatalog {
        SheetCatalog::build(
            sample_sheets(),
            &AttributeIndex::new("Discipline", &NoReferences),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16, modifiers: KeyModifiers) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers,
        }
    }

    fn checked(state: &PickerState<'_>) -> Vec<bool> {
        (0..state.selection.len())
            .map(|i| state.selection.is_checked(i))
            .collect()
    }

    #[test]
    fn test_space_and_range_keys() {
        let catalog = catalog();
        let mut state = PickerState::new(&catalog, &PickerConfig::default());
        handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(handle_key(&mut state, key(KeyCode::Char(' '))), EventResult::Continue);
        handle_key(&mut state, key(KeyCode::Down));
        handle_key(&mut state, key(KeyCode::Down));
        handle_key(&mut state, key(KeyCode::Char('r')));
        assert_eq!(checked(&state), vec![false, true, true, true, false]);
    }

    #[test]
    fn test_select_all_and_none_keys() {
        let catalog = catalog();
        let mut state = PickerState::new(&catalog, &PickerConfig::default());
        handle_key(&mut state, key(KeyCode::Char('a')));
        assert_eq!(state.selection.chosen_count(), 5);
        handle_key(&mut state, key(KeyCode::Tab));
        handle_key(&mut state, key(KeyCode::Char('n')));
        assert_eq!(state.selection.chosen_count(), 2);
    }

    #[test]
    fn test_filter_keys() {
        let catalog = catalog();
        let mut state = PickerState::new(&catalog, &PickerConfig::default());
        handle_key(&mut state, key(KeyCode::BackTab));
        assert_eq!(*state.selection.filter(), BucketSelector::Blank);
        handle_key(&mut state, key(KeyCode::Tab));
        assert_eq!(*state.selection.filter(), BucketSelector::All);
    }

    #[test]
    fn test_confirm_and_abort() {
        let catalog = catalog();
        let mut state = PickerState::new(&catalog, &PickerConfig::default());
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter)), EventResult::Confirm);
        assert_eq!(handle_key(&mut state, key(KeyCode::Esc)), EventResult::Abort);
        assert_eq!(
            handle_key(
                &mut state,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
            ),
            EventResult::Abort
        );
    }

    #[test]
    fn test_editing_fields() {
        let catalog = catalog();
        let mut state = PickerState::new(&catalog, &PickerConfig::default());
        handle_key(&mut state, key(KeyCode::Char('p')));
        assert_eq!(state.focus, Focus::Prefix);
        for c in "A-".chars() {
            handle_key(&mut state, key(KeyCode::Char(c)));
        }
        // Esc leaves the field instead of closing the picker
        assert_eq!(handle_key(&mut state, key(KeyCode::Esc)), EventResult::Continue);
        assert_eq!(state.focus, Focus::List);
        assert_eq!(state.prefix.value(), "A-");

        handle_key(&mut state, key(KeyCode::Char('s')));
        handle_key(&mut state, key(KeyCode::Backspace));
        handle_key(&mut state, key(KeyCode::Char('7')));
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter)), EventResult::Continue);
        assert_eq!(state.start_number.value(), "7");
        // Letters typed in a field never reach the list
        assert_eq!(state.selection.chosen_count(), 0);
    }

    #[test]
    fn test_mouse_click_and_shift_click() {
        let catalog = catalog();
        let mut state = PickerState::new(&catalog, &PickerConfig::default());
        state.list_area = Rect::new(0, 2, 40, 10);

        handle_mouse(&mut state, click(3, 2, KeyModifiers::NONE));
        handle_mouse(&mut state, click(3, 5, KeyModifiers::SHIFT));
        assert_eq!(checked(&state), vec![true, true, true, true, false]);
        assert_eq!(state.cursor, 3);

        assert_eq!(
            handle_mouse(&mut state, click(3, 30, KeyModifiers::NONE)),
            EventResult::Ignored
        );
    }

    #[test]
    fn test_shift_click_without_anchor_does_nothing() {
        let catalog = catalog();
        let mut state = PickerState::new(&catalog, &PickerConfig::default());
        state.list_area = Rect::new(0, 0, 40, 10);
        handle_mouse(&mut state, click(1, 3, KeyModifiers::SHIFT));
        assert_eq!(state.selection.chosen_count(), 0);
    }
}
