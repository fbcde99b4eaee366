//! Ratatui-based sheet picker implementation
//!
//! Implements the `SheetPicker` trait with a full-screen checkbox list,
//! filter tabs and the two entry fields.

use super::events::{EventResult, poll_and_handle};
use super::state::PickerState;
use super::theme::Theme;
use super::widgets::{EntryBar, FilterBar, HelpBar, SheetList};
use crate::catalog::SheetCatalog;
use crate::ui::error::{Result, UiError};
use crate::ui::traits::{PickerConfig, PickerOutcome, SheetPicker};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    widgets::{Block, Borders},
};
use std::io::{self, IsTerminal, Stdout, Write};
use std::time::Duration;
use tracing::debug;

/// Ratatui-based sheet picker
#[derive(Debug, Clone, Default)]
pub struct RatatuiPicker {
    theme: Theme,
}

impl RatatuiPicker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom theme
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Setup terminal for TUI
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        if !io::stdout().is_terminal() {
            return Err(UiError::TerminalError(
                "stdout is not a terminal; use --all or --sheet to select without the picker"
                    .to_string(),
            ));
        }
        enable_raw_mode()?;
        Self::enter_screen(io::stdout()).inspect_err(|_| {
            let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        })
    }

    /// Switch to the alternate screen and wrap `out` in a terminal
    fn enter_screen<W: Write>(mut out: W) -> Result<Terminal<CrosstermBackend<W>>> {
        execute!(out, EnterAlternateScreen, EnableMouseCapture)?;
        Ok(Terminal::new(CrosstermBackend::new(out))?)
    }

    /// Cleanup terminal after TUI
    fn cleanup_terminal() -> Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Draw one frame and record the list geometry for mouse hit testing
    fn render(&self, frame: &mut Frame, state: &mut PickerState<'_>) {
        let [filter_area, list_area, entry_area, help_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        state.set_list_area(Block::default().borders(Borders::ALL).inner(list_area));

        frame.render_widget(FilterBar::new(state, &self.theme), filter_area);
        frame.render_widget(SheetList::new(state, &self.theme), list_area);
        frame.render_widget(EntryBar::new(state, &self.theme), entry_area);
        let hints = HelpBar::hints_for(state.focus);
        frame.render_widget(HelpBar::new(&hints, &self.theme), help_area);
    }

    fn run_loop<'c>(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        catalog: &'c SheetCatalog,
        config: &PickerConfig,
    ) -> Result<PickerOutcome<'c>> {
        let mut state = PickerState::new(catalog, config);

        loop {
            terminal.draw(|frame| self.render(frame, &mut state))?;

            match poll_and_handle(&mut state, Duration::from_millis(100))? {
                EventResult::Confirm => {
                    debug!(
                        chosen = state.selection.chosen_count(),
                        "picker confirmed"
                    );
                    return Ok(state.into_outcome());
                }
                EventResult::Abort => {
                    debug!("picker cancelled");
                    return Ok(PickerOutcome::Cancelled);
                }
                EventResult::Continue | EventResult::Ignored => {}
            }
        }
    }
}

impl SheetPicker for RatatuiPicker {
    fn pick<'c>(
        &self,
        catalog: &'c SheetCatalog,
        config: &PickerConfig,
    ) -> Result<PickerOutcome<'c>> {
        let mut terminal = Self::setup_terminal()?;

        // Run the event loop, ensuring cleanup happens
        let result = self.run_loop(&mut terminal, catalog, config);

        // Cleanup terminal (always, even on error)
        if let Err(e) = Self::cleanup_terminal() {
            eprintln!("Warning: terminal cleanup failed: {e}");
        }

        result
    }
}
