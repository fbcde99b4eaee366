//! Ratatui-based sheet picker adapter
//!
//! This module provides an implementation of the `SheetPicker` trait
//! using ratatui (TUI framework) and crossterm (terminal events).
//!
//! # Layout
//!
//! ```text
//! ┌ Sheet renumbering by Discipline ──────────┐
//! │ All (5) | Architectural (3) | (no value) (1)
//! └───────────────────────────────────────────┘
//! ┌ All (5 shown, 2 selected) ────────────────┐
//! │> [x] [A1] Site Plan  Architectural        │
//! │  [x] [A2] Ground Floor  Architectural     │
//! │  [ ] [G1] Cover                           │
//! └───────────────────────────────────────────┘
//! ┌ Start number (s) ───┐┌ Prefix (p) ────────┐
//! │1                    ││A-                  │
//! └─────────────────────┘└────────────────────┘
//! Space:toggle  shift+Space/r:range  Enter:renumber
//! ```
//!
//! Rows can also be toggled with the mouse; shift-click copies the state of
//! the last toggled row onto every row up to the clicked one.

mod events;
mod picker;
mod state;
mod theme;
pub mod widgets;

pub use events::EventResult;
pub use picker::RatatuiPicker;
pub use state::{Focus, PickerState, TextField};
pub use theme::Theme;
