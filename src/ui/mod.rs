//! UI abstraction layer
//!
//! This module provides a backend-agnostic interface for choosing which
//! sheets to renumber. The renumbering flow only talks to the
//! [`SheetPicker`] trait, so the terminal UI can be swapped for a scripted
//! or mocked picker without touching business logic.
//!
//! # Core Types
//!
//! - **`SheetPicker`** - Interactive selection over a [`SheetCatalog`](crate::catalog::SheetCatalog)
//! - **`PickerAction`** - The gestures every picker understands (show, toggle, range toggle, all, none)
//! - **`PickerOutcome`** - The confirmed selection with start number and prefix text, or a cancellation
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      Renumbering flow                   │
//! │   (renumber::prepare, commands)         │
//! └────────────────┬────────────────────────┘
//!                  │ Uses trait
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │      SheetPicker                        │
//! └────────────────┬────────────────────────┘
//!                  │ Implemented by
//!      ┌───────────┼──────────────┐
//!      ▼           ▼              ▼
//! ┌──────────┐ ┌──────────────┐ ┌────────────┐
//! │ Ratatui  │ │ Scripted     │ │ Mock       │
//! │ (TUI)    │ │ (--all, -s)  │ │ (tests)    │
//! └──────────┘ └──────────────┘ └────────────┘
//! ```
//!
//! ## Implementing a Custom Picker
//!
//! ```
//! use sheetnum::catalog::SheetCatalog;
//! use sheetnum::selection::SelectionModel;
//! use sheetnum::ui::{PickerConfig, PickerOutcome, Result, SheetPicker};
//!
//! struct FirstSheetPicker;
//!
//! impl SheetPicker for FirstSheetPicker {
//!     fn pick<'c>(
//!         &self,
//!         catalog: &'c SheetCatalog,
//!         config: &PickerConfig,
//!     ) -> Result<PickerOutcome<'c>> {
//!         let mut selection = SelectionModel::new(catalog);
//!         selection.show(config.initial_filter.clone());
//!         if !selection.is_empty() {
//!             selection.toggle(0).ok();
//!         }
//!         Ok(PickerOutcome::Confirmed {
//!             selection,
//!             start_number: config.start_number.clone(),
//!             prefix: config.prefix.clone(),
//!         })
//!     }
//! }
//! ```

mod error;
mod traits;
mod types;

pub mod mock;
pub mod ratatui_adapter;
pub mod scripted;

pub use error::{Result, UiError};
pub use mock::MockPicker;
pub use ratatui_adapter::RatatuiPicker;
pub use scripted::ScriptedPicker;
pub use traits::{PickerConfig, PickerOutcome, SheetPicker};
pub use types::PickerAction;
