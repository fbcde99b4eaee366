//! Sheetnum - Pick drawing sheets and renumber them in natural order
//!
//! This library keeps a set of drawing sheets in an embedded database,
//! groups them by an attribute for filtering, lets a picker choose some of
//! them and assigns `prefix + n` numbers to the choice inside one
//! transaction, in natural (human) order of the current numbers.
//!
//! # Example
//!
//! ```
//! use sheetnum::db::Database;
//! use sheetnum::model::{Sheet, SheetId};
//! use sheetnum::renumber::{RunOptions, RunReport, run};
//! use sheetnum::ui::{MockPicker, PickerAction};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::open_temporary()?;
//! db.insert_sheet(&Sheet::new(SheetId(1), "10", "Sections"))?;
//! db.insert_sheet(&Sheet::new(SheetId(2), "2", "Plans"))?;
//!
//! let picker = MockPicker::new(vec![PickerAction::SelectAll]).with_prefix("A-");
//! let report = run(&db, &picker, &RunOptions::default())?;
//!
//! assert!(matches!(report, RunReport::Completed(_)));
//! assert_eq!(db.get_sheet(SheetId(2))?.unwrap().number, "A-1");
//! assert_eq!(db.get_sheet(SheetId(1))?.unwrap().number, "A-2");
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

pub mod attributes;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod natural;
pub mod renumber;
pub mod selection;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum SheetnumError {
    /// Database error
    #[error("Database error: {0}")]
    DbError(#[from] db::DbError),
    /// Picker error
    #[error("UI error: {0}")]
    UiError(#[from] ui::UiError),
    /// Selection gesture error
    #[error("Selection error: {0}")]
    SelectionError(#[from] selection::SelectionError),
    /// Renumbering transaction error
    #[error("Renumbering error: {0}")]
    ExecuteError(#[from] renumber::ExecuteError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
