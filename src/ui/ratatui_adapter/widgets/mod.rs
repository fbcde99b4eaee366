//! Ratatui widgets for the sheet picker
//!
//! Custom widgets for rendering the picker interface.

mod entry_bar;
mod filter_bar;
mod help_bar;
mod sheet_list;

pub use entry_bar::EntryBar;
pub use filter_bar::FilterBar;
pub use help_bar::{HelpBar, KeyHint};
pub use sheet_list::SheetList;
