//! Core traits for UI abstraction layer

use super::error::Result;
use crate::catalog::{BucketSelector, SheetCatalog};
use crate::selection::SelectionModel;

/// Configuration for a sheet picker
#[derive(Debug, Clone)]
pub struct PickerConfig {
    /// Window title
    pub title: String,
    /// Filter displayed when the picker opens
    pub initial_filter: BucketSelector,
    /// Pre-filled start number text
    pub start_number: String,
    /// Pre-filled prefix text
    pub prefix: String,
}

impl PickerConfig {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            initial_filter: BucketSelector::All,
            start_number: "1".to_string(),
            prefix: String::new(),
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: BucketSelector) -> Self {
        self.initial_filter = filter;
        self
    }

    #[must_use]
    pub fn with_start_number(mut self, start_number: impl Into<String>) -> Self {
        self.start_number = start_number.into();
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self::new("Sheet renumbering")
    }
}

/// How the user left the picker
#[derive(Debug)]
pub enum PickerOutcome<'c> {
    /// Confirmed with the raw text of both entry fields
    Confirmed {
        selection: SelectionModel<'c>,
        start_number: String,
        prefix: String,
    },
    Cancelled,
}

/// Trait for sheet picker implementations
///
/// A picker shows the catalog, lets the user tick sheets under any filter
/// and returns the final selection model. Nothing is written to the store
/// while a picker runs.
pub trait SheetPicker {
    /// Run the picker over `catalog`
    ///
    /// # Errors
    ///
    /// Returns an error if the picker cannot be initialized or
    /// if the operation fails.
    fn pick<'c>(&self, catalog: &'c SheetCatalog, config: &PickerConfig)
    -> Result<PickerOutcome<'c>>;
}
