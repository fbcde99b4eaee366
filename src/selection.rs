//! Checkbox selection over a catalog
//!
//! The model tracks two things separately:
//!
//! - the *displayed* order, i.e. the catalog filtered by the current
//!   [`BucketSelector`], which is what row indices refer to;
//! - the *chosen* flags, keyed by [`SheetId`], which survive filter switches.
//!
//! [`SelectionModel::selected`] reads the chosen flags across the whole
//! catalog, so a sheet ticked under one filter is still part of the final
//! selection after switching to another.

use crate::catalog::{BucketSelector, SheetCatalog};
use crate::model::{Sheet, SheetId};
use std::collections::HashSet;
use thiserror::Error;

/// Errors from row-indexed selection operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("row {index} is outside the displayed list ({len} rows)")]
    IndexOutOfRange { index: usize, len: usize },
}

type Result<T> = std::result::Result<T, SelectionError>;

/// Selection state for one run
#[derive(Debug, Clone)]
pub struct SelectionModel<'c> {
    catalog: &'c SheetCatalog,
    filter: BucketSelector,
    displayed: Vec<SheetId>,
    chosen: HashSet<SheetId>,
    /// Row last touched by a plain toggle, used as the range origin
    anchor: Option<usize>,
}

impl<'c> SelectionModel<'c> {
    /// Start with nothing chosen and the unfiltered view displayed
    #[must_use]
    pub fn new(catalog: &'c SheetCatalog) -> Self {
        let mut model = Self {
            catalog,
            filter: BucketSelector::All,
            displayed: Vec::new(),
            chosen: HashSet::new(),
            anchor: None,
        };
        model.show(BucketSelector::All);
        model
    }

    #[must_use]
    pub const fn catalog(&self) -> &'c SheetCatalog {
        self.catalog
    }

    /// Switch the displayed view; chosen flags are kept, the anchor is cleared
    pub fn show(&mut self, selector: BucketSelector) {
        self.displayed = self
            .catalog
            .filter(&selector)
            .into_iter()
            .map(|sheet| sheet.id)
            .collect();
        tracing::debug!(filter = %selector, rows = self.displayed.len(), "filter changed");
        self.filter = selector;
        self.anchor = None;
    }

    #[must_use]
    pub const fn filter(&self) -> &BucketSelector {
        &self.filter
    }

    /// Sheets in the current displayed order
    #[must_use]
    pub fn displayed(&self) -> Vec<&'c Sheet> {
        self.displayed
            .iter()
            .filter_map(|id| self.catalog.get(*id))
            .collect()
    }

    /// Number of displayed rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.displayed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.displayed.is_empty()
    }

    #[must_use]
    pub const fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    #[must_use]
    pub fn is_chosen(&self, id: SheetId) -> bool {
        self.chosen.contains(&id)
    }

    /// Whether the displayed row is checked (false when out of range)
    #[must_use]
    pub fn is_checked(&self, index: usize) -> bool {
        self.displayed
            .get(index)
            .is_some_and(|id| self.chosen.contains(id))
    }

    /// Number of chosen sheets across the whole catalog
    #[must_use]
    pub fn chosen_count(&self) -> usize {
        self.chosen.len()
    }

    fn id_at(&self, index: usize) -> Result<SheetId> {
        self.displayed
            .get(index)
            .copied()
            .ok_or(SelectionError::IndexOutOfRange {
                index,
                len: self.displayed.len(),
            })
    }

    fn set(&mut self, id: SheetId, checked: bool) {
        if checked {
            self.chosen.insert(id);
        } else {
            self.chosen.remove(&id);
        }
    }

    /// Flip the row's checkbox and anchor at it; returns the new state
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::IndexOutOfRange` if `index` is not a displayed row.
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        let id = self.id_at(index)?;
        let checked = !self.chosen.contains(&id);
        self.set(id, checked);
        self.anchor = Some(index);
        Ok(checked)
    }

    /// Set the row's checkbox explicitly and anchor at it
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::IndexOutOfRange` if `index` is not a displayed row.
    pub fn set_checked(&mut self, index: usize, checked: bool) -> Result<()> {
        let id = self.id_at(index)?;
        self.set(id, checked);
        self.anchor = Some(index);
        Ok(())
    }

    /// Copy the anchor row's state onto every row between it and `index`
    ///
    /// Both ends are inclusive and the anchor moves to `index`. Without an
    /// anchor this does nothing and returns 0; otherwise it returns the number
    /// of rows in the range.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::IndexOutOfRange` if `index` is not a displayed row.
    pub fn range_toggle(&mut self, index: usize) -> Result<usize> {
        self.id_at(index)?;
        let Some(anchor) = self.anchor else {
            return Ok(0);
        };
        let state = self.is_checked(anchor);
        let (from, to) = (anchor.min(index), anchor.max(index));
        for row in from..=to {
            let id = self.displayed[row];
            self.set(id, state);
        }
        self.anchor = Some(index);
        Ok(to - from + 1)
    }

    /// Check every displayed row
    pub fn select_all(&mut self) {
        self.chosen.extend(self.displayed.iter().copied());
    }

    /// Uncheck every displayed row
    pub fn deselect_all(&mut self) {
        for id in &self.displayed {
            self.chosen.remove(id);
        }
    }

    /// Chosen sheets from the whole catalog, in ascending natural order
    #[must_use]
    pub fn selected(&self) -> Vec<&'c Sheet> {
        self.catalog
            .all_sorted()
            .into_iter()
            .filter(|sheet| self.chosen.contains(&sheet.id))
            .collect()
    }
}
