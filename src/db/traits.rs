//! Store abstraction used by the renumbering core
//!
//! The core never talks to sled directly: it enumerates sheets and writes
//! numbers through these traits, so the executor can be exercised against
//! any host that offers a transaction scope.

use super::error::DbError;
use crate::attributes::ReferenceResolver;
use crate::model::{Sheet, SheetId};

/// A source of sheets that accepts number changes inside a transaction
pub trait SheetStore: ReferenceResolver {
    /// Sheets eligible for numbering, in stable store order
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the store cannot be read.
    fn sheets(&self) -> Result<Vec<Sheet>, DbError>;

    /// Discard any transaction that is still open
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the open transaction cannot be closed.
    fn force_close_transaction(&self) -> Result<(), DbError>;

    /// Open a transaction labelled `label`
    ///
    /// # Errors
    ///
    /// Returns `DbError::TransactionActive` if another transaction is open.
    fn begin(&self, label: &str) -> Result<Box<dyn StoreTransaction + '_>, DbError>;
}

/// An open transaction; dropping it without `commit` rolls it back
pub trait StoreTransaction {
    /// Stage a new number for one sheet
    ///
    /// # Errors
    ///
    /// Returns `DbError` if this sheet cannot take the number; the
    /// transaction stays usable for other sheets.
    fn set_sheet_number(&mut self, id: SheetId, number: &str) -> Result<(), DbError>;

    /// Apply every staged write atomically
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the transaction was closed or the write fails.
    fn commit(self: Box<Self>) -> Result<(), DbError>;
}
