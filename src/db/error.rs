//! Database-specific error types
//!
//! This module defines all error types that can occur during store operations.
//!
//! # Error Types
//!
//! - **`SledError`**: Errors from the underlying sled embedded database
//! - **`DecodeError`** / **`EncodeError`**: bincode failures on stored values
//! - **`SheetNotFound`**, **`DuplicateNumber`**, **`InvalidInput`**: per-sheet
//!   write rejections raised inside a transaction
//! - **`TransactionActive`**, **`TransactionClosed`**, **`TransactionAborted`**:
//!   transaction lifecycle failures
//!
//! All errors implement `std::error::Error` via the `thiserror` crate.

use crate::model::SheetId;
use thiserror::Error;

/// Database-specific errors
#[derive(Debug, Error)]
pub enum DbError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Represents a bincode decoding error
    #[error("Error while decoding data: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),

    /// Represents a bincode encoding error
    #[error("Error while encoding data: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),

    /// No sheet with this id exists in the store
    #[error("Sheet {0} not found")]
    SheetNotFound(SheetId),

    /// Another sheet already carries this number
    #[error("Sheet number '{number}' is already used by sheet {owner}")]
    DuplicateNumber { number: String, owner: SheetId },

    /// Invalid input provided (e.g., an empty sheet number)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A transaction is already open and was not closed
    #[error("Transaction '{0}' is already open")]
    TransactionActive(String),

    /// The transaction was force-closed or already finished
    #[error("Transaction '{0}' is no longer open")]
    TransactionClosed(String),

    /// The storage layer aborted the commit
    #[error("Transaction aborted by the storage layer")]
    TransactionAborted,
}

impl From<sled::transaction::TransactionError<()>> for DbError {
    fn from(err: sled::transaction::TransactionError<()>) -> Self {
        match err {
            sled::transaction::TransactionError::Abort(()) => Self::TransactionAborted,
            sled::transaction::TransactionError::Storage(e) => Self::SledError(e),
        }
    }
}
