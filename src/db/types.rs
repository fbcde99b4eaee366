//! Type wrappers for database keys
//!
//! Ids are stored big-endian so sled's byte ordering matches numeric order,
//! which keeps store enumeration stable across runs.

use super::error::DbError;
use crate::model::{ElementId, SheetId};

/// Key for the `sheets` tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetKey(pub SheetId);

impl SheetKey {
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 8] {
        self.0.0.to_be_bytes()
    }

    /// # Errors
    ///
    /// Returns `DbError::InvalidInput` if the slice is not 8 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DbError> {
        let raw: [u8; 8] = bytes
            .try_into()
            .map_err(|_| DbError::InvalidInput(format!("bad sheet key length {}", bytes.len())))?;
        Ok(Self(SheetId(u64::from_be_bytes(raw))))
    }
}

/// Key for the `elements` tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementKey(pub ElementId);

impl ElementKey {
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 8] {
        self.0.0.to_be_bytes()
    }
}

/// Key for the `numbers` reverse index (the sheet number's UTF-8 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberKey<'a>(pub &'a str);

impl NumberKey<'_> {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}
