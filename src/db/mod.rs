//! Database wrapper module for sheetnum
//!
//! Provides the sheet store on top of sled.
//!
//! Uses multiple sled trees:
//! - `sheets`: sheet id -> bincode-encoded [`Sheet`]
//! - `elements`: element id -> display name (targets of reference attributes)
//! - `numbers`: reverse index sheet number -> sheet id
//!
//! Writes made during a renumbering run go through a [`DatabaseTransaction`],
//! which stages number changes and applies them in one atomic batch.

use crate::attributes::ReferenceResolver;
use crate::model::{ElementId, Sheet, SheetId};
use sled::{Db, Tree};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub mod error;
pub mod traits;
pub mod transaction;
pub mod types;

pub use error::DbError;
pub use traits::{SheetStore, StoreTransaction};
pub use transaction::DatabaseTransaction;
pub use types::{ElementKey, NumberKey, SheetKey};

#[derive(Debug)]
struct OpenTransaction {
    generation: u64,
    label: String,
}

#[derive(Debug, Default)]
struct TransactionState {
    open: Option<OpenTransaction>,
    generation: u64,
}

/// Database wrapper that encapsulates all store operations
pub struct Database {
    db: Db,
    sheets: Tree,
    elements: Tree,
    numbers: Tree,
    transaction: Mutex<TransactionState>,
}

impl Database {
    /// Opens or creates a database at the specified path
    ///
    /// # Examples
    /// ```no_run
    /// use sheetnum::db::Database;
    /// let db = Database::open("my_db").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the database cannot be opened or if the internal trees cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        Self::from_db(sled::open(path)?)
    }

    /// Opens a database that is deleted when dropped
    ///
    /// # Errors
    ///
    /// Returns `DbError` if sled cannot create the temporary database.
    pub fn open_temporary() -> Result<Self, DbError> {
        Self::from_db(sled::Config::new().temporary(true).open()?)
    }

    fn from_db(db: Db) -> Result<Self, DbError> {
        let sheets = db.open_tree("sheets")?;
        let elements = db.open_tree("elements")?;
        let numbers = db.open_tree("numbers")?;
        Ok(Self {
            db,
            sheets,
            elements,
            numbers,
            transaction: Mutex::new(TransactionState::default()),
        })
    }

    /// Insert or replace a sheet
    ///
    /// # Errors
    ///
    /// Returns `DbError::InvalidInput` for an empty sheet number,
    /// `DbError::DuplicateNumber` if another sheet already has the number,
    /// or a storage error.
    pub fn insert_sheet(&self, sheet: &Sheet) -> Result<(), DbError> {
        if sheet.number.trim().is_empty() {
            return Err(DbError::InvalidInput(format!(
                "sheet {} has an empty number",
                sheet.id
            )));
        }
        if let Some(owner) = self.owner_of(&sheet.number)?
            && owner != sheet.id
        {
            return Err(DbError::DuplicateNumber {
                number: sheet.number.clone(),
                owner,
            });
        }
        if let Some(existing) = self.get_sheet(sheet.id)?
            && existing.number != sheet.number
        {
            self.numbers.remove(NumberKey(&existing.number).as_bytes())?;
        }

        let key = SheetKey(sheet.id).to_bytes();
        let value = bincode::encode_to_vec(sheet, bincode::config::standard())?;
        self.sheets.insert(&key[..], value)?;
        self.numbers
            .insert(NumberKey(&sheet.number).as_bytes(), &key[..])?;
        Ok(())
    }

    /// Insert or replace the display name of a referenced element
    ///
    /// # Errors
    ///
    /// Returns `DbError` if encoding or the write fails.
    pub fn insert_element(&self, id: ElementId, name: &str) -> Result<(), DbError> {
        let value = bincode::encode_to_vec(name, bincode::config::standard())?;
        self.elements.insert(&ElementKey(id).to_bytes()[..], value)?;
        Ok(())
    }

    /// Get a sheet by id
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the read or decoding fails.
    pub fn get_sheet(&self, id: SheetId) -> Result<Option<Sheet>, DbError> {
        match self.sheets.get(SheetKey(id).to_bytes())? {
            Some(value) => {
                let (sheet, _): (Sheet, usize) =
                    bincode::decode_from_slice(&value, bincode::config::standard())?;
                Ok(Some(sheet))
            }
            None => Ok(None),
        }
    }

    /// Id of the sheet currently holding `number`
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the read fails or the index entry is corrupt.
    pub fn owner_of(&self, number: &str) -> Result<Option<SheetId>, DbError> {
        self.numbers
            .get(NumberKey(number).as_bytes())?
            .map(|value| SheetKey::from_bytes(&value).map(|key| key.0))
            .transpose()
    }

    /// Every stored sheet, placeholders included, in id order
    ///
    /// # Errors
    ///
    /// Returns `DbError` if iteration or decoding fails.
    pub fn list_all(&self) -> Result<Vec<Sheet>, DbError> {
        let mut sheets = Vec::new();
        for result in &self.sheets {
            let (_, value) = result?;
            let (sheet, _): (Sheet, usize) =
                bincode::decode_from_slice(&value, bincode::config::standard())?;
            sheets.push(sheet);
        }
        Ok(sheets)
    }

    /// Remove a sheet and its number index entry
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the read or the removal fails.
    pub fn remove_sheet(&self, id: SheetId) -> Result<bool, DbError> {
        let Some(sheet) = self.get_sheet(id)? else {
            return Ok(false);
        };
        self.numbers.remove(NumberKey(&sheet.number).as_bytes())?;
        Ok(self.sheets.remove(SheetKey(id).to_bytes())?.is_some())
    }

    /// Id one past the highest stored sheet id
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the read fails.
    pub fn next_sheet_id(&self) -> Result<SheetId, DbError> {
        match self.sheets.last()? {
            Some((key, _)) => Ok(SheetId(SheetKey::from_bytes(&key)?.0.0 + 1)),
            None => Ok(SheetId(1)),
        }
    }

    /// Number of stored sheets
    #[must_use]
    pub fn count(&self) -> usize {
        self.sheets.len()
    }

    /// Clear all data from the database
    ///
    /// # Errors
    ///
    /// Returns `DbError` if any tree cannot be cleared.
    pub fn clear(&self) -> Result<(), DbError> {
        self.sheets.clear()?;
        self.elements.clear()?;
        self.numbers.clear()?;
        Ok(())
    }

    /// Flush pending writes to disk
    ///
    /// # Errors
    ///
    /// Returns `DbError` if sled fails to flush.
    pub fn flush(&self) -> Result<(), DbError> {
        self.db.flush()?;
        Ok(())
    }

    /// Whether a transaction is currently open
    #[must_use]
    pub fn has_open_transaction(&self) -> bool {
        self.transaction_state().open.is_some()
    }

    fn transaction_state(&self) -> MutexGuard<'_, TransactionState> {
        self.transaction
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn acquire_transaction(&self, label: &str) -> Result<u64, DbError> {
        let mut state = self.transaction_state();
        if let Some(open) = &state.open {
            return Err(DbError::TransactionActive(open.label.clone()));
        }
        state.generation += 1;
        let generation = state.generation;
        state.open = Some(OpenTransaction {
            generation,
            label: label.to_string(),
        });
        Ok(generation)
    }

    pub(crate) fn is_current_transaction(&self, generation: u64) -> bool {
        self.transaction_state()
            .open
            .as_ref()
            .is_some_and(|open| open.generation == generation)
    }

    pub(crate) fn release_transaction(&self, generation: u64) {
        let mut state = self.transaction_state();
        if state
            .open
            .as_ref()
            .is_some_and(|open| open.generation == generation)
        {
            state.open = None;
        }
    }

    pub(crate) const fn sheets_tree(&self) -> &Tree {
        &self.sheets
    }

    pub(crate) const fn numbers_tree(&self) -> &Tree {
        &self.numbers
    }
}

impl ReferenceResolver for Database {
    fn element_name(&self, id: ElementId) -> Option<String> {
        let value = match self.elements.get(ElementKey(id).to_bytes()) {
            Ok(Some(value)) => value,
            Ok(None) => return None,
            Err(e) => {
                tracing::debug!(element = id.0, error = %e, "element lookup failed");
                return None;
            }
        };
        match bincode::decode_from_slice::<String, _>(&value, bincode::config::standard()) {
            Ok((name, _)) => Some(name),
            Err(e) => {
                tracing::debug!(element = id.0, error = %e, "element name is not decodable");
                None
            }
        }
    }
}

impl SheetStore for Database {
    fn sheets(&self) -> Result<Vec<Sheet>, DbError> {
        let mut sheets = self.list_all()?;
        sheets.retain(|sheet| !sheet.placeholder);
        Ok(sheets)
    }

    fn force_close_transaction(&self) -> Result<(), DbError> {
        if let Some(open) = self.transaction_state().open.take() {
            tracing::warn!(label = %open.label, "force-closing open transaction");
        }
        Ok(())
    }

    fn begin(&self, label: &str) -> Result<Box<dyn StoreTransaction + '_>, DbError> {
        let generation = self.acquire_transaction(label)?;
        tracing::info!(label, "transaction opened");
        Ok(Box::new(DatabaseTransaction::new(self, generation, label)))
    }
}
