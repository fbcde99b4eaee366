//! Staged number changes for the sled store
//!
//! A [`DatabaseTransaction`] validates each write against the committed
//! state plus everything staged so far, so a rename chain such as
//! `A -> B, B -> C` resolves the same way it would once committed.
//! `commit` applies the `sheets` and `numbers` trees together in a single
//! sled transaction.

use super::error::DbError;
use super::traits::StoreTransaction;
use super::types::{NumberKey, SheetKey};
use super::Database;
use crate::model::{Sheet, SheetId};
use sled::transaction::{ConflictableTransactionError, Transactional};
use sled::Batch;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct StagedSheet {
    sheet: Sheet,
    committed_number: String,
}

/// An open transaction on a [`Database`]
pub struct DatabaseTransaction<'a> {
    db: &'a Database,
    generation: u64,
    label: String,
    staged: BTreeMap<SheetId, StagedSheet>,
    committed: bool,
}

impl<'a> DatabaseTransaction<'a> {
    pub(crate) fn new(db: &'a Database, generation: u64, label: &str) -> Self {
        Self {
            db,
            generation,
            label: label.to_string(),
            staged: BTreeMap::new(),
            committed: false,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of sheets with a staged change
    #[must_use]
    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    fn ensure_open(&self) -> Result<(), DbError> {
        if self.db.is_current_transaction(self.generation) {
            Ok(())
        } else {
            Err(DbError::TransactionClosed(self.label.clone()))
        }
    }

    /// Holder of `number` as seen from inside this transaction
    fn owner_in_view(&self, number: &str) -> Result<Option<SheetId>, DbError> {
        if let Some((id, _)) = self
            .staged
            .iter()
            .find(|(_, staged)| staged.sheet.number == number)
        {
            return Ok(Some(*id));
        }
        match self.db.owner_of(number)? {
            // The committed owner has already been moved to another number
            Some(owner) if self.staged.contains_key(&owner) => Ok(None),
            other => Ok(other),
        }
    }
}

impl StoreTransaction for DatabaseTransaction<'_> {
    fn set_sheet_number(&mut self, id: SheetId, number: &str) -> Result<(), DbError> {
        self.ensure_open()?;
        if number.trim().is_empty() {
            return Err(DbError::InvalidInput(format!(
                "sheet {id} cannot take an empty number"
            )));
        }

        let (current, committed_number) = match self.staged.get(&id) {
            Some(staged) => (staged.sheet.clone(), staged.committed_number.clone()),
            None => {
                let sheet = self.db.get_sheet(id)?.ok_or(DbError::SheetNotFound(id))?;
                let committed = sheet.number.clone();
                (sheet, committed)
            }
        };

        if let Some(owner) = self.owner_in_view(number)?
            && owner != id
        {
            return Err(DbError::DuplicateNumber {
                number: number.to_string(),
                owner,
            });
        }

        let mut sheet = current;
        sheet.number = number.to_string();
        tracing::debug!(sheet = %id, number, "staged number change");
        self.staged.insert(
            id,
            StagedSheet {
                sheet,
                committed_number,
            },
        );
        Ok(())
    }

    fn commit(mut self: Box<Self>) -> Result<(), DbError> {
        self.ensure_open()?;

        let mut sheet_batch = Batch::default();
        let mut number_batch = Batch::default();
        for staged in self.staged.values() {
            number_batch.remove(NumberKey(&staged.committed_number).as_bytes());
        }
        for (id, staged) in &self.staged {
            let key = SheetKey(*id).to_bytes();
            let value = bincode::encode_to_vec(&staged.sheet, bincode::config::standard())?;
            sheet_batch.insert(&key[..], value);
            number_batch.insert(NumberKey(&staged.sheet.number).as_bytes(), &key[..]);
        }

        (self.db.sheets_tree(), self.db.numbers_tree()).transaction(|(sheets, numbers)| {
            sheets.apply_batch(&sheet_batch)?;
            numbers.apply_batch(&number_batch)?;
            Ok::<(), ConflictableTransactionError<()>>(())
        })?;
        self.db.flush()?;

        self.committed = true;
        tracing::info!(label = %self.label, sheets = self.staged.len(), "transaction committed");
        Ok(())
    }
}

impl Drop for DatabaseTransaction<'_> {
    fn drop(&mut self) {
        if !self.committed && self.db.is_current_transaction(self.generation) {
            tracing::info!(label = %self.label, "transaction rolled back");
        }
        self.db.release_transaction(self.generation);
    }
}
