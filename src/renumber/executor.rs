//! Applies a plan inside one store transaction
//!
//! Each assignment is written independently: a rejected write is recorded as
//! a [`RenumberFailure`] and the loop moves on. Only opening or committing the
//! transaction can fail the run as a whole.

use super::plan::RenumberAssignment;
use crate::db::{DbError, SheetStore};
use thiserror::Error;

/// A write the store refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenumberFailure {
    pub assignment: RenumberAssignment,
    pub message: String,
}

/// What happened to each assignment of a plan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenumberOutcome {
    pub applied: Vec<RenumberAssignment>,
    pub failures: Vec<RenumberFailure>,
}

impl RenumberOutcome {
    /// Number of assignments attempted
    #[must_use]
    pub fn processed(&self) -> usize {
        self.applied.len() + self.failures.len()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Failures that abort the whole run
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("Could not open transaction '{label}'")]
    Begin {
        label: String,
        #[source]
        source: DbError,
    },

    #[error("Could not commit transaction '{label}'")]
    Commit {
        label: String,
        #[source]
        source: DbError,
    },
}

/// Write every assignment of `plan` to `store` under one transaction
///
/// Any transaction left open is force-closed first. The transaction is
/// committed after all assignments were attempted, whether or not some failed.
///
/// # Errors
///
/// Returns `ExecuteError::Begin` if no transaction can be opened (nothing is
/// written) or `ExecuteError::Commit` if the final commit fails.
pub fn execute<S>(
    store: &S,
    plan: &[RenumberAssignment],
    label: &str,
) -> Result<RenumberOutcome, ExecuteError>
where
    S: SheetStore + ?Sized,
{
    let begin_error = |source: DbError| ExecuteError::Begin {
        label: label.to_string(),
        source,
    };
    store.force_close_transaction().map_err(begin_error)?;
    let mut transaction = store.begin(label).map_err(begin_error)?;

    let mut outcome = RenumberOutcome::default();
    for assignment in plan {
        match transaction.set_sheet_number(assignment.sheet, &assignment.new_number) {
            Ok(()) => outcome.applied.push(assignment.clone()),
            Err(e) => {
                tracing::warn!(
                    sheet = %assignment.sheet,
                    number = %assignment.new_number,
                    error = %e,
                    "sheet write rejected"
                );
                outcome.failures.push(RenumberFailure {
                    assignment: assignment.clone(),
                    message: format!("Sheet {}: {e}", assignment.old_number),
                });
            }
        }
    }

    transaction.commit().map_err(|source| ExecuteError::Commit {
        label: label.to_string(),
        source,
    })?;
    tracing::info!(
        applied = outcome.applied.len(),
        failed = outcome.failures.len(),
        "renumbering applied"
    );
    Ok(outcome)
}
