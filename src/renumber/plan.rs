//! Pure renumbering plan
//!
//! Turns an ordered selection into new sheet numbers. Nothing here touches
//! the store; an empty selection gives an empty plan.

use crate::model::{Sheet, SheetId};
use std::fmt;
use std::num::NonZeroU64;

/// Start number used when the user's text is not a positive integer
pub const DEFAULT_START_NUMBER: NonZeroU64 = NonZeroU64::MIN;

/// One sheet's old and new number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenumberAssignment {
    pub sheet: SheetId,
    pub old_number: String,
    pub new_number: String,
}

impl fmt::Display for RenumberAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sheet {} -> {}", self.old_number, self.new_number)
    }
}

/// Normalized numbering parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenumberRequest {
    pub start_number: NonZeroU64,
    pub prefix: String,
}

impl RenumberRequest {
    /// Build a request from raw text fields; never fails
    #[must_use]
    pub fn from_input(start_number: &str, prefix: &str) -> Self {
        Self {
            start_number: parse_start_number(start_number),
            prefix: normalize_prefix(prefix),
        }
    }

    /// Plan `selection` with these parameters
    #[must_use]
    pub fn plan(&self, selection: &[&Sheet]) -> Vec<RenumberAssignment> {
        plan(selection, self.start_number, &self.prefix)
    }
}

impl Default for RenumberRequest {
    fn default() -> Self {
        Self {
            start_number: DEFAULT_START_NUMBER,
            prefix: String::new(),
        }
    }
}

/// Parse a start number, falling back to [`DEFAULT_START_NUMBER`]
///
/// Surrounding whitespace is ignored. Zero, negative numbers and anything
/// that is not an integer all give the default.
#[must_use]
pub fn parse_start_number(text: &str) -> NonZeroU64 {
    match text.trim().parse::<NonZeroU64>() {
        Ok(value) => value,
        Err(_) => {
            if !text.trim().is_empty() {
                tracing::debug!(input = text, "start number is not a positive integer, using 1");
            }
            DEFAULT_START_NUMBER
        }
    }
}

#[must_use]
pub fn normalize_prefix(text: &str) -> String {
    text.trim().to_string()
}

/// Assign `prefix + (start + i)` to the i-th sheet of `selection`
///
/// `selection` is expected in ascending natural order of current number.
/// Numbers carry no padding and the prefix is used verbatim.
#[must_use]
pub fn plan(selection: &[&Sheet], start_number: NonZeroU64, prefix: &str) -> Vec<RenumberAssignment> {
    let start = u128::from(start_number.get());
    selection
        .iter()
        .zip(start..)
        .map(|(sheet, value)| RenumberAssignment {
            sheet: sheet.id,
            old_number: sheet.number.clone(),
            new_number: format!("{prefix}{value}"),
        })
        .collect()
}
