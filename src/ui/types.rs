//! Shared UI types
//!
//! [`PickerAction`] is the vocabulary every picker speaks: key presses and
//! mouse clicks in the terminal picker, scripted steps in tests. Each action
//! maps onto one [`SelectionModel`] call.

use crate::catalog::BucketSelector;
use crate::selection::SelectionModel;

/// One user gesture on the sheet list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerAction {
    /// Switch the displayed filter
    Show(BucketSelector),
    /// Plain click or space on a row
    Toggle(usize),
    /// Shift-click on a row
    RangeToggle(usize),
    SelectAll,
    DeselectAll,
}

impl PickerAction {
    /// Apply the gesture to `model`
    ///
    /// Row errors are swallowed: a stray click must never take the picker
    /// down, so an out-of-range row only leaves a debug event behind.
    pub fn apply(&self, model: &mut SelectionModel<'_>) {
        let result = match self {
            Self::Show(selector) => {
                model.show(selector.clone());
                Ok(())
            }
            Self::Toggle(index) => model.toggle(*index).map(|_| ()),
            Self::RangeToggle(index) => model.range_toggle(*index).map(|_| ()),
            Self::SelectAll => {
                model.select_all();
                Ok(())
            }
            Self::DeselectAll => {
                model.deselect_all();
                Ok(())
            }
        };
        if let Err(e) = result {
            tracing::debug!(action = ?self, error = %e, "ignored picker action");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{AttributeIndex, NoReferences};
    use crate::catalog::SheetCatalog;
    use crate::testing::sample_sheets;

    #[test]
    fn test_apply_sequence() {
        let catalog = SheetCatalog::build(
            sample_sheets(),
            &AttributeIndex::new("Discipline", &NoReferences),
        );
        let mut model = SelectionModel::new(&catalog);
        for action in [
            PickerAction::Toggle(0),
            PickerAction::RangeToggle(2),
            PickerAction::Show(BucketSelector::Blank),
            PickerAction::SelectAll,
        ] {
            action.apply(&mut model);
        }
        assert_eq!(model.chosen_count(), 4);
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let catalog = SheetCatalog::build(
            sample_sheets(),
            &AttributeIndex::new("Discipline", &NoReferences),
        );
        let mut model = SelectionModel::new(&catalog);
        PickerAction::Toggle(99).apply(&mut model);
        PickerAction::RangeToggle(99).apply(&mut model);
        assert_eq!(model.chosen_count(), 0);
    }
}
