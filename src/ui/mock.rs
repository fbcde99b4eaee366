//! Mock sheet picker for testing

use super::error::Result;
use super::traits::{PickerConfig, PickerOutcome, SheetPicker};
use super::types::PickerAction;
use crate::catalog::SheetCatalog;
use crate::selection::SelectionModel;

/// Mock picker that replays predetermined gestures
///
/// Useful for testing without requiring user interaction
#[derive(Debug, Clone, Default)]
pub struct MockPicker {
    /// Gestures applied in order after the initial filter is shown
    pub actions: Vec<PickerAction>,
    /// Start number text to confirm with (config value when `None`)
    pub start_number: Option<String>,
    /// Prefix text to confirm with (config value when `None`)
    pub prefix: Option<String>,
    /// Whether to simulate the user closing the picker
    pub should_cancel: bool,
}

impl MockPicker {
    #[must_use]
    pub fn new(actions: Vec<PickerAction>) -> Self {
        Self {
            actions,
            ..Self::default()
        }
    }

    /// Create a mock picker that simulates user cancellation
    #[must_use]
    pub fn cancelled() -> Self {
        Self {
            should_cancel: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_start_number(mut self, start_number: impl Into<String>) -> Self {
        self.start_number = Some(start_number.into());
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

impl SheetPicker for MockPicker {
    fn pick<'c>(
        &self,
        catalog: &'c SheetCatalog,
        config: &PickerConfig,
    ) -> Result<PickerOutcome<'c>> {
        let mut selection = SelectionModel::new(catalog);
        selection.show(config.initial_filter.clone());
        for action in &self.actions {
            action.apply(&mut selection);
        }
        if self.should_cancel {
            return Ok(PickerOutcome::Cancelled);
        }
        Ok(PickerOutcome::Confirmed {
            selection,
            start_number: self
                .start_number
                .clone()
                .unwrap_or_else(|| config.start_number.clone()),
            prefix: self.prefix.clone().unwrap_or_else(|| config.prefix.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{AttributeIndex, NoReferences};
    use crate::catalog::BucketSelector;
    use crate::testing::sample_sheets;

    fn catalog() -> SheetCatalog {
        SheetCatalog::build(
            sample_sheets(),
            &AttributeIndex::new("Discipline", &NoReferences),
        )
    }

    #[test]
    fn test_mock_picker_replays_actions() {
        let catalog = catalog();
        let picker = MockPicker::new(vec![PickerAction::SelectAll]).with_prefix("X");
        let config = PickerConfig::default()
            .with_filter(BucketSelector::Value("Architectural".into()));
        let PickerOutcome::Confirmed {
            selection,
            start_number,
            prefix,
        } = picker.pick(&catalog, &config).unwrap()
        else {
            panic!("expected confirmation");
        };
        assert_eq!(selection.chosen_count(), 3);
        assert_eq!(start_number, "1");
        assert_eq!(prefix, "X");
    }

    #[test]
    fn test_mock_picker_cancelled() {
        let catalog = catalog();
        let outcome = MockPicker::cancelled()
            .pick(&catalog, &PickerConfig::default())
            .unwrap();
        assert!(matches!(outcome, PickerOutcome::Cancelled));
    }
}
