//! Non-interactive picker driven by command line flags

use super::error::{Result, UiError};
use super::traits::{PickerConfig, PickerOutcome, SheetPicker};
use crate::catalog::SheetCatalog;
use crate::selection::SelectionModel;

/// Picks sheets from the initial filter without a terminal
///
/// With `all` every displayed sheet is chosen; otherwise each entry of
/// `numbers` must name a displayed sheet.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPicker {
    pub all: bool,
    pub numbers: Vec<String>,
}

impl ScriptedPicker {
    #[must_use]
    pub fn all() -> Self {
        Self {
            all: true,
            numbers: Vec::new(),
        }
    }

    #[must_use]
    pub fn numbers(numbers: Vec<String>) -> Self {
        Self {
            all: false,
            numbers,
        }
    }
}

impl SheetPicker for ScriptedPicker {
    fn pick<'c>(
        &self,
        catalog: &'c SheetCatalog,
        config: &PickerConfig,
    ) -> Result<PickerOutcome<'c>> {
        let mut selection = SelectionModel::new(catalog);
        selection.show(config.initial_filter.clone());

        if self.all {
            selection.select_all();
        }
        for number in &self.numbers {
            let row = selection
                .displayed()
                .iter()
                .position(|sheet| sheet.number == *number)
                .ok_or_else(|| UiError::UnknownSheet {
                    number: number.clone(),
                    filter: config.initial_filter.to_string(),
                })?;
            if !selection.is_checked(row) {
                selection
                    .set_checked(row, true)
                    .map_err(|e| UiError::InvalidConfig(e.to_string()))?;
            }
        }

        Ok(PickerOutcome::Confirmed {
            selection,
            start_number: config.start_number.clone(),
            prefix: config.prefix.clone(),
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

    fn chosen(outcome: PickerOutcome<'_>) -> Vec<String> {
        match outcome {
            PickerOutcome::Confirmed { selection, .. } => selection
                .selected()
                .iter()
                .map(|s| s.number.clone())
                .collect(),
            PickerOutcome::Cancelled => panic!("scripted picker never cancels"),
        }
    }

    #[test]
    fn test_all_under_filter() {
        let catalog = catalog();
        let config = PickerConfig::default().with_filter(BucketSelector::Value("Architectural".into()));
        let outcome = ScriptedPicker::all().pick(&catalog, &config).unwrap();
        assert_eq!(chosen(outcome), vec!["A1", "A2", "A10"]);
    }

    #[test]
    fn test_named_sheets() {
        let catalog = catalog();
        let picker = ScriptedPicker::numbers(vec!["S1".into(), "A2".into(), "S1".into()]);
        let outcome = picker.pick(&catalog, &PickerConfig::default()).unwrap();
        assert_eq!(chosen(outcome), vec!["A2", "S1"]);
    }

    #[test]
    fn test_unknown_sheet() {
        let catalog = catalog();
        let config = PickerConfig::default().with_filter(BucketSelector::Blank);
        let err = ScriptedPicker::numbers(vec!["A1".into()])
            .pick(&catalog, &config)
            .unwrap_err();
        assert!(matches!(err, UiError::UnknownSheet { number, .. } if number == "A1"));
    }
}
