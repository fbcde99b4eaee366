//! Renumbering runs
//!
//! A run has three stages:
//!
//! 1. [`load_catalog`] snapshots the store's sheets into a [`SheetCatalog`];
//! 2. [`prepare`] hands the catalog to a [`SheetPicker`] and turns the
//!    confirmed selection into a plan;
//! 3. [`apply`] writes the plan in one transaction.
//!
//! Nothing is written before stage 3, so cancelling the picker or ending
//! with an empty selection leaves the store untouched. [`run`] chains the
//! three stages for callers that need no confirmation step in between.

pub mod executor;
pub mod plan;
pub mod report;

pub use executor::{ExecuteError, RenumberFailure, RenumberOutcome, execute};
pub use plan::{
    DEFAULT_START_NUMBER, RenumberAssignment, RenumberRequest, normalize_prefix,
    parse_start_number, plan,
};
pub use report::{CompletedRun, DEFAULT_REPORT_LIMIT, RunReport};

use crate::SheetnumError;
use crate::attributes::AttributeIndex;
use crate::catalog::SheetCatalog;
use crate::db::{DbError, SheetStore};
use crate::model::ElementId;
use crate::ui::{PickerConfig, PickerOutcome, SheetPicker};

type Result<T> = std::result::Result<T, SheetnumError>;

/// A confirmed plan waiting to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyRun {
    pub request: RenumberRequest,
    pub plan: Vec<RenumberAssignment>,
}

impl ReadyRun {
    /// Report the plan without writing it
    #[must_use]
    pub fn preview(self) -> RunReport {
        RunReport::Preview {
            request: self.request,
            plan: self.plan,
        }
    }
}

/// Result of the selection stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prepared {
    Ready(ReadyRun),
    /// The run ended before anything could be written
    Finished(RunReport),
}

/// Snapshot every numberable sheet of `store`, grouped by `attribute`
///
/// # Errors
///
/// Returns `DbError` if the store cannot be read.
pub fn load_catalog<S>(store: &S, attribute: &str) -> std::result::Result<SheetCatalog, DbError>
where
    S: SheetStore + ?Sized,
{
    let sheets = store.sheets()?;
    let resolve = |id: ElementId| store.element_name(id);
    Ok(SheetCatalog::build(sheets, &AttributeIndex::new(attribute, &resolve)))
}

/// Run the picker and plan its selection
///
/// An empty catalog finishes with [`RunReport::EmptyDocument`] without
/// showing the picker.
///
/// # Errors
///
/// Returns `SheetnumError::UiError` if the picker fails.
pub fn prepare<P>(catalog: &SheetCatalog, picker: &P, config: &PickerConfig) -> Result<Prepared>
where
    P: SheetPicker + ?Sized,
{
    if catalog.is_empty() {
        return Ok(Prepared::Finished(RunReport::EmptyDocument));
    }

    let (selection, start_number, prefix) = match picker.pick(catalog, config)? {
        PickerOutcome::Confirmed {
            selection,
            start_number,
            prefix,
        } => (selection, start_number, prefix),
        PickerOutcome::Cancelled => {
            tracing::info!("picker cancelled");
            return Ok(Prepared::Finished(RunReport::Cancelled));
        }
    };

    let selected = selection.selected();
    if selected.is_empty() {
        return Ok(Prepared::Finished(RunReport::NoSelection));
    }

    let request = RenumberRequest::from_input(&start_number, &prefix);
    let plan = request.plan(&selected);
    tracing::info!(
        sheets = plan.len(),
        start = %request.start_number,
        prefix = %request.prefix,
        "renumber plan ready"
    );
    Ok(Prepared::Ready(ReadyRun { request, plan }))
}

/// Write a confirmed plan; transaction failures become a `Failed` report
pub fn apply<S>(store: &S, ready: ReadyRun, label: &str) -> RunReport
where
    S: SheetStore + ?Sized,
{
    match execute(store, &ready.plan, label) {
        Ok(outcome) => RunReport::Completed(CompletedRun {
            request: ready.request,
            outcome,
        }),
        Err(e) => {
            tracing::error!(error = %e, "renumbering aborted");
            RunReport::failed(&e)
        }
    }
}

/// Options for a whole run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Attribute used for filter buckets
    pub group_attribute: String,
    /// Label of the store transaction
    pub transaction_label: String,
    /// Compute and report the plan without writing it
    pub dry_run: bool,
    pub picker: PickerConfig,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            group_attribute: crate::config::DEFAULT_GROUP_ATTRIBUTE.to_string(),
            transaction_label: crate::config::DEFAULT_TRANSACTION_LABEL.to_string(),
            dry_run: false,
            picker: PickerConfig::default(),
        }
    }
}

/// Load, pick and apply in one go
///
/// # Errors
///
/// Returns `SheetnumError` if the store cannot be read or the picker fails.
/// Failures while writing are reported through the returned [`RunReport`].
pub fn run<S, P>(store: &S, picker: &P, options: &RunOptions) -> Result<RunReport>
where
    S: SheetStore + ?Sized,
    P: SheetPicker + ?Sized,
{
    let catalog = load_catalog(store, &options.group_attribute)?;
    match prepare(&catalog, picker, &options.picker)? {
        Prepared::Finished(report) => Ok(report),
        Prepared::Ready(ready) if options.dry_run => Ok(ready.preview()),
        Prepared::Ready(ready) => Ok(apply(store, ready, &options.transaction_label)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BucketSelector;
    use crate::model::SheetId;
    use crate::testing::{TestDb, sample_sheets, sheet};
    use crate::ui::{MockPicker, PickerAction};

    fn numbers(db: &crate::db::Database) -> Vec<(u64, String)> {
        db.list_all()
            .unwrap()
            .into_iter()
            .map(|s| (s.id.0, s.number))
            .collect()
    }

    #[test]
    fn test_run_renumbers_in_natural_order() {
        let test_db = TestDb::with_sheets(&[
            sheet(1, "3", None),
            sheet(2, "1", None),
            sheet(3, "10", None),
            sheet(4, "2", None),
        ]);
        let picker = MockPicker::new(vec![PickerAction::SelectAll]).with_prefix("S");
        let report = run(test_db.db(), &picker, &RunOptions::default()).unwrap();

        let RunReport::Completed(run) = report else {
            panic!("expected a completed run");
        };
        let pairs: Vec<(&str, &str)> = run
            .outcome
            .applied
            .iter()
            .map(|a| (a.old_number.as_str(), a.new_number.as_str()))
            .collect();
        assert_eq!(pairs, vec![("1", "S1"), ("2", "S2"), ("3", "S3"), ("10", "S4")]);
        assert_eq!(
            numbers(test_db.db()),
            vec![
                (1, "S3".to_string()),
                (2, "S1".to_string()),
                (3, "S4".to_string()),
                (4, "S2".to_string())
            ]
        );
    }

    #[test]
    fn test_empty_store() {
        let test_db = TestDb::new();
        let report = run(test_db.db(), &MockPicker::default(), &RunOptions::default()).unwrap();
        assert_eq!(report, RunReport::EmptyDocument);
    }

    #[test]
    fn test_placeholders_only_is_empty() {
        let test_db = TestDb::with_sheets(&[sheet(1, "P1", None).as_placeholder()]);
        let report = run(test_db.db(), &MockPicker::default(), &RunOptions::default()).unwrap();
        assert_eq!(report, RunReport::EmptyDocument);
    }

    #[test]
    fn test_cancel_writes_nothing() {
        let test_db = TestDb::with_sheets(&sample_sheets());
        let before = numbers(test_db.db());
        let picker = MockPicker {
            actions: vec![PickerAction::SelectAll],
            should_cancel: true,
            ..MockPicker::default()
        };
        let report = run(test_db.db(), &picker, &RunOptions::default()).unwrap();
        assert_eq!(report, RunReport::Cancelled);
        assert_eq!(numbers(test_db.db()), before);
    }

    #[test]
    fn test_no_selection() {
        let test_db = TestDb::with_sheets(&sample_sheets());
        let report = run(test_db.db(), &MockPicker::default(), &RunOptions::default()).unwrap();
        assert_eq!(report, RunReport::NoSelection);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let test_db = TestDb::with_sheets(&sample_sheets());
        let before = numbers(test_db.db());
        let options = RunOptions {
            dry_run: true,
            ..RunOptions::default()
        };
        let picker = MockPicker::new(vec![PickerAction::SelectAll]);
        let report = run(test_db.db(), &picker, &options).unwrap();
        assert!(matches!(report, RunReport::Preview { ref plan, .. } if plan.len() == 5));
        assert_eq!(numbers(test_db.db()), before);
    }

    #[test]
    fn test_selection_across_filters() {
        let test_db = TestDb::with_sheets(&sample_sheets());
        let picker = MockPicker::new(vec![
            PickerAction::Show(BucketSelector::Value("Structural".into())),
            PickerAction::SelectAll,
            PickerAction::Show(BucketSelector::Blank),
            PickerAction::SelectAll,
            PickerAction::Show(BucketSelector::Value("Architectural".into())),
        ])
        .with_start_number("7")
        .with_prefix("  Z-  ");
        let report = run(test_db.db(), &picker, &RunOptions::default()).unwrap();
        let RunReport::Completed(run) = report else {
            panic!("expected a completed run");
        };
        assert_eq!(run.request.prefix, "Z-");
        let renamed: Vec<(SheetId, &str)> = run
            .outcome
            .applied
            .iter()
            .map(|a| (a.sheet, a.new_number.as_str()))
            .collect();
        // G1 sorts before S1
        assert_eq!(renamed, vec![(SheetId(5), "Z-7"), (SheetId(3), "Z-8")]);
    }

    #[test]
    fn test_bad_start_number_defaults_to_one() {
        let test_db = TestDb::with_sheets(&[sheet(1, "A", None)]);
        let picker = MockPicker::new(vec![PickerAction::Toggle(0)]).with_start_number("abc");
        let report = run(test_db.db(), &picker, &RunOptions::default()).unwrap();
        let RunReport::Completed(run) = report else {
            panic!("expected a completed run");
        };
        assert_eq!(run.outcome.applied[0].new_number, "1");
    }

    #[test]
    fn test_number_collision_is_reported_per_sheet() {
        // Renumbering A and B to 1, 2 collides with the unselected "2"
        let test_db = TestDb::with_sheets(&[
            sheet(1, "A", Some("X")),
            sheet(2, "B", Some("X")),
            sheet(3, "2", Some("Y")),
        ]);
        let options = RunOptions {
            picker: PickerConfig::default().with_filter(BucketSelector::Value("X".into())),
            ..RunOptions::default()
        };
        let picker = MockPicker::new(vec![PickerAction::SelectAll]);
        let report = run(test_db.db(), &picker, &options).unwrap();
        let RunReport::Completed(run) = report else {
            panic!("expected a completed run");
        };
        assert_eq!(run.outcome.applied.len(), 1);
        assert_eq!(run.outcome.failures.len(), 1);
        assert_eq!(run.outcome.failures[0].assignment.old_number, "B");
        assert_eq!(
            test_db.db().get_sheet(SheetId(1)).unwrap().unwrap().number,
            "1"
        );
    }
}
