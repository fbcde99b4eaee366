//! Renumber command - pick sheets and give them new numbers

use crate::{
    SheetnumError,
    catalog::BucketSelector,
    config::SheetnumConfig,
    db::SheetStore,
    renumber::{self, Prepared, ReadyRun, RunReport},
    ui::{PickerConfig, RatatuiPicker, ScriptedPicker, SheetPicker},
};
use colored::Colorize;
use dialoguer::Confirm;

type Result<T> = std::result::Result<T, SheetnumError>;

/// Parsed arguments of `sheetnum renumber`
#[derive(Debug, Clone, Default)]
pub struct RenumberArgs {
    pub filter: BucketSelector,
    /// Select every sheet of the filter without the picker
    pub all: bool,
    /// Select these numbers without the picker
    pub sheets: Vec<String>,
    pub start: Option<String>,
    pub prefix: Option<String>,
    pub dry_run: bool,
    /// Skip the confirmation of scripted runs
    pub yes: bool,
}

impl RenumberArgs {
    /// Picker settings for these arguments
    #[must_use]
    pub fn picker_config(&self) -> PickerConfig {
        PickerConfig::default()
            .with_filter(self.filter.clone())
            .with_start_number(self.start.clone().unwrap_or_else(|| "1".to_string()))
            .with_prefix(self.prefix.clone().unwrap_or_default())
    }

    /// Picker replacing the terminal UI, if the selection was given up front
    #[must_use]
    pub fn scripted_picker(&self) -> Option<ScriptedPicker> {
        if self.all {
            Some(ScriptedPicker::all())
        } else if self.sheets.is_empty() {
            None
        } else {
            Some(ScriptedPicker::numbers(self.sheets.clone()))
        }
    }
}

/// Execute the renumber command and print its report
///
/// # Errors
///
/// Returns `SheetnumError` if the store cannot be read, the picker fails or
/// the confirmation prompt cannot be shown. Failures while writing are part
/// of the returned report.
pub fn execute<S>(
    store: &S,
    args: &RenumberArgs,
    config: &SheetnumConfig,
    quiet: bool,
) -> Result<RunReport>
where
    S: SheetStore + ?Sized,
{
    let catalog = renumber::load_catalog(store, &config.group_attribute)?;
    let picker_config = args.picker_config();
    let scripted = args.scripted_picker();
    let terminal = RatatuiPicker::new();

    let picker: &dyn SheetPicker = match &scripted {
        Some(picker) => picker,
        None => &terminal,
    };
    let report = match renumber::prepare(&catalog, picker, &picker_config)? {
        Prepared::Finished(report) => report,
        Prepared::Ready(ready) if args.dry_run => ready.preview(),
        Prepared::Ready(ready) => {
            // The terminal picker's Enter already is the confirmation
            if scripted.is_some() && !args.yes && !confirm(&ready)? {
                RunReport::Cancelled
            } else {
                renumber::apply(store, ready, &config.transaction_label)
            }
        }
    };

    print_report(&report, config.report_limit, quiet);
    Ok(report)
}

fn confirm(ready: &ReadyRun) -> Result<bool> {
    let first = ready.plan.first().map(ToString::to_string).unwrap_or_default();
    let prompt = format!(
        "Renumber {} sheet(s) starting with {}?",
        ready.plan.len(),
        first.trim_start_matches("Sheet ")
    );
    Confirm::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| SheetnumError::InvalidInput(format!("Failed to get confirmation: {e}")))
}

/// Print a report; `quiet` keeps only the `OLD -> NEW` lines and errors
pub fn print_report(report: &RunReport, limit: usize, quiet: bool) {
    if quiet {
        print_quiet(report);
        return;
    }

    let text = report.render(limit);
    let (head, rest) = text.split_once('\n').unwrap_or((text.as_str(), ""));
    match report {
        RunReport::Completed(run) if run.outcome.is_clean() => {
            println!("{} {}", "✓".green(), head.green().bold());
            println!("{rest}");
        }
        RunReport::Completed(_) => {
            println!("{} {}", "⚠".yellow(), head.yellow().bold());
            println!("{rest}");
        }
        RunReport::Preview { .. } => {
            println!("{}", format!("=== {head} ===").yellow().bold());
            println!("{rest}");
            println!("\n{}", "Run without --dry-run to apply changes.".yellow());
        }
        RunReport::Cancelled => println!("{} {}", "⊘".yellow(), text),
        RunReport::NoSelection | RunReport::EmptyDocument | RunReport::Failed { .. } => {
            eprintln!("{} {}", "✗".red(), head.red().bold());
            if !rest.is_empty() {
                eprintln!("{rest}");
            }
        }
    }
}

fn print_quiet(report: &RunReport) {
    match report {
        RunReport::Completed(run) => {
            for assignment in &run.outcome.applied {
                println!("{} -> {}", assignment.old_number, assignment.new_number);
            }
            for failure in &run.outcome.failures {
                eprintln!("{}", failure.message.red());
            }
        }
        RunReport::Preview { plan, .. } => {
            for assignment in plan {
                println!("{} -> {}", assignment.old_number, assignment.new_number);
            }
        }
        RunReport::Cancelled => {}
        RunReport::NoSelection | RunReport::EmptyDocument | RunReport::Failed { .. } => {
            eprintln!("{}", report.render(0).red());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SheetId;
    use crate::testing::{TestDb, sample_sheets};

    fn config() -> SheetnumConfig {
        SheetnumConfig::default()
    }

    fn number(db: &TestDb, id: u64) -> String {
        db.db().get_sheet(SheetId(id)).unwrap().unwrap().number
    }

    #[test]
    fn test_all_in_group_with_yes() {
        let db = TestDb::with_sheets(&sample_sheets());
        let args = RenumberArgs {
            filter: BucketSelector::Value("Architectural".into()),
            all: true,
            prefix: Some("A-".into()),
            start: Some("101".into()),
            yes: true,
            ..RenumberArgs::default()
        };

        let report = execute(db.db(), &args, &config(), true).unwrap();

        assert!(matches!(report, RunReport::Completed(ref run) if run.outcome.processed() == 3));
        // A1, A2, A10 in natural order
        assert_eq!(number(&db, 4), "A-101");
        assert_eq!(number(&db, 2), "A-102");
        assert_eq!(number(&db, 1), "A-103");
        assert_eq!(number(&db, 3), "S1");
    }

    #[test]
    fn test_named_sheets_dry_run_writes_nothing() {
        let db = TestDb::with_sheets(&sample_sheets());
        let args = RenumberArgs {
            sheets: vec!["S1".into(), "G1".into()],
            prefix: Some("X".into()),
            dry_run: true,
            ..RenumberArgs::default()
        };

        let report = execute(db.db(), &args, &config(), true).unwrap();

        let RunReport::Preview { plan, .. } = report else {
            panic!("expected a preview");
        };
        let pairs: Vec<_> = plan
            .iter()
            .map(|a| (a.old_number.as_str(), a.new_number.as_str()))
            .collect();
        assert_eq!(pairs, vec![("G1", "X1"), ("S1", "X2")]);
        assert_eq!(number(&db, 3), "S1");
    }

    #[test]
    fn test_unknown_sheet_is_an_error() {
        let db = TestDb::with_sheets(&sample_sheets());
        let args = RenumberArgs {
            filter: BucketSelector::Blank,
            sheets: vec!["A1".into()],
            yes: true,
            ..RenumberArgs::default()
        };
        assert!(matches!(
            execute(db.db(), &args, &config(), true),
            Err(SheetnumError::UiError(_))
        ));
    }

    #[test]
    fn test_empty_store_never_opens_picker() {
        let db = TestDb::new();
        // No scripted selection: reaching the picker would need a terminal
        let report = execute(db.db(), &RenumberArgs::default(), &config(), true).unwrap();
        assert_eq!(report, RunReport::EmptyDocument);
    }

    #[test]
    fn test_picker_config_defaults() {
        let config = RenumberArgs::default().picker_config();
        assert_eq!(config.start_number, "1");
        assert_eq!(config.prefix, "");
        assert_eq!(config.initial_filter, BucketSelector::All);
        assert!(RenumberArgs::default().scripted_picker().is_none());
    }
}
