//! Integration tests for sheetnum
//!
//! These tests verify end-to-end functionality by creating temporary databases
//! and running complete renumbering workflows through the public API.

use sheetnum::catalog::BucketSelector;
use sheetnum::commands;
use sheetnum::db::Database;
use sheetnum::model::{AttributeValue, ElementId, Sheet, SheetId};
use sheetnum::renumber::{RunOptions, RunReport, run};
use sheetnum::ui::{MockPicker, PickerAction, PickerConfig};
use std::io::Write;
use tempfile::TempDir;

/// Helper function to create a database in a temporary directory
fn setup_test_db() -> (Database, TempDir) {
    let dir = TempDir::new().unwrap();
    let db = Database::open(dir.path().join("sheets")).unwrap();
    (db, dir)
}

fn insert(db: &Database, id: u64, number: &str, discipline: Option<&str>) {
    let mut sheet = Sheet::new(SheetId(id), number, format!("Sheet {number}"));
    if let Some(value) = discipline {
        sheet = sheet.with_attribute("Discipline", AttributeValue::text(value));
    }
    db.insert_sheet(&sheet).unwrap();
}

fn number_of(db: &Database, id: u64) -> String {
    db.get_sheet(SheetId(id)).unwrap().unwrap().number
}

#[test]
fn test_end_to_end_natural_order() {
    let (db, dir) = setup_test_db();
    for (id, number) in [(1, "3"), (2, "1"), (3, "10"), (4, "2")] {
        insert(&db, id, number, None);
    }

    let picker = MockPicker::new(vec![PickerAction::SelectAll]).with_prefix("S");
    let report = run(&db, &picker, &RunOptions::default()).unwrap();

    let RunReport::Completed(completed) = &report else {
        panic!("expected a completed run");
    };
    let pairs: Vec<_> = completed
        .outcome
        .applied
        .iter()
        .map(|a| (a.old_number.as_str(), a.new_number.as_str()))
        .collect();
    assert_eq!(pairs, vec![("1", "S1"), ("2", "S2"), ("3", "S3"), ("10", "S4")]);
    assert!(report.to_string().starts_with("Renumbering complete!\nPrefix: S\nStart number: 1\nSheets processed: 4"));

    // Committed numbers survive reopening the database
    drop(db);
    let db = Database::open(dir.path().join("sheets")).unwrap();
    assert_eq!(number_of(&db, 2), "S1");
    assert_eq!(number_of(&db, 4), "S2");
    assert_eq!(number_of(&db, 1), "S3");
    assert_eq!(number_of(&db, 3), "S4");
    assert_eq!(db.owner_of("S4").unwrap(), Some(SheetId(3)));
    assert_eq!(db.owner_of("10").unwrap(), None);
}

#[test]
fn test_partial_failure_still_commits() {
    let (db, _dir) = setup_test_db();
    insert(&db, 1, "1", Some("Arch"));
    insert(&db, 2, "2", Some("Arch"));
    insert(&db, 3, "3", Some("Arch"));
    // Holds the number the second sheet would get
    insert(&db, 4, "S2", Some("Civil"));

    let options = RunOptions {
        picker: PickerConfig::default().with_filter(BucketSelector::Value("Arch".into())),
        ..RunOptions::default()
    };
    let picker = MockPicker::new(vec![PickerAction::SelectAll]).with_prefix("S");
    let report = run(&db, &picker, &options).unwrap();

    let RunReport::Completed(completed) = &report else {
        panic!("expected a completed run");
    };
    assert_eq!(completed.outcome.processed(), 3);
    assert_eq!(completed.outcome.applied.len(), 2);
    assert_eq!(completed.outcome.failures.len(), 1);
    assert_eq!(completed.outcome.failures[0].assignment.sheet, SheetId(2));
    assert!(report.to_string().contains("\n\nErrors:\nSheet 2: "));

    assert_eq!(number_of(&db, 1), "S1");
    assert_eq!(number_of(&db, 2), "2");
    assert_eq!(number_of(&db, 3), "S3");
    assert_eq!(number_of(&db, 4), "S2");
    assert!(!db.has_open_transaction());
}

#[test]
fn test_selection_persists_across_filters() {
    let (db, _dir) = setup_test_db();
    insert(&db, 1, "A2", Some("Architectural"));
    insert(&db, 2, "A1", Some("Architectural"));
    insert(&db, 3, "S1", Some("Structural"));
    insert(&db, 4, "G1", None);

    let picker = MockPicker::new(vec![
        PickerAction::Show(BucketSelector::Value("Architectural".into())),
        PickerAction::SelectAll,
        PickerAction::Show(BucketSelector::Blank),
        PickerAction::Toggle(0),
        PickerAction::Show(BucketSelector::All),
    ])
    .with_start_number("10");
    let report = run(&db, &picker, &RunOptions::default()).unwrap();

    assert!(matches!(report, RunReport::Completed(ref c) if c.outcome.processed() == 3));
    assert_eq!(number_of(&db, 2), "10");
    assert_eq!(number_of(&db, 1), "11");
    assert_eq!(number_of(&db, 4), "12");
    assert_eq!(number_of(&db, 3), "S1");
}

#[test]
fn test_reference_attribute_groups_and_placeholders() {
    let (db, _dir) = setup_test_db();
    db.insert_element(ElementId(7), "Level 1").unwrap();
    let level = |id: i64| AttributeValue::reference(ElementId(id));
    db.insert_sheet(&Sheet::new(SheetId(1), "B", "Upper").with_attribute("Level", level(7)))
        .unwrap();
    db.insert_sheet(&Sheet::new(SheetId(2), "A", "Lower").with_attribute("Level", level(7)))
        .unwrap();
    db.insert_sheet(&Sheet::new(SheetId(3), "C", "Nowhere").with_attribute("Level", level(-1)))
        .unwrap();
    db.insert_sheet(
        &Sheet::new(SheetId(4), "D", "Template")
            .with_attribute("Level", level(7))
            .as_placeholder(),
    )
    .unwrap();

    let groups = commands::groups(&db, "Level", true).unwrap();
    assert_eq!(
        groups,
        vec![("Level 1".to_string(), 2), ("(no value)".to_string(), 1)]
    );

    let options = RunOptions {
        group_attribute: "Level".into(),
        picker: PickerConfig::default().with_filter(BucketSelector::Value("Level 1".into())),
        ..RunOptions::default()
    };
    let picker = MockPicker::new(vec![PickerAction::SelectAll]).with_prefix("L1-");
    run(&db, &picker, &options).unwrap();

    assert_eq!(number_of(&db, 2), "L1-1");
    assert_eq!(number_of(&db, 1), "L1-2");
    assert_eq!(number_of(&db, 3), "C");
    assert_eq!(number_of(&db, 4), "D");
}

#[test]
fn test_cancel_and_dry_run_leave_store_untouched() {
    let (db, _dir) = setup_test_db();
    insert(&db, 1, "A10", None);
    insert(&db, 2, "A9", None);

    let report = run(&db, &MockPicker::cancelled(), &RunOptions::default()).unwrap();
    assert_eq!(report, RunReport::Cancelled);
    assert_eq!(report.to_string(), "Operation cancelled by user");

    let options = RunOptions {
        dry_run: true,
        ..RunOptions::default()
    };
    let report = run(&db, &MockPicker::new(vec![PickerAction::SelectAll]), &options).unwrap();
    assert!(matches!(report, RunReport::Preview { ref plan, .. } if plan.len() == 2));

    assert_eq!(number_of(&db, 1), "A10");
    assert_eq!(number_of(&db, 2), "A9");
}

#[test]
fn test_no_selection_and_empty_document() {
    let (db, _dir) = setup_test_db();
    let report = run(&db, &MockPicker::default(), &RunOptions::default()).unwrap();
    assert_eq!(report, RunReport::EmptyDocument);
    assert!(report.is_error());

    insert(&db, 1, "A1", None);
    let report = run(&db, &MockPicker::default(), &RunOptions::default()).unwrap();
    assert_eq!(report, RunReport::NoSelection);
    assert_eq!(
        report.to_string(),
        "Error: No sheets selected for renumbering"
    );
}

#[test]
fn test_import_then_renumber() {
    let (db, dir) = setup_test_db();
    let path = dir.path().join("sheets.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "number,name,Discipline").unwrap();
    writeln!(file, "M-10,Ventilation,Mechanical").unwrap();
    writeln!(file, "M-9,Plumbing,Mechanical").unwrap();
    writeln!(file, "E1,Lighting,Electrical").unwrap();
    drop(file);

    let summary = commands::import(&db, &path, None, false, true).unwrap();
    assert_eq!(summary.imported, 3);
    assert!(summary.errors.is_empty());

    let mechanical = BucketSelector::Value("Mechanical".into());
    assert_eq!(commands::list(&db, "Discipline", &mechanical, true).unwrap(), 2);

    let options = RunOptions {
        picker: PickerConfig::default().with_filter(mechanical),
        ..RunOptions::default()
    };
    let picker = MockPicker::new(vec![PickerAction::SelectAll]).with_prefix("M-");
    run(&db, &picker, &options).unwrap();

    assert_eq!(db.owner_of("M-1").unwrap(), Some(SheetId(2)));
    assert_eq!(db.owner_of("M-2").unwrap(), Some(SheetId(1)));
    assert_eq!(db.owner_of("E1").unwrap(), Some(SheetId(3)));
}
