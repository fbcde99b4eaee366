//! Testing utilities for sheetnum
//!
//! This module provides helper types and functions for writing tests,
//! including a `TestDb` wrapper for temporary database management.
//!
//! Only available when compiled with `cfg(test)`.

use crate::db::Database;
use crate::model::{AttributeValue, Sheet, SheetId};
use std::path::Path;
use tempfile::TempDir;

/// Wrapper for a temporary test database that cleans up on drop
///
/// The sled directory lives inside a [`TempDir`], so nothing is left behind
/// once the wrapper goes out of scope.
pub struct TestDb {
    db: Database,
    dir: TempDir,
}

impl TestDb {
    /// Create a fresh, empty test database
    ///
    /// # Panics
    /// Panics if the temporary directory or the database cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db = Database::open(dir.path().join("db")).expect("Failed to open test database");
        Self { db, dir }
    }

    /// Create a test database holding `sheets`
    ///
    /// # Panics
    /// Panics if any sheet cannot be inserted.
    #[must_use]
    pub fn with_sheets(sheets: &[Sheet]) -> Self {
        let test_db = Self::new();
        for sheet in sheets {
            test_db
                .db
                .insert_sheet(sheet)
                .expect("Failed to insert test sheet");
        }
        test_db
    }

    /// Get a reference to the underlying database
    #[must_use]
    pub const fn db(&self) -> &Database {
        &self.db
    }

    /// Get the directory holding the test database
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

impl Default for TestDb {
    fn default() -> Self {
        Self::new()
    }
}

/// Sheet with a `Discipline` text attribute
#[must_use]
pub fn sheet(id: u64, number: &str, discipline: Option<&str>) -> Sheet {
    let sheet = Sheet::new(SheetId(id), number, format!("Sheet {number}"));
    match discipline {
        Some(value) => sheet.with_attribute("Discipline", AttributeValue::text(value)),
        None => sheet,
    }
}

/// A small mixed set: two disciplines, one blank, numbers out of natural order
#[must_use]
pub fn sample_sheets() -> Vec<Sheet> {
    vec![
        sheet(1, "A10", Some("Architectural")),
        sheet(2, "A2", Some("Architectural")),
        sheet(3, "S1", Some("Structural")),
        sheet(4, "A1", Some("Architectural")),
        sheet(5, "G1", None),
    ]
}
