//! List command - show sheets in natural order

use crate::{
    SheetnumError,
    catalog::{BucketSelector, SheetCatalog},
    db::SheetStore,
    renumber::load_catalog,
};
use colored::Colorize;

type Result<T> = std::result::Result<T, SheetnumError>;

/// Format one sheet for display
#[must_use]
pub fn sheet_line(catalog: &SheetCatalog, sheet: &crate::model::Sheet, quiet: bool) -> String {
    if quiet {
        return sheet.number.clone();
    }
    match catalog.group_of(sheet.id) {
        Some(group) if !group.trim().is_empty() => {
            format!("  {} ({})", sheet.label(), group.magenta())
        }
        _ => format!("  {}", sheet.label()),
    }
}

/// Execute the list command
///
/// # Errors
///
/// Returns `SheetnumError::DbError` if the store cannot be read.
pub fn execute<S>(
    store: &S,
    group_attribute: &str,
    filter: &BucketSelector,
    quiet: bool,
) -> Result<usize>
where
    S: SheetStore + ?Sized,
{
    let catalog = load_catalog(store, group_attribute)?;
    let sheets = catalog.filter(filter);

    if sheets.is_empty() {
        if !quiet {
            println!("No sheets found for filter '{filter}'.");
        }
    } else {
        if !quiet {
            println!("Sheets ({filter}):");
        }
        for sheet in &sheets {
            println!("{}", sheet_line(&catalog, sheet, quiet));
        }
    }
    Ok(sheets.len())
}
