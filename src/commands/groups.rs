//! Groups command - show the filter buckets with their sizes

use crate::{SheetnumError, db::SheetStore, renumber::load_catalog};

type Result<T> = std::result::Result<T, SheetnumError>;

/// Execute the groups command
///
/// Prints one line per bucket (every grouping value, then the blank bucket
/// if any sheet has no value) and returns the `(label, count)` pairs.
///
/// # Errors
///
/// Returns `SheetnumError::DbError` if the store cannot be read.
pub fn execute<S>(store: &S, group_attribute: &str, quiet: bool) -> Result<Vec<(String, usize)>>
where
    S: SheetStore + ?Sized,
{
    let catalog = load_catalog(store, group_attribute)?;
    let groups: Vec<(String, usize)> = catalog
        .buckets()
        .into_iter()
        .map(|bucket| (bucket.selector.label().to_string(), bucket.sheets.len()))
        .collect();

    if groups.is_empty() {
        if !quiet {
            println!("No sheets found in database.");
        }
        return Ok(groups);
    }

    if !quiet {
        println!("Groups by '{group_attribute}' ({} sheets):", catalog.len());
    }
    for (label, count) in &groups {
        if quiet {
            println!("{label}");
        } else {
            println!("  {label} ({count} sheet(s))");
        }
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TestDb, sample_sheets};

    #[test]
    fn test_groups_with_blank_bucket_last() {
        let db = TestDb::with_sheets(&sample_sheets());
        let groups = execute(db.db(), "Discipline", true).unwrap();
        assert_eq!(
            groups,
            vec![
                ("Architectural".to_string(), 3),
                ("Structural".to_string(), 1),
                ("(no value)".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_unknown_attribute_puts_everything_in_blank() {
        let db = TestDb::with_sheets(&sample_sheets());
        let groups = execute(db.db(), "Phase", true).unwrap();
        assert_eq!(groups, vec![("(no value)".to_string(), 5)]);
    }
}
