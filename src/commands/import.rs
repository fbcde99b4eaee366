//! Import command - load sheets from JSON or CSV files
//!
//! # JSON
//!
//! Either a plain array of sheets or an object with `sheets` and the
//! `elements` that reference attributes point at:
//!
//! ```json
//! {
//!   "sheets": [
//!     { "number": "A101", "name": "Ground Floor Plan",
//!       "attributes": { "Discipline": "Architectural", "Level": { "element": 7 } } },
//!     { "id": 40, "number": "X0", "name": "Legend", "placeholder": true }
//!   ],
//!   "elements": [ { "id": 7, "name": "Level 0" } ]
//! }
//! ```
//!
//! # CSV
//!
//! A header row is required. `number` is mandatory; `name`, `id` and
//! `placeholder` are optional. Every other column becomes a text attribute
//! named after its header; empty cells are left out.
//!
//! ```text
//! number,name,Discipline
//! A101,Ground Floor Plan,Architectural
//! S1,Foundations,Structural
//! ```

use crate::{
    SheetnumError,
    cli::ImportFormat,
    db::Database,
    model::{AttributeValue, ElementId, Sheet, SheetId},
};
use colored::Colorize;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

type Result<T> = std::result::Result<T, SheetnumError>;

/// One sheet read from an import file
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImportedSheet {
    /// Fixed id; the next free id is used when absent
    #[serde(default)]
    pub id: Option<u64>,
    pub number: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub placeholder: bool,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
}

/// Element names for reference attributes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportedElement {
    pub id: i64,
    pub name: String,
}

/// Parsed content of an import file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportData {
    pub sheets: Vec<ImportedSheet>,
    pub elements: Vec<ImportedElement>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonDocument {
    Sheets(Vec<ImportedSheet>),
    Document {
        sheets: Vec<ImportedSheet>,
        #[serde(default)]
        elements: Vec<ImportedElement>,
    },
}

/// Summary of an import
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub imported: usize,
    pub elements: usize,
    pub removed: usize,
    pub errors: Vec<String>,
}

impl ImportSummary {
    /// Print summary in the same format as other batch commands
    pub fn print(&self) {
        println!("\n{}", "=== Import Summary ===".bold());
        if self.removed > 0 {
            println!("  {} {}", "⊘ Replaced:".yellow(), self.removed);
        }
        println!("  {} {}", "✓ Imported:".green(), self.imported);
        if self.elements > 0 {
            println!("  {} {}", "✓ Elements:".green(), self.elements);
        }
        if !self.errors.is_empty() {
            println!("  {} {}", "✗ Errors:".red(), self.errors.len());
            println!("\n{}", "Error details:".red().bold());
            for msg in &self.errors {
                println!("  - {msg}");
            }
        }
    }
}

/// Suggest the other format when `content` looks like it
#[must_use]
pub fn format_mismatch_hint(content: &str, attempted: ImportFormat) -> Option<String> {
    let is_json = serde_json::from_str::<serde_json::Value>(content).is_ok();
    let is_csv = {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(content.as_bytes());
        rdr.records()
            .next()
            .is_some_and(|rec| rec.is_ok_and(|r| r.len() > 1))
    };
    match attempted {
        ImportFormat::Json if is_csv && !is_json => {
            Some("Hint: The file appears to be CSV. Use '--format csv'.".to_string())
        }
        ImportFormat::Csv if is_json => {
            Some("Hint: The file appears to be JSON. Use '--format json'.".to_string())
        }
        _ => None,
    }
}

fn with_hint(base: String, content: &str, attempted: ImportFormat) -> SheetnumError {
    match format_mismatch_hint(content, attempted) {
        Some(hint) => SheetnumError::InvalidInput(format!("{base}\n{hint}")),
        None => SheetnumError::InvalidInput(base),
    }
}

/// Parse a JSON import file
///
/// # Errors
///
/// Returns `SheetnumError::InvalidInput` with a format hint when the content
/// is not a valid sheet document.
pub fn parse_json(content: &str) -> Result<ImportData> {
    match serde_json::from_str::<JsonDocument>(content) {
        Ok(JsonDocument::Sheets(sheets)) => Ok(ImportData {
            sheets,
            elements: Vec::new(),
        }),
        Ok(JsonDocument::Document { sheets, elements }) => Ok(ImportData { sheets, elements }),
        Err(e) => Err(with_hint(
            format!("Invalid JSON: {e}"),
            content,
            ImportFormat::Json,
        )),
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y"
    )
}

/// Parse a CSV import file
///
/// # Errors
///
/// Returns `SheetnumError::InvalidInput` when the content looks like JSON,
/// the `number` column is missing, a record is malformed or an id is not a
/// non-negative integer.
pub fn parse_csv(content: &str) -> Result<ImportData> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        return Err(with_hint(
            "Invalid CSV: content appears to be JSON".to_string(),
            content,
            ImportFormat::Csv,
        ));
    }

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let headers = rdr
        .headers()
        .map_err(|e| SheetnumError::InvalidInput(format!("Invalid CSV header: {e}")))?
        .clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let number_col = column("number").ok_or_else(|| {
        SheetnumError::InvalidInput("Invalid CSV: missing 'number' column".to_string())
    })?;
    let name_col = column("name");
    let id_col = column("id");
    let placeholder_col = column("placeholder");
    let known = [Some(number_col), name_col, id_col, placeholder_col];

    let mut sheets = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        // Header is line 1
        let line = i + 2;
        let record = result.map_err(|e| {
            with_hint(
                format!("Invalid CSV at line {line}: {e}"),
                content,
                ImportFormat::Csv,
            )
        })?;
        let field = |col: Option<usize>| col.and_then(|c| record.get(c)).unwrap_or_default();

        let id = match field(id_col) {
            "" => None,
            text => Some(text.parse::<u64>().map_err(|_| {
                SheetnumError::InvalidInput(format!("Invalid CSV at line {line}: bad id '{text}'"))
            })?),
        };
        let attributes = headers
            .iter()
            .enumerate()
            .filter(|(c, _)| !known.contains(&Some(*c)))
            .filter_map(|(c, header)| {
                let value = record.get(c)?;
                (!value.is_empty()).then(|| (header.to_string(), AttributeValue::text(value)))
            })
            .collect();

        sheets.push(ImportedSheet {
            id,
            number: field(Some(number_col)).to_string(),
            name: field(name_col).to_string(),
            placeholder: parse_flag(field(placeholder_col)),
            attributes,
        });
    }

    Ok(ImportData {
        sheets,
        elements: Vec::new(),
    })
}

/// Pick the format from the flag, the extension or the content
#[must_use]
pub fn detect_format(path: &Path, content: &str, explicit: Option<ImportFormat>) -> ImportFormat {
    explicit
        .or_else(|| ImportFormat::from_path(path))
        .unwrap_or_else(|| {
            let trimmed = content.trim_start();
            if trimmed.starts_with('[') || trimmed.starts_with('{') {
                ImportFormat::Json
            } else {
                ImportFormat::Csv
            }
        })
}

/// Write parsed data into the database
///
/// Sheets that cannot be stored (empty or duplicate number) are reported in
/// the summary and skipped; the rest are imported.
///
/// # Errors
///
/// Returns `SheetnumError::DbError` if clearing, id allocation or flushing
/// fails.
pub fn load(db: &Database, data: ImportData, replace: bool) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    if replace {
        summary.removed = db.count();
        db.clear()?;
        info!(removed = summary.removed, "cleared database before import");
    }

    for element in &data.elements {
        db.insert_element(ElementId(element.id), &element.name)?;
        summary.elements += 1;
    }

    for entry in data.sheets {
        let id = match entry.id {
            Some(id) => SheetId(id),
            None => db.next_sheet_id()?,
        };
        let mut sheet = Sheet::new(id, entry.number, entry.name);
        sheet.placeholder = entry.placeholder;
        sheet.attributes = entry.attributes;

        match db.insert_sheet(&sheet) {
            Ok(()) => {
                debug!(%id, number = %sheet.number, "imported sheet");
                summary.imported += 1;
            }
            Err(e) => summary.errors.push(format!("{}: {e}", sheet.label())),
        }
    }

    db.flush()?;
    info!(
        imported = summary.imported,
        errors = summary.errors.len(),
        "import finished"
    );
    Ok(summary)
}

/// Execute the import command
///
/// # Errors
///
/// Returns `SheetnumError` if the file cannot be read or parsed, or the
/// database fails.
pub fn execute(
    db: &Database,
    file: &Path,
    format: Option<ImportFormat>,
    replace: bool,
    quiet: bool,
) -> Result<ImportSummary> {
    let content = std::fs::read_to_string(file)?;
    let data = match detect_format(file, &content, format) {
        ImportFormat::Json => parse_json(&content)?,
        ImportFormat::Csv => parse_csv(&content)?,
    };

    let summary = load(db, data, replace)?;
    if quiet {
        for msg in &summary.errors {
            eprintln!("{msg}");
        }
    } else {
        summary.print();
    }
    Ok(summary)
}
