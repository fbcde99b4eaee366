//! Sorted, filterable snapshot of the sheets in a store
//!
//! The catalog is built once per run. It computes each sheet's natural key
//! and grouping value up front and never re-reads the store, so sheets can
//! not move between buckets halfway through a selection.

use crate::attributes::{AttributeIndex, is_blank};
use crate::model::{Sheet, SheetId};
use crate::natural::{NaturalKey, natural_key};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Label used for the bucket of sheets without a grouping value
pub const BLANK_BUCKET_LABEL: &str = "(no value)";

/// Label used for the pass-through selector
pub const ALL_BUCKET_LABEL: &str = "All";

/// Which sheets a filtered view shows
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum BucketSelector {
    /// Every sheet
    #[default]
    All,
    /// Sheets whose grouping value equals this text exactly
    Value(String),
    /// Sheets whose grouping value is empty or whitespace
    Blank,
}

impl BucketSelector {
    /// Selector from the `--group` / `--blank` command line flags
    #[must_use]
    pub fn from_flags(group: Option<String>, blank: bool) -> Self {
        match (group, blank) {
            (_, true) => Self::Blank,
            (Some(value), false) => Self::Value(value),
            (None, false) => Self::All,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_BUCKET_LABEL,
            Self::Value(value) => value,
            Self::Blank => BLANK_BUCKET_LABEL,
        }
    }

    fn matches(&self, group: &str) -> bool {
        match self {
            Self::All => true,
            Self::Value(value) => group == value,
            Self::Blank => is_blank(group),
        }
    }
}

impl fmt::Display for BucketSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One partition of the catalog by grouping value
#[derive(Debug, Clone)]
pub struct FilterBucket<'c> {
    pub selector: BucketSelector,
    pub sheets: Vec<&'c Sheet>,
}

#[derive(Debug, Clone)]
struct CatalogEntry {
    sheet: Sheet,
    key: NaturalKey,
    group: String,
}

/// Read-only index over one snapshot of sheets
#[derive(Debug, Clone)]
pub struct SheetCatalog {
    attribute: String,
    /// Entries in ascending natural-key order (stable for equal keys)
    entries: Vec<CatalogEntry>,
    positions: HashMap<SheetId, usize>,
    values: Vec<String>,
    has_blank: bool,
}

impl SheetCatalog {
    /// Snapshot `sheets`, grouping by the attribute `index` reads
    #[must_use]
    pub fn build(sheets: Vec<Sheet>, index: &AttributeIndex<'_>) -> Self {
        let mut entries: Vec<CatalogEntry> = sheets
            .into_iter()
            .map(|sheet| CatalogEntry {
                key: natural_key(sheet.number.as_str()),
                group: index.value_of(&sheet),
                sheet,
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));

        let mut distinct = BTreeSet::new();
        let mut has_blank = false;
        for entry in &entries {
            if is_blank(&entry.group) {
                has_blank = true;
            } else {
                distinct.insert(entry.group.clone());
            }
        }

        let positions = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.sheet.id, i))
            .collect();

        tracing::debug!(
            sheets = entries.len(),
            groups = distinct.len(),
            has_blank,
            attribute = index.name(),
            "built sheet catalog"
        );

        Self {
            attribute: index.name().to_string(),
            entries,
            positions,
            values: distinct.into_iter().collect(),
            has_blank,
        }
    }

    /// Name of the grouping attribute
    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All sheets in ascending natural order of their numbers
    #[must_use]
    pub fn all_sorted(&self) -> Vec<&Sheet> {
        self.entries.iter().map(|entry| &entry.sheet).collect()
    }

    /// Sheets matching `selector`, in ascending natural order
    #[must_use]
    pub fn filter(&self, selector: &BucketSelector) -> Vec<&Sheet> {
        self.entries
            .iter()
            .filter(|entry| selector.matches(&entry.group))
            .map(|entry| &entry.sheet)
            .collect()
    }

    /// Distinct non-blank grouping values, sorted case-sensitively
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    #[must_use]
    pub const fn has_blank(&self) -> bool {
        self.has_blank
    }

    /// Selectors in picker order: `All`, each value, then `Blank` if any sheet is blank
    #[must_use]
    pub fn selectors(&self) -> Vec<BucketSelector> {
        let mut selectors = Vec::with_capacity(self.values.len() + 2);
        selectors.push(BucketSelector::All);
        selectors.extend(self.values.iter().cloned().map(BucketSelector::Value));
        if self.has_blank {
            selectors.push(BucketSelector::Blank);
        }
        selectors
    }

    /// Partition of the whole catalog, one bucket per selector except `All`
    #[must_use]
    pub fn buckets(&self) -> Vec<FilterBucket<'_>> {
        self.selectors()
            .into_iter()
            .filter(|selector| *selector != BucketSelector::All)
            .map(|selector| FilterBucket {
                sheets: self.filter(&selector),
                selector,
            })
            .collect()
    }

    #[must_use]
    pub fn get(&self, id: SheetId) -> Option<&Sheet> {
        self.positions.get(&id).map(|&i| &self.entries[i].sheet)
    }

    /// Grouping value captured for a sheet at build time
    #[must_use]
    pub fn group_of(&self, id: SheetId) -> Option<&str> {
        self.positions
            .get(&id)
            .map(|&i| self.entries[i].group.as_str())
    }

    /// Sheet with the given number (exact match)
    #[must_use]
    pub fn find_by_number(&self, number: &str) -> Option<&Sheet> {
        self.entries
            .iter()
            .map(|entry| &entry.sheet)
            .find(|sheet| sheet.number == number)
    }
}
