//! Sheet record model
//!
//! A [`Sheet`] is the unit being renumbered: it carries a mutable sheet
//! number (the identifier), a display name and a bag of named attributes.
//! Records are owned by the store; the rest of the crate works on
//! snapshots taken at the start of a run.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable identity of a sheet inside the store
///
/// Unlike the sheet number this never changes, so selection state and
/// plan assignments are keyed by it.
#[derive(
    Encode, Decode, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct SheetId(pub u64);

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of any other element a reference attribute can point at
///
/// Negative ids are the host's "no element" marker.
#[derive(
    Encode, Decode, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct ElementId(pub i64);

impl ElementId {
    /// The null reference
    pub const INVALID: Self = Self(-1);

    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 >= 0
    }
}

/// Value stored under an attribute name
///
/// Deserializes untagged so import files can use plain JSON scalars:
/// `"Architecture"`, `12`, `3.5`, `null` or `{"element": 7}`.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum AttributeValue {
    Integer(i64),
    Real(f64),
    /// String attribute; `None` when the host holds a null string
    Text(Option<String>),
    /// Reference to another element, displayed by that element's name
    Reference { element: ElementId },
    /// Storage kind this tool has no display rule for
    Unsupported,
}

impl AttributeValue {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(Some(value.into()))
    }

    #[must_use]
    pub const fn reference(element: ElementId) -> Self {
        Self::Reference { element }
    }
}

/// A numbered sheet
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Sheet {
    pub id: SheetId,
    /// Current sheet number (the identifier being reassigned)
    pub number: String,
    pub name: String,
    /// Placeholder sheets exist in the store but are never renumbered
    #[serde(default)]
    pub placeholder: bool,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Sheet {
    #[must_use]
    pub fn new(id: SheetId, number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            number: number.into(),
            name: name.into(),
            placeholder: false,
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    #[must_use]
    pub const fn as_placeholder(mut self) -> Self {
        self.placeholder = true;
        self
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Label shown in listings and the picker: `[A101] Ground Floor Plan`
    #[must_use]
    pub fn label(&self) -> String {
        format!("[{}] {}", self.number, self.name)
    }
}
