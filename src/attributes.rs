//! Attribute access for grouping
//!
//! Every attribute read goes through [`attribute_value`], a total function:
//! missing attributes, null strings, numeric zeros, dangling references and
//! storage kinds without a display rule all come back as the empty string. Downstream
//! filtering only ever sees text.

use crate::model::{AttributeValue, ElementId, Sheet};

/// Resolves referenced elements to their display names
pub trait ReferenceResolver {
    /// Display name of the element, or `None` if it does not exist
    fn element_name(&self, id: ElementId) -> Option<String>;
}

/// Resolver for stores without referenced elements
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReferences;

impl ReferenceResolver for NoReferences {
    fn element_name(&self, _id: ElementId) -> Option<String> {
        None
    }
}

impl<F> ReferenceResolver for F
where
    F: Fn(ElementId) -> Option<String>,
{
    fn element_name(&self, id: ElementId) -> Option<String> {
        self(id)
    }
}

/// Displayable value of `name` on `sheet`, `""` when there is none
#[must_use]
pub fn attribute_value<R>(sheet: &Sheet, name: &str, resolver: &R) -> String
where
    R: ReferenceResolver + ?Sized,
{
    match sheet.attribute(name) {
        None
        | Some(AttributeValue::Text(None) | AttributeValue::Unsupported) => String::new(),
        Some(AttributeValue::Text(Some(text))) => text.clone(),
        Some(AttributeValue::Integer(0)) => String::new(),
        Some(AttributeValue::Integer(value)) => value.to_string(),
        Some(AttributeValue::Real(value)) if *value == 0.0 => String::new(),
        Some(AttributeValue::Real(value)) => format_real(*value),
        Some(AttributeValue::Reference { element }) if element.is_valid() => {
            resolver.element_name(*element).unwrap_or_default()
        }
        Some(AttributeValue::Reference { .. }) => String::new(),
    }
}

/// Whole-number reals keep a trailing `.0` so `2.0` and `2` stay distinct
fn format_real(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Whether a displayed value belongs in the "no value" bucket
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Reads one configured attribute from sheets
///
/// Bundles the attribute name with the resolver so the catalog can be built
/// without caring how values are stored.
pub struct AttributeIndex<'r> {
    name: String,
    resolver: &'r dyn ReferenceResolver,
}

impl<'r> AttributeIndex<'r> {
    #[must_use]
    pub fn new(name: impl Into<String>, resolver: &'r dyn ReferenceResolver) -> Self {
        Self {
            name: name.into(),
            resolver,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value_of(&self, sheet: &Sheet) -> String {
        attribute_value(sheet, &self.name, self.resolver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SheetId;

    const ATTR: &str = "Discipline";

    fn sheet_with(value: AttributeValue) -> Sheet {
        Sheet::new(SheetId(1), "A1", "Plan").with_attribute(ATTR, value)
    }

    fn levels(id: ElementId) -> Option<String> {
        (id == ElementId(7)).then(|| "Level 1".to_string())
    }

    #[test]
    fn test_missing_attribute_is_empty() {
        let sheet = Sheet::new(SheetId(1), "A1", "Plan");
        assert_eq!(attribute_value(&sheet, ATTR, &NoReferences), "");
    }

    #[test]
    fn test_text_values() {
        assert_eq!(
            attribute_value(&sheet_with(AttributeValue::text("Arch")), ATTR, &NoReferences),
            "Arch"
        );
        assert_eq!(
            attribute_value(&sheet_with(AttributeValue::Text(None)), ATTR, &NoReferences),
            ""
        );
    }

    #[test]
    fn test_numeric_values() {
        assert_eq!(
            attribute_value(&sheet_with(AttributeValue::Integer(12)), ATTR, &NoReferences),
            "12"
        );
        assert_eq!(
            attribute_value(&sheet_with(AttributeValue::Integer(-4)), ATTR, &NoReferences),
            "-4"
        );
        assert_eq!(
            attribute_value(&sheet_with(AttributeValue::Real(2.5)), ATTR, &NoReferences),
            "2.5"
        );
    }

    #[test]
    fn test_numeric_zero_is_empty() {
        for value in [
            AttributeValue::Integer(0),
            AttributeValue::Real(0.0),
            AttributeValue::Real(-0.0),
        ] {
            assert_eq!(attribute_value(&sheet_with(value), ATTR, &NoReferences), "");
        }
    }

    #[test]
    fn test_whole_reals_keep_decimal_point() {
        assert_eq!(
            attribute_value(&sheet_with(AttributeValue::Real(2.0)), ATTR, &NoReferences),
            "2.0"
        );
        assert_eq!(
            attribute_value(&sheet_with(AttributeValue::Real(-3.0)), ATTR, &NoReferences),
            "-3.0"
        );
        assert_eq!(
            attribute_value(&sheet_with(AttributeValue::Real(f64::INFINITY)), ATTR, &NoReferences),
            "inf"
        );
    }

    #[test]
    fn test_reference_resolution() {
        let resolved = sheet_with(AttributeValue::reference(ElementId(7)));
        assert_eq!(attribute_value(&resolved, ATTR, &levels), "Level 1");

        let dangling = sheet_with(AttributeValue::reference(ElementId(8)));
        assert_eq!(attribute_value(&dangling, ATTR, &levels), "");

        let null = sheet_with(AttributeValue::reference(ElementId::INVALID));
        assert_eq!(attribute_value(&null, ATTR, &levels), "");
    }

    #[test]
    fn test_unsupported_kind_is_empty() {
        assert_eq!(
            attribute_value(&sheet_with(AttributeValue::Unsupported), ATTR, &NoReferences),
            ""
        );
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(!is_blank(" Arch "));
    }

    #[test]
    fn test_attribute_index_reads_configured_name() {
        let index = AttributeIndex::new(ATTR, &NoReferences);
        assert_eq!(index.name(), ATTR);
        assert_eq!(index.value_of(&sheet_with(AttributeValue::text("Civil"))), "Civil");
    }
}
