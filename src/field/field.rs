//! Filterable field definitions

use serde::{Deserialize, Serialize};
use super::types::{FieldClass, FilterType};

/// A field that filter rules can target
///
/// Supplied by the explore/model metadata; `id` is the stable identifier
/// persisted in rules and tile targets (e.g. `orders_order_status`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterableField {
    pub id: String,
    /// Unqualified field name (e.g. `order_status`)
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Table the field belongs to. Empty for table calculations.
    #[serde(default)]
    pub table: String,
    #[serde(rename = "type", default)]
    pub filter_type: FilterType,
    #[serde(rename = "class")]
    pub field_class: FieldClass,
}

impl FilterableField {
    /// Create a field with no label
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        table: impl Into<String>,
        filter_type: FilterType,
        field_class: FieldClass,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            label: None,
            table: table.into(),
            filter_type,
            field_class,
        }
    }

    /// Display label, defaulting to the field name
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Same id, type and table
    pub fn matches_exact(&self, other: &FilterableField) -> bool {
        self.id == other.id && self.filter_type == other.filter_type && self.table == other.table
    }

    /// Same type and same unqualified name (possibly on another table)
    pub fn matches_type_and_name(&self, other: &FilterableField) -> bool {
        self.filter_type == other.filter_type && self.name == other.name
    }

    /// Same type
    pub fn matches_type(&self, other: &FilterableField) -> bool {
        self.filter_type == other.filter_type
    }
}

/// Look up a field by id
pub fn find_field<'a>(fields: &'a [FilterableField], id: &str) -> Option<&'a FilterableField> {
    fields.iter().find(|f| f.id == id)
}

/// Fields of a single class, preserving catalog order
pub fn fields_of_class(fields: &[FilterableField], class: FieldClass) -> Vec<FilterableField> {
    fields
        .iter()
        .filter(|f| f.field_class == class)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> FilterableField {
        FilterableField::new("orders_status", "status", "orders", FilterType::String, FieldClass::Dimension)
    }

    #[test]
    fn test_matchers() {
        let a = status();
        let same = status();
        let other_table =
            FilterableField::new("payments_status", "status", "payments", FilterType::String, FieldClass::Dimension);
        let numeric =
            FilterableField::new("orders_amount", "amount", "orders", FilterType::Number, FieldClass::Metric);

        assert!(a.matches_exact(&same));
        assert!(!a.matches_exact(&other_table));
        assert!(a.matches_type_and_name(&other_table));
        assert!(a.matches_type(&other_table));
        assert!(!a.matches_type(&numeric));
    }

    #[test]
    fn test_deserialize_field() {
        let yaml = "id: orders_status\nname: status\ntable: orders\ntype: varchar\nclass: dimension\n";
        let field: FilterableField = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(field, status());
        assert_eq!(field.display_label(), "status");
    }

    #[test]
    fn test_fields_of_class() {
        let fields = vec![
            status(),
            FilterableField::new("orders_total", "total", "orders", FilterType::Number, FieldClass::Metric),
        ];
        let metrics = fields_of_class(&fields, FieldClass::Metric);
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].id, "orders_total");
        assert!(find_field(&fields, "orders_status").is_some());
        assert!(find_field(&fields, "missing").is_none());
    }
}
