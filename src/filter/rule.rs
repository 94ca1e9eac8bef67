//! Filter rules (tree leaves)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;
use crate::editor::EditError;
use crate::field::{FilterType, FilterableField};
use super::operator::FilterOperator;

/// Reference from a rule to the field it filters on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    #[serde(rename = "fieldId")]
    pub field_id: String,
    /// Set on dashboard rules, which may be matched against other tables
    #[serde(rename = "tableName", default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
}

/// Unit for relative date operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitOfTime {
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Quarters,
    Years,
}

/// Extra settings carried by relative date rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSettings {
    #[serde(rename = "unitOfTime")]
    pub unit_of_time: UnitOfTime,
    /// Only count completed periods
    #[serde(default)]
    pub completed: bool,
}

/// A single predicate over one field
///
/// Enabled rules keep `values` empty exactly when the operator is unary.
/// Disabled rules match anything and carry no values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterRule {
    pub id: String,
    pub target: FieldRef,
    pub operator: FilterOperator,
    #[serde(default)]
    pub values: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<RuleSettings>,
    /// Viewers cannot switch a required rule off
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Operator a new rule starts with for a field type
pub fn default_operator(filter_type: FilterType) -> FilterOperator {
    match filter_type {
        FilterType::Date => FilterOperator::InThePast,
        FilterType::String | FilterType::Number | FilterType::Boolean => FilterOperator::Equals,
    }
}

impl FilterRule {
    /// Create a rule for `field` with the default operator for its type
    pub fn create_default(field: &FilterableField) -> Self {
        let operator = default_operator(field.filter_type);
        Self {
            id: Uuid::new_v4().to_string(),
            target: FieldRef {
                field_id: field.id.clone(),
                table_name: None,
            },
            operator,
            values: operator.default_values(),
            settings: operator.default_settings(),
            required: false,
            disabled: false,
            label: None,
        }
    }

    /// Id of the targeted field
    pub fn field_id(&self) -> &str {
        &self.target.field_id
    }

    /// Switch operator, resetting values and settings to the operator defaults
    pub fn with_operator(self, operator: FilterOperator) -> Self {
        let values = if self.disabled { vec![] } else { operator.default_values() };
        Self {
            operator,
            values,
            settings: operator.default_settings(),
            ..self
        }
    }

    /// Enable or disable the rule
    ///
    /// Disabling clears the rule to its match-anything state, enabling
    /// restores the operator defaults. A required rule cannot be disabled;
    /// use [`FilterRule::disable_clearing_required`] to drop both at once.
    pub fn with_disabled_state(self, disabled: bool) -> Result<Self, EditError> {
        if disabled && self.required {
            return Err(EditError::RequiredRuleDisabled(self.id));
        }
        Ok(self.apply_disabled(disabled))
    }

    /// Disable the rule, clearing `required` in the same transition
    pub fn disable_clearing_required(self) -> Self {
        Self {
            required: false,
            ..self
        }
        .apply_disabled(true)
    }

    fn apply_disabled(self, disabled: bool) -> Self {
        if disabled == self.disabled {
            return self;
        }
        debug!(rule = %self.id, disabled, "changing rule disabled state");
        let values = if disabled { vec![] } else { self.operator.default_values() };
        Self {
            disabled,
            values,
            settings: self.operator.default_settings(),
            ..self
        }
    }

    /// Mark the rule required or optional
    ///
    /// Requiring a disabled rule re-enables it with the operator defaults.
    pub fn with_required(self, required: bool) -> Self {
        if required && self.disabled {
            let values = self.operator.default_values();
            return Self {
                required,
                disabled: false,
                values,
                settings: self.operator.default_settings(),
                ..self
            };
        }
        Self { required, ..self }
    }

    /// Replace the literal values
    pub fn with_values(self, values: Vec<Value>) -> Self {
        Self { values, ..self }
    }

    /// Set the label override; an empty label removes it
    pub fn with_label(self, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            label: if label.is_empty() { None } else { Some(label) },
            ..self
        }
    }

    /// Point the rule at another field, keeping its id
    ///
    /// The operator is kept when the new field's type accepts it, otherwise
    /// the type default is used.
    pub fn with_field(self, field: &FilterableField) -> Self {
        let target = FieldRef {
            field_id: field.id.clone(),
            table_name: self.target.table_name.as_ref().map(|_| field.table.clone()),
        };
        if self.operator.accepts(field.filter_type) {
            return Self { target, ..self };
        }
        Self { target, ..self }.with_operator(default_operator(field.filter_type))
    }

    /// Whether the values agree with the operator arity
    pub fn has_consistent_values(&self) -> bool {
        if self.disabled {
            return self.values.is_empty();
        }
        self.values.is_empty() == self.operator.is_unary()
    }
}
