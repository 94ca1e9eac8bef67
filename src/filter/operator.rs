//! Filter operators

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use crate::field::FilterType;
use super::rule::{RuleSettings, UnitOfTime};

/// Comparison operator of a filter rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    IsNull,
    NotNull,
    Equals,
    NotEquals,
    StartsWith,
    EndsWith,
    Include,
    DoesNotInclude,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    InThePast,
    NotInThePast,
    InTheNext,
    InTheCurrent,
    NotInTheCurrent,
    InBetween,
    NotInBetween,
}

const STRING_OPERATORS: &[FilterOperator] = &[
    FilterOperator::IsNull,
    FilterOperator::NotNull,
    FilterOperator::Equals,
    FilterOperator::NotEquals,
    FilterOperator::StartsWith,
    FilterOperator::EndsWith,
    FilterOperator::Include,
    FilterOperator::DoesNotInclude,
];

const NUMBER_OPERATORS: &[FilterOperator] = &[
    FilterOperator::IsNull,
    FilterOperator::NotNull,
    FilterOperator::Equals,
    FilterOperator::NotEquals,
    FilterOperator::LessThan,
    FilterOperator::LessThanOrEqual,
    FilterOperator::GreaterThan,
    FilterOperator::GreaterThanOrEqual,
    FilterOperator::InBetween,
    FilterOperator::NotInBetween,
];

const DATE_OPERATORS: &[FilterOperator] = &[
    FilterOperator::IsNull,
    FilterOperator::NotNull,
    FilterOperator::Equals,
    FilterOperator::NotEquals,
    FilterOperator::InThePast,
    FilterOperator::NotInThePast,
    FilterOperator::InTheNext,
    FilterOperator::InTheCurrent,
    FilterOperator::NotInTheCurrent,
    FilterOperator::LessThan,
    FilterOperator::LessThanOrEqual,
    FilterOperator::GreaterThan,
    FilterOperator::GreaterThanOrEqual,
    FilterOperator::InBetween,
    FilterOperator::NotInBetween,
];

const BOOLEAN_OPERATORS: &[FilterOperator] = &[
    FilterOperator::IsNull,
    FilterOperator::NotNull,
    FilterOperator::Equals,
];

/// Operators offered for a field type, in presentation order
pub fn operators_for(filter_type: FilterType) -> &'static [FilterOperator] {
    match filter_type {
        FilterType::String => STRING_OPERATORS,
        FilterType::Number => NUMBER_OPERATORS,
        FilterType::Date => DATE_OPERATORS,
        FilterType::Boolean => BOOLEAN_OPERATORS,
    }
}

impl FilterOperator {
    /// Null checks take no values
    pub fn is_unary(&self) -> bool {
        matches!(self, FilterOperator::IsNull | FilterOperator::NotNull)
    }

    /// Relative date operators carry a unit of time in the rule settings
    pub fn is_relative_date(&self) -> bool {
        matches!(
            self,
            FilterOperator::InThePast
                | FilterOperator::NotInThePast
                | FilterOperator::InTheNext
                | FilterOperator::InTheCurrent
                | FilterOperator::NotInTheCurrent
        )
    }

    /// Range operators take a lower and an upper bound
    pub fn is_range(&self) -> bool {
        matches!(self, FilterOperator::InBetween | FilterOperator::NotInBetween)
    }

    /// Whether rules on fields of this type may use the operator
    pub fn accepts(&self, filter_type: FilterType) -> bool {
        operators_for(filter_type).contains(self)
    }

    /// Values a rule starts with after switching to this operator
    ///
    /// Unary operators take none; ranges take an unset lower and upper bound;
    /// relative dates default to one unit; everything else takes one unset value.
    pub fn default_values(&self) -> Vec<Value> {
        if self.is_unary() {
            vec![]
        } else if self.is_range() {
            vec![Value::Null, Value::Null]
        } else if self.is_relative_date() {
            vec![Value::from(1)]
        } else {
            vec![Value::Null]
        }
    }

    /// Settings a rule starts with after switching to this operator
    pub fn default_settings(&self) -> Option<RuleSettings> {
        if self.is_relative_date() {
            Some(RuleSettings {
                unit_of_time: UnitOfTime::Days,
                completed: false,
            })
        } else {
            None
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FilterOperator::IsNull => "is null",
            FilterOperator::NotNull => "is not null",
            FilterOperator::Equals => "is",
            FilterOperator::NotEquals => "is not",
            FilterOperator::StartsWith => "starts with",
            FilterOperator::EndsWith => "ends with",
            FilterOperator::Include => "includes",
            FilterOperator::DoesNotInclude => "does not include",
            FilterOperator::LessThan => "is less than",
            FilterOperator::LessThanOrEqual => "is less than or equal",
            FilterOperator::GreaterThan => "is greater than",
            FilterOperator::GreaterThanOrEqual => "is greater than or equal",
            FilterOperator::InThePast => "in the last",
            FilterOperator::NotInThePast => "not in the last",
            FilterOperator::InTheNext => "in the next",
            FilterOperator::InTheCurrent => "in the current",
            FilterOperator::NotInTheCurrent => "not in the current",
            FilterOperator::InBetween => "is between",
            FilterOperator::NotInBetween => "is not between",
        };
        write!(f, "{}", s)
    }
}
