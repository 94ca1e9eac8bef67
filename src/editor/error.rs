//! Editor error types

use std::fmt;
use crate::field::{FieldClass, FilterType};
use crate::filter::FilterOperator;

/// Errors from filter tree edits
///
/// Every variant is a caller precondition failure: the edit is refused and
/// the input tree is left as it was.
#[derive(Debug, Clone, PartialEq)]
pub enum EditError {
    /// Item index past the end of a group
    IndexOutOfBounds { index: usize, len: usize },
    /// Path does not lead to an item of the expected kind
    InvalidPath(Vec<usize>),
    /// Field is not in the catalog
    UnknownField(String),
    /// Field exists but the target group does not accept it
    FieldNotAvailable(String),
    /// Operator cannot be used with the field type
    OperatorNotSupported { operator: FilterOperator, filter_type: FilterType },
    /// Subgroup conversion requested at or beyond the depth limit
    DepthLimitReached { depth: usize, limit: usize },
    /// Only rules can be wrapped into a subgroup
    GroupNotConvertible(String),
    /// Switching to OR would mix field classes among direct rules
    MixedFieldClasses { group_id: String, classes: Vec<FieldClass> },
    /// A required rule cannot be disabled without clearing `required`
    RequiredRuleDisabled(String),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "Item index {} out of bounds for group of {} items", index, len)
            }
            Self::InvalidPath(path) => write!(f, "No matching item at path {:?}", path),
            Self::UnknownField(id) => write!(f, "Field '{}' not found", id),
            Self::FieldNotAvailable(id) => {
                write!(f, "Field '{}' is not available in this group", id)
            }
            Self::OperatorNotSupported { operator, filter_type } => {
                write!(f, "Operator '{}' is not supported for {} fields", operator, filter_type)
            }
            Self::DepthLimitReached { depth, limit } => write!(
                f,
                "Cannot convert to a subgroup at depth {} (limit {})",
                depth, limit
            ),
            Self::GroupNotConvertible(id) => {
                write!(f, "Group '{}' cannot be converted into a subgroup", id)
            }
            Self::MixedFieldClasses { group_id, classes } => {
                let names: Vec<&str> = classes.iter().map(|c| c.label()).collect();
                write!(
                    f,
                    "Group '{}' cannot become OR: it mixes {}",
                    group_id,
                    names.join(", ")
                )
            }
            Self::RequiredRuleDisabled(id) => write!(
                f,
                "Rule '{}' is required; clear 'required' before disabling it",
                id
            ),
        }
    }
}

impl std::error::Error for EditError {}
