//! Filter tree types
//!
//! - `FilterRule` - a single predicate (field, operator, values)
//! - `FilterGroup` - AND/OR node over rules and nested groups
//! - `FilterOperator` - comparison operators and their per-type availability

mod group;
mod operator;
mod rule;

pub use group::{FilterGroup, FilterItem, GroupOperator};
pub use operator::{FilterOperator, operators_for};
pub use rule::{FieldRef, FilterRule, RuleSettings, UnitOfTime, default_operator};
