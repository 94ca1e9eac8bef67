//! Field catalog types
//!
//! Fields are supplied by the model metadata layer; filters only ever
//! reference them by id.

mod field;
mod types;

pub use field::{FilterableField, find_field, fields_of_class};
pub use types::{FieldClass, FilterType, ParseFieldClassError, ParseFilterTypeError};
