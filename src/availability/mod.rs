//! Field availability (verb module)
//!
//! Group + field catalog -> fields a new rule in that group may target.
//!
//! AND groups accept every field. OR groups accept only fields of the class
//! already used by their direct rules, so an OR never mixes dimensions,
//! metrics and table calculations.

mod resolve;

pub use resolve::{
    available_fields,
    available_fields_at,
    available_fields_for_item,
    direct_field_classes,
    group_field_class,
};
