//! semfilter - Recursive filter trees over semantic field catalogs
//!
//! This library provides:
//! - Filter tree types (FilterRule, FilterGroup, DashboardFilterRule)
//! - Document parsing from YAML/JSON and persistence to JSON
//! - Invariant-preserving tree edits
//! - Field availability for AND/OR groups
//! - Dashboard filter to tile field resolution
//! - Tree validation
//!
//! # Architecture
//!
//! **Noun modules** (data structures):
//! - `field/` - field catalog types (FilterableField, FieldClass, FilterType)
//! - `filter/` - filter tree types (FilterRule, FilterGroup, FilterOperator)
//! - `dashboard/` - dashboard filters, tile targets, tiles and tabs
//! - `config` - editor settings (EditorConfig)
//!
//! **Verb modules** (transformations):
//! - `parser/` - YAML/JSON → FilterDocument, FilterGroup → JSON
//! - `availability/` - FilterGroup + fields → fields allowed in the group
//! - `editor/` - FilterGroup + edit → FilterGroup (or deletion)
//! - `targets/` - DashboardFilterRule + tiles → TileResolution per tile
//! - `validate/` - FilterGroup + fields → Violations
//!
//! Every operation is a pure function of its inputs: edits return new trees
//! and resolvers keep no state between calls.
//!
//! # Example
//!
//! ```ignore
//! use semfilter::{parser, resolve_tile_targets, GroupOperator};
//!
//! let doc = parser::parse_file("dashboard.yaml")?;
//! let tree = doc.tree()
//!     .add_rule_at(&[], "orders_order_status", &doc.fields)?
//!     .convert_at(&[0])?
//!     .change_operator_at(&[], GroupOperator::Or, &doc.fields)?;
//!
//! let dashboard = doc.dashboard.as_ref().unwrap();
//! let filter = &dashboard.filters[0];
//! let field = doc.get_field(filter.rule.field_id());
//! let tiles = resolve_tile_targets(filter, field, &dashboard.tiles);
//! ```

pub mod field;
pub mod filter;
pub mod dashboard;
pub mod config;
pub mod parser;
pub mod availability;
pub mod editor;
pub mod targets;
pub mod validate;
pub mod error;

// Re-export commonly used types
pub use field::{FieldClass, FilterType, FilterableField};
pub use filter::{FilterGroup, FilterItem, FilterOperator, FilterRule, GroupOperator};
pub use dashboard::{Dashboard, DashboardFilterRule, DashboardTab, FieldTarget, Tile, TileFields, TileTarget};
pub use config::{EditorConfig, OperatorChangePolicy};
pub use parser::FilterDocument;
pub use availability::{available_fields, available_fields_at};
pub use editor::{EditError, FilterTree, GroupEdit};
pub use targets::{resolve_tile_targets, TileAction, TileField, TileResolution, SelectionState};
pub use validate::{validate, Violation};
pub use error::ParseError;
