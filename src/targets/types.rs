//! Types for resolved tile targets

use serde::Serialize;
use crate::field::FilterableField;

/// Field a dashboard filter is bound to on a tile
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TileField {
    /// Typed field of a model-backed chart
    Field(FilterableField),
    /// Column of a SQL chart
    Column { name: String },
}

impl TileField {
    /// Field id or column name
    pub fn id(&self) -> &str {
        match self {
            TileField::Field(field) => &field.id,
            TileField::Column { name } => name,
        }
    }
}

/// How a dashboard filter applies to one tile
///
/// Recomputed from the rule and tile metadata on every pass; never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileResolution {
    pub tile_uuid: String,
    pub tab_uuid: Option<String>,
    pub label: String,
    /// Field the filter is applied through; `None` when it does not apply
    pub selected_field: Option<TileField>,
    /// Configured field id missing from the tile (stale mapping)
    pub invalid_field: Option<String>,
    /// The tile exposes at least one field compatible with the filter
    pub is_available: bool,
    /// Fields offered for manual selection, best matches first
    pub candidates: Vec<TileField>,
}

impl TileResolution {
    /// The filter applies to this tile
    pub fn is_checked(&self) -> bool {
        self.selected_field.is_some()
    }
}

/// Aggregate selection over a list of tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "count", rename_all = "lowercase")]
pub enum SelectionState {
    /// Every tile is checked (also for an empty list)
    All,
    /// No tile is checked
    None,
    /// Some tiles are checked; carries how many
    Partial(usize),
}

/// Edit requested on one tile's target
#[derive(Debug, Clone, PartialEq)]
pub enum TileAction {
    /// Apply the filter to the tile, optionally through a specific field
    Add(Option<crate::dashboard::FieldTarget>),
    /// Stop applying the filter to the tile
    Remove,
}
