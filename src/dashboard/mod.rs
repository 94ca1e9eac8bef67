//! Dashboard-level filter types
//!
//! A dashboard filter targets one source field and is propagated to every
//! tile that exposes a compatible field, unless a tile override says otherwise.

mod target;
mod tile;

use serde::{Deserialize, Serialize};

pub use target::{DashboardFilterRule, FieldTarget, TileTarget, SQL_COLUMN_TABLE};
pub use tile::{DashboardTab, Tile, TileFields};

/// Tiles, tabs and filters of one dashboard
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(default)]
    pub tabs: Vec<DashboardTab>,
    #[serde(default)]
    pub tiles: Vec<Tile>,
    #[serde(default)]
    pub filters: Vec<DashboardFilterRule>,
}

impl Dashboard {
    /// Get a dashboard filter by id
    pub fn get_filter(&self, id: &str) -> Option<&DashboardFilterRule> {
        self.filters.iter().find(|f| f.id() == id)
    }

    /// Get a tile by uuid
    pub fn get_tile(&self, uuid: &str) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.uuid == uuid)
    }
}
