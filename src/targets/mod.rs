//! Tile target resolution (verb module)
//!
//! DashboardFilterRule + tiles -> per-tile field binding.
//!
//! For each tile an explicit override wins (`false` disables the filter,
//! a field target binds it); otherwise the filter's source field is looked
//! up by exact match. A configured field the tile no longer exposes is
//! reported as `invalid_field` and treated as unset.

mod resolve;
mod types;

pub use resolve::{
    resolve_tile_targets,
    apply_tile_action,
    toggle_all,
    toggle_tab,
    selection_summary,
    by_tab,
};
pub use types::{SelectionState, TileAction, TileField, TileResolution};
