use std::cmp::Ordering;
use tracing::{debug, warn};
use crate::dashboard::{DashboardFilterRule, DashboardTab, Tile, TileFields, TileTarget};
use crate::field::FilterableField;
use super::types::{SelectionState, TileAction, TileField, TileResolution};

/// Resolve how `rule` applies to each tile
///
/// `field` is the filter's source field; without it no default matching or
/// availability can be computed. Model-backed tiles come first, ordered by
/// how well they match the source field (exact, then type and name), SQL
/// chart tiles follow in input order.
pub fn resolve_tile_targets(
    rule: &DashboardFilterRule,
    field: Option<&FilterableField>,
    tiles: &[Tile],
) -> Vec<TileResolution> {
    let mut field_tiles: Vec<(&Tile, &[FilterableField])> = tiles
        .iter()
        .filter_map(|tile| match &tile.source {
            TileFields::Fields(fields) => Some((tile, fields.as_slice())),
            TileFields::Columns(_) => None,
        })
        .collect();

    if let Some(source) = field {
        // stable sorts: the last sort decides first
        field_tiles.sort_by(|(_, a), (_, b)| {
            compare_matches(
                a.iter().any(|f| source.matches_type_and_name(f)),
                b.iter().any(|f| source.matches_type_and_name(f)),
            )
        });
        field_tiles.sort_by(|(_, a), (_, b)| {
            compare_matches(
                a.iter().any(|f| f.matches_exact(source)),
                b.iter().any(|f| f.matches_exact(source)),
            )
        });
    }

    let mut resolutions: Vec<TileResolution> = field_tiles
        .into_iter()
        .map(|(tile, fields)| resolve_field_tile(rule, field, tile, fields))
        .collect();

    resolutions.extend(tiles.iter().filter_map(|tile| match &tile.source {
        TileFields::Columns(columns) => Some(resolve_column_tile(rule, tile, columns)),
        TileFields::Fields(_) => None,
    }));

    for resolution in &resolutions {
        if let Some(invalid) = &resolution.invalid_field {
            warn!(
                filter = %rule.id(),
                tile = %resolution.tile_uuid,
                field = %invalid,
                "tile target references a field the tile no longer exposes"
            );
        }
    }
    debug!(filter = %rule.id(), tiles = resolutions.len(), "resolved tile targets");
    resolutions
}

fn resolve_field_tile(
    rule: &DashboardFilterRule,
    field: Option<&FilterableField>,
    tile: &Tile,
    fields: &[FilterableField],
) -> TileResolution {
    let (selected, invalid_field) = match rule.tile_target(&tile.uuid) {
        Some(TileTarget::Disabled) => (None, None),
        Some(TileTarget::Field(target)) => {
            match fields.iter().find(|f| f.id == target.field_id) {
                Some(found) => (Some(found.clone()), None),
                None => (None, Some(target.field_id.clone())),
            }
        }
        None => (
            field.and_then(|source| fields.iter().find(|f| f.matches_exact(source)).cloned()),
            None,
        ),
    };

    let is_available = field.is_some_and(|source| fields.iter().any(|f| f.matches_type(source)));

    let candidates: Vec<FilterableField> = match field {
        Some(source) => {
            let mut compatible: Vec<FilterableField> = fields
                .iter()
                .filter(|f| f.matches_type(source))
                .cloned()
                .collect();
            compatible.sort_by(|a, b| {
                compare_matches(source.matches_type_and_name(a), source.matches_type_and_name(b))
            });
            compatible.sort_by(|a, b| compare_matches(a.matches_exact(source), b.matches_exact(source)));
            compatible
        }
        None => fields.to_vec(),
    };

    TileResolution {
        tile_uuid: tile.uuid.clone(),
        tab_uuid: tile.tab_uuid.clone(),
        label: tile.label().to_string(),
        selected_field: selected.map(TileField::Field),
        invalid_field,
        is_available,
        candidates: candidates.into_iter().map(TileField::Field).collect(),
    }
}

// SQL chart columns carry no type: they never match by default and are
// always offered for manual selection.
fn resolve_column_tile(rule: &DashboardFilterRule, tile: &Tile, columns: &[String]) -> TileResolution {
    let (selected, invalid_field) = match rule.tile_target(&tile.uuid) {
        Some(TileTarget::Field(target)) => match columns.iter().find(|c| **c == target.field_id) {
            Some(column) => (Some(column.clone()), None),
            None => (None, Some(target.field_id.clone())),
        },
        Some(TileTarget::Disabled) | None => (None, None),
    };

    TileResolution {
        tile_uuid: tile.uuid.clone(),
        tab_uuid: tile.tab_uuid.clone(),
        label: tile.label().to_string(),
        selected_field: selected.map(|name| TileField::Column { name }),
        invalid_field,
        is_available: true,
        candidates: columns
            .iter()
            .map(|name| TileField::Column { name: name.clone() })
            .collect(),
    }
}

fn compare_matches(a: bool, b: bool) -> Ordering {
    match (a, b) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Apply a tile checkbox/field-select change to the rule
///
/// `Add(Some(target))` binds the tile to that field, `Add(None)` drops the
/// override so the default matching applies again, `Remove` disables the
/// filter for the tile.
pub fn apply_tile_action(
    rule: &DashboardFilterRule,
    tile_uuid: &str,
    action: TileAction,
) -> DashboardFilterRule {
    debug!(filter = %rule.id(), tile = %tile_uuid, ?action, "applying tile action");
    match action {
        TileAction::Add(Some(target)) => rule.with_tile_target(tile_uuid, Some(TileTarget::Field(target))),
        TileAction::Add(None) => rule.with_tile_target(tile_uuid, None),
        TileAction::Remove => rule.with_tile_target(tile_uuid, Some(TileTarget::Disabled)),
    }
}

/// Check or uncheck many tiles at once
pub fn toggle_all(rule: &DashboardFilterRule, checked: bool, tile_uuids: &[String]) -> DashboardFilterRule {
    let action = if checked { TileAction::Add(None) } else { TileAction::Remove };
    tile_uuids
        .iter()
        .fold(rule.clone(), |acc, uuid| apply_tile_action(&acc, uuid, action.clone()))
}

/// Whether all, none or some of the tiles are checked
pub fn selection_summary(resolutions: &[TileResolution]) -> SelectionState {
    let checked = resolutions.iter().filter(|r| r.is_checked()).count();
    if checked == resolutions.len() {
        SelectionState::All
    } else if checked == 0 {
        SelectionState::None
    } else {
        SelectionState::Partial(checked)
    }
}

/// Resolutions grouped by tab, in tab order
///
/// Tiles whose tab is not listed are left out.
pub fn by_tab<'a>(
    resolutions: &'a [TileResolution],
    tabs: &'a [DashboardTab],
) -> Vec<(&'a DashboardTab, Vec<&'a TileResolution>)> {
    tabs.iter()
        .map(|tab| {
            let tiles = resolutions
                .iter()
                .filter(|r| r.tab_uuid.as_deref() == Some(tab.uuid.as_str()))
                .collect();
            (tab, tiles)
        })
        .collect()
}

/// Toggle every tile of a tab the way the tab switch does
///
/// A fully or partly checked tab is unchecked, an unchecked tab is checked.
pub fn toggle_tab(
    rule: &DashboardFilterRule,
    resolutions: &[TileResolution],
    tab_uuid: &str,
) -> DashboardFilterRule {
    let in_tab: Vec<TileResolution> = resolutions
        .iter()
        .filter(|r| r.tab_uuid.as_deref() == Some(tab_uuid))
        .cloned()
        .collect();
    let uuids: Vec<String> = in_tab.iter().map(|r| r.tile_uuid.clone()).collect();
    let check = selection_summary(&in_tab) == SelectionState::None;
    toggle_all(rule, check, &uuids)
}
