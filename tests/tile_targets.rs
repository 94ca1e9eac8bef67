//! Integration tests for dashboard filter tile targeting
//!
//! Tests that a dashboard filter resolves to the right field on each tile.

mod common;

use common::{field, load_test_data, resolution, selected_id, tile_order};
use semfilter::targets::{apply_tile_action, by_tab, selection_summary, toggle_all, toggle_tab};
use semfilter::{resolve_tile_targets, FieldTarget, SelectionState, TileAction, TileTarget};

#[test]
fn test_explicit_default_and_disabled_targets() {
    let doc = load_test_data("orders_dashboard.yaml");
    let dashboard = doc.dashboard.as_ref().unwrap();
    let filter = dashboard.get_filter("status-filter").unwrap();
    let source = field(&doc, "orders_order_status");

    let resolved = resolve_tile_targets(filter, Some(source), &dashboard.tiles);

    // A: explicit target
    assert_eq!(selected_id(&resolved, "A"), Some("orders_order_status"));
    // B: no entry, default exact match
    assert_eq!(selected_id(&resolved, "B"), Some("orders_order_status"));
    // C: explicitly disabled
    assert_eq!(selected_id(&resolved, "C"), None);
    assert!(resolution(&resolved, "C").invalid_field.is_none());
    assert!(resolution(&resolved, "C").is_available);
}

#[test]
fn test_stale_target_is_reported_not_fatal() {
    let doc = load_test_data("orders_dashboard.yaml");
    let dashboard = doc.dashboard.as_ref().unwrap();
    let filter = dashboard.get_filter("status-filter").unwrap();
    let source = field(&doc, "orders_order_status");

    let resolved = resolve_tile_targets(filter, Some(source), &dashboard.tiles);

    let d = resolution(&resolved, "D");
    assert_eq!(d.invalid_field.as_deref(), Some("deleted_field"));
    assert!(d.selected_field.is_none());
    // D still exposes a string field, so it can be re-targeted manually
    assert!(d.is_available);
    assert_eq!(d.candidates.len(), 1);
    assert_eq!(resolved.len(), dashboard.tiles.len());
}

#[test]
fn test_tile_order_and_sql_tiles() {
    let doc = load_test_data("orders_dashboard.yaml");
    let dashboard = doc.dashboard.as_ref().unwrap();
    let filter = dashboard.get_filter("status-filter").unwrap();
    let source = field(&doc, "orders_order_status");

    let resolved = resolve_tile_targets(filter, Some(source), &dashboard.tiles);

    // exact matches first, then type-and-name (D), SQL tiles last
    assert_eq!(tile_order(&resolved), vec!["A", "B", "C", "D", "S"]);
    let sql = resolution(&resolved, "S");
    assert!(sql.is_available);
    assert!(sql.selected_field.is_none());
    assert_eq!(sql.label, "Raw orders");
}

#[test]
fn test_retarget_stale_tile() {
    let doc = load_test_data("orders_dashboard.yaml");
    let dashboard = doc.dashboard.as_ref().unwrap();
    let filter = dashboard.get_filter("status-filter").unwrap();
    let source = field(&doc, "orders_order_status");
    let returns_status = match &dashboard.get_tile("D").unwrap().source {
        semfilter::TileFields::Fields(fields) => fields[0].clone(),
        semfilter::TileFields::Columns(_) => panic!("D should be a field tile"),
    };

    let fixed = apply_tile_action(filter, "D", TileAction::Add(Some(FieldTarget::for_field(&returns_status))));
    let resolved = resolve_tile_targets(&fixed, Some(source), &dashboard.tiles);
    assert_eq!(selected_id(&resolved, "D"), Some("returns_order_status"));
    assert!(resolution(&resolved, "D").invalid_field.is_none());

    let sql = apply_tile_action(&fixed, "S", TileAction::Add(Some(FieldTarget::for_column("status"))));
    let resolved = resolve_tile_targets(&sql, Some(source), &dashboard.tiles);
    assert_eq!(selected_id(&resolved, "S"), Some("status"));
}

#[test]
fn test_toggle_all_and_tabs() {
    let doc = load_test_data("orders_dashboard.yaml");
    let dashboard = doc.dashboard.as_ref().unwrap();
    let filter = dashboard.get_filter("status-filter").unwrap();
    let source = field(&doc, "orders_order_status");

    let resolved = resolve_tile_targets(filter, Some(source), &dashboard.tiles);
    assert_eq!(selection_summary(&resolved), SelectionState::Partial(2));

    let tabs = by_tab(&resolved, &dashboard.tabs);
    assert_eq!(tabs[0].0.name, "Overview");
    assert_eq!(selection_summary(&tabs[0].1.iter().map(|r| (*r).clone()).collect::<Vec<_>>()), SelectionState::All);

    // Details has nothing checked, so its switch turns the tiles on
    let toggled = toggle_tab(filter, &resolved, "details");
    assert!(toggled.tile_target("C").is_none());
    assert!(toggled.tile_target("D").is_none());
    let resolved = resolve_tile_targets(&toggled, Some(source), &dashboard.tiles);
    assert_eq!(selected_id(&resolved, "C"), Some("orders_order_status"));

    let uuids: Vec<String> = dashboard.tiles.iter().map(|t| t.uuid.clone()).collect();
    let off = toggle_all(filter, false, &uuids);
    assert!(off.tile_targets.values().all(|t| *t == TileTarget::Disabled));
    let resolved = resolve_tile_targets(&off, Some(source), &dashboard.tiles);
    assert_eq!(selection_summary(&resolved), SelectionState::None);
}

#[test]
fn test_resolution_is_repeatable() {
    let doc = load_test_data("orders_dashboard.yaml");
    let dashboard = doc.dashboard.as_ref().unwrap();
    let filter = dashboard.get_filter("status-filter").unwrap();
    let source = field(&doc, "orders_order_status");

    let first = resolve_tile_targets(filter, Some(source), &dashboard.tiles);
    let second = resolve_tile_targets(filter, Some(source), &dashboard.tiles);
    assert_eq!(first, second);
}
