//! Shared test utilities for integration tests

#![allow(dead_code)]

use semfilter::{parser, FilterDocument, FilterableField, TileResolution};

/// Load a test document from the test_data directory
pub fn load_test_data(name: &str) -> FilterDocument {
    let path = format!("test_data/{}", name);
    parser::parse_file(&path)
        .unwrap_or_else(|e| panic!("Failed to load test data {}: {}", name, e))
}

/// Look up a catalog field, panicking with a readable message
pub fn field<'a>(doc: &'a FilterDocument, id: &str) -> &'a FilterableField {
    doc.get_field(id)
        .unwrap_or_else(|| panic!("Field '{}' missing from test document", id))
}

// =============================================================================
// Resolution Inspection Utilities
// =============================================================================

/// Find the resolution for a tile
pub fn resolution<'a>(resolutions: &'a [TileResolution], tile_uuid: &str) -> &'a TileResolution {
    resolutions
        .iter()
        .find(|r| r.tile_uuid == tile_uuid)
        .unwrap_or_else(|| panic!("No resolution for tile '{}'", tile_uuid))
}

/// Selected field id for a tile, if the filter applies to it
pub fn selected_id<'a>(resolutions: &'a [TileResolution], tile_uuid: &str) -> Option<&'a str> {
    resolution(resolutions, tile_uuid)
        .selected_field
        .as_ref()
        .map(|f| f.id())
}

/// Tile uuids in resolution order
pub fn tile_order(resolutions: &[TileResolution]) -> Vec<&str> {
    resolutions.iter().map(|r| r.tile_uuid.as_str()).collect()
}
