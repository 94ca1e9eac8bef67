//! Dashboard filter rules and their per-tile targets

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use crate::editor::EditError;
use crate::field::FilterableField;
use crate::filter::FilterRule;

/// Concrete field a dashboard filter is bound to on one tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTarget {
    #[serde(rename = "fieldId")]
    pub field_id: String,
    #[serde(rename = "tableName")]
    pub table_name: String,
    /// Target is a raw column of a SQL chart tile
    #[serde(rename = "isSqlColumn", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_sql_column: bool,
}

impl FieldTarget {
    /// Target a typed field
    pub fn for_field(field: &FilterableField) -> Self {
        Self {
            field_id: field.id.clone(),
            table_name: field.table.clone(),
            is_sql_column: false,
        }
    }

    /// Target a SQL chart column
    ///
    /// SQL chart columns have no table; a placeholder keeps the persisted shape uniform.
    pub fn for_column(column: impl Into<String>) -> Self {
        Self {
            field_id: column.into(),
            table_name: SQL_COLUMN_TABLE.to_string(),
            is_sql_column: true,
        }
    }
}

/// Table name stored on SQL column targets
pub const SQL_COLUMN_TABLE: &str = "mock_table";

/// Per-tile override of a dashboard filter
///
/// Persisted as `false` for a disabled tile or as a field target object.
/// Tiles without an entry use the default field matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileTarget {
    /// Filter does not apply to the tile
    Disabled,
    /// Filter applies to the tile through this field
    Field(FieldTarget),
}

impl Serialize for TileTarget {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            TileTarget::Disabled => serializer.serialize_bool(false),
            TileTarget::Field(target) => target.serialize(serializer),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTileTarget {
    Flag(bool),
    Field(FieldTarget),
}

impl<'de> Deserialize<'de> for TileTarget {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawTileTarget::deserialize(deserializer)? {
            RawTileTarget::Flag(false) => Ok(TileTarget::Disabled),
            RawTileTarget::Flag(true) => Err(serde::de::Error::custom(
                "tile target must be `false` or a field target, not `true`",
            )),
            RawTileTarget::Field(target) => Ok(TileTarget::Field(target)),
        }
    }
}

/// A filter defined at dashboard level and propagated to tiles
///
/// `rule.target` names the filter's source field (with its table);
/// `tile_targets` holds the per-tile overrides keyed by tile uuid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardFilterRule {
    #[serde(flatten)]
    pub rule: FilterRule,
    #[serde(rename = "tileTargets", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tile_targets: BTreeMap<String, TileTarget>,
}

impl DashboardFilterRule {
    /// New dashboard filter on `field`, applied to tiles by default matching
    pub fn create_default(field: &FilterableField) -> Self {
        let mut rule = FilterRule::create_default(field);
        rule.target.table_name = Some(field.table.clone());
        Self {
            rule,
            tile_targets: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.rule.id
    }

    /// Override for a tile, if any
    pub fn tile_target(&self, tile_uuid: &str) -> Option<&TileTarget> {
        self.tile_targets.get(tile_uuid)
    }

    /// Apply a rule-level edit, keeping the tile targets
    pub fn map_rule<F>(self, f: F) -> Result<Self, EditError>
    where
        F: FnOnce(FilterRule) -> Result<FilterRule, EditError>,
    {
        Ok(Self {
            rule: f(self.rule)?,
            tile_targets: self.tile_targets,
        })
    }

    /// Copy with one tile override set (`None` removes it)
    pub fn with_tile_target(&self, tile_uuid: &str, target: Option<TileTarget>) -> Self {
        let mut tile_targets = self.tile_targets.clone();
        match target {
            Some(target) => {
                tile_targets.insert(tile_uuid.to_string(), target);
            }
            None => {
                tile_targets.remove(tile_uuid);
            }
        }
        Self {
            rule: self.rule.clone(),
            tile_targets,
        }
    }
}
