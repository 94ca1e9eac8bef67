//! Dashboard tiles and tabs

use serde::{Deserialize, Serialize};
use crate::field::FilterableField;

/// What a tile exposes for filtering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileFields {
    /// Typed fields of a chart built on a model
    Fields(Vec<FilterableField>),
    /// Untyped result columns of a SQL chart
    Columns(Vec<String>),
}

/// A chart or table panel placed on a dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub uuid: String,
    #[serde(rename = "tabUuid", default, skip_serializing_if = "Option::is_none")]
    pub tab_uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "chartName", default, skip_serializing_if = "Option::is_none")]
    pub chart_name: Option<String>,
    #[serde(flatten)]
    pub source: TileFields,
}

impl Tile {
    /// Title if set and non-empty, otherwise the chart name
    pub fn label(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => self.chart_name.as_deref().unwrap_or(""),
        }
    }

    /// Whether this is a SQL chart tile exposing raw columns
    pub fn is_sql_chart(&self) -> bool {
        matches!(self.source, TileFields::Columns(_))
    }
}

/// A dashboard tab grouping tiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardTab {
    pub uuid: String,
    pub name: String,
}
