//! Document parser (verb module)
//!
//! Transforms YAML or JSON files into filter documents, and filter trees
//! back into their persisted JSON form.

use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::config::EditorConfig;
use crate::dashboard::Dashboard;
use crate::editor::FilterTree;
use crate::error::ParseError;
use crate::field::{FilterableField, find_field};
use crate::filter::FilterGroup;

/// A field catalog with the filters defined over it
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterDocument {
    #[serde(default)]
    pub fields: Vec<FilterableField>,
    /// Explore-level filter tree; absent means no filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard: Option<Dashboard>,
    #[serde(default)]
    pub editor: EditorConfig,
}

impl FilterDocument {
    /// Get a catalog field by id
    pub fn get_field(&self, id: &str) -> Option<&FilterableField> {
        find_field(&self.fields, id)
    }

    /// The explore filters as an editable tree
    pub fn tree(&self) -> FilterTree {
        FilterTree::new(self.filters.clone(), self.editor.clone())
    }
}

/// Parse a document from a file
///
/// Files ending in `.json` are read as JSON, everything else as YAML.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<FilterDocument, ParseError> {
    let path_str = path.as_ref().display().to_string();
    let contents = std::fs::read_to_string(&path).map_err(|e| ParseError::Io {
        path: path_str,
        source: e,
    })?;
    let is_json = path
        .as_ref()
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        parse_json(&contents)
    } else {
        parse_str(&contents)
    }
}

/// Parse a document from a YAML string
pub fn parse_str(yaml: &str) -> Result<FilterDocument, ParseError> {
    serde_yaml::from_str(yaml).map_err(ParseError::from)
}

/// Parse a document from a JSON string
pub fn parse_json(json: &str) -> Result<FilterDocument, ParseError> {
    serde_json::from_str(json).map_err(ParseError::from)
}

/// Parse a single filter group from JSON (either persisted shape)
pub fn parse_group_json(json: &str) -> Result<FilterGroup, ParseError> {
    serde_json::from_str(json).map_err(ParseError::from)
}

/// Serialize a filter group to its persisted JSON form
pub fn group_to_json(group: &FilterGroup) -> Result<String, ParseError> {
    serde_json::to_string(group).map_err(ParseError::from)
}

/// Serialize a whole document as pretty JSON
pub fn document_to_json(document: &FilterDocument) -> Result<String, ParseError> {
    serde_json::to_string_pretty(document).map_err(ParseError::from)
}

/// Serialize a whole document as YAML
pub fn document_to_yaml(document: &FilterDocument) -> Result<String, ParseError> {
    serde_yaml::to_string(document).map_err(ParseError::from)
}
