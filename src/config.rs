//! Editor configuration
//!
//! Loaded from the `editor:` section of a filter document; every setting
//! has a default so the section may be omitted.

use serde::{Deserialize, Serialize};

/// Nesting depth below which rules may be converted into subgroups
pub const DEFAULT_MAX_SUBGROUP_DEPTH: usize = 2;

/// What `change_operator` does when switching AND to OR would mix field classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorChangePolicy {
    /// Refuse the change
    #[default]
    Reject,
    /// Apply the change; `validate` reports the mixed group
    Allow,
}

/// Settings for interactive tree edits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Groups at this depth or deeper (root = 0) cannot convert rules into subgroups
    #[serde(rename = "maxSubgroupDepth", default = "default_max_subgroup_depth")]
    pub max_subgroup_depth: usize,
    #[serde(rename = "operatorChange", default)]
    pub operator_change: OperatorChangePolicy,
}

fn default_max_subgroup_depth() -> usize {
    DEFAULT_MAX_SUBGROUP_DEPTH
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_subgroup_depth: DEFAULT_MAX_SUBGROUP_DEPTH,
            operator_change: OperatorChangePolicy::default(),
        }
    }
}
