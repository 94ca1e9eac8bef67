//! Filter groups (tree nodes)
//!
//! Groups are persisted as `{id, operator, items}` with items tagged by
//! `kind`. Documents written with the keyed form (`{id, and: [...]}` or
//! `{id, or: [...]}`, items told apart by the presence of `target`) are
//! accepted on load and normalized.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;
use super::rule::FilterRule;

/// Boolean combinator of a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupOperator {
    And,
    Or,
}

impl GroupOperator {
    /// AND for OR, OR for AND
    pub fn opposite(&self) -> Self {
        match self {
            GroupOperator::And => GroupOperator::Or,
            GroupOperator::Or => GroupOperator::And,
        }
    }
}

impl fmt::Display for GroupOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupOperator::And => write!(f, "and"),
            GroupOperator::Or => write!(f, "or"),
        }
    }
}

/// A child of a group: a rule or a nested group
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FilterItem {
    Rule(FilterRule),
    Group(FilterGroup),
}

impl FilterItem {
    pub fn id(&self) -> &str {
        match self {
            FilterItem::Rule(rule) => &rule.id,
            FilterItem::Group(group) => &group.id,
        }
    }

    pub fn as_rule(&self) -> Option<&FilterRule> {
        match self {
            FilterItem::Rule(rule) => Some(rule),
            FilterItem::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&FilterGroup> {
        match self {
            FilterItem::Group(group) => Some(group),
            FilterItem::Rule(_) => None,
        }
    }
}

impl From<FilterRule> for FilterItem {
    fn from(rule: FilterRule) -> Self {
        FilterItem::Rule(rule)
    }
}

impl From<FilterGroup> for FilterItem {
    fn from(group: FilterGroup) -> Self {
        FilterItem::Group(group)
    }
}

// Items are read through a JSON value so both the tagged and the keyed
// document shapes can be recognized.
impl<'de> Deserialize<'de> for FilterItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let kind = match value.get("kind").and_then(Value::as_str) {
            Some(kind) => kind.to_string(),
            None if value.get("target").is_some() => "rule".to_string(),
            None => "group".to_string(),
        };
        match kind.as_str() {
            "rule" => serde_json::from_value(value)
                .map(FilterItem::Rule)
                .map_err(de::Error::custom),
            "group" => serde_json::from_value(value)
                .map(FilterItem::Group)
                .map_err(de::Error::custom),
            other => Err(de::Error::custom(format!(
                "unknown filter item kind '{}', expected 'rule' or 'group'",
                other
            ))),
        }
    }
}

/// A node combining rules and nested groups under AND or OR
///
/// A well-formed group holds at least one item. Removing the last item
/// deletes the group (see [`crate::editor::remove_item`]).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterGroup {
    pub id: String,
    pub operator: GroupOperator,
    pub items: Vec<FilterItem>,
}

#[derive(Deserialize)]
struct RawGroup {
    id: String,
    operator: Option<GroupOperator>,
    items: Option<Vec<FilterItem>>,
    and: Option<Vec<FilterItem>>,
    or: Option<Vec<FilterItem>>,
}

impl<'de> Deserialize<'de> for FilterGroup {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawGroup::deserialize(deserializer)?;
        let (operator, items) = match (raw.operator, raw.items, raw.and, raw.or) {
            (Some(op), Some(items), None, None) => (op, items),
            (None, None, Some(items), None) => (GroupOperator::And, items),
            (None, None, None, Some(items)) => (GroupOperator::Or, items),
            _ => {
                return Err(de::Error::custom(format!(
                    "group '{}' must have either 'operator' and 'items', or exactly one of 'and'/'or'",
                    raw.id
                )))
            }
        };
        Ok(FilterGroup {
            id: raw.id,
            operator,
            items,
        })
    }
}

impl FilterGroup {
    /// Create a group with a fresh id
    pub fn new(operator: GroupOperator, items: Vec<FilterItem>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            operator,
            items,
        }
    }

    pub fn is_and(&self) -> bool {
        self.operator == GroupOperator::And
    }

    pub fn is_or(&self) -> bool {
        self.operator == GroupOperator::Or
    }

    /// Rules directly contained in this group
    pub fn rules(&self) -> impl Iterator<Item = &FilterRule> {
        self.items.iter().filter_map(FilterItem::as_rule)
    }

    /// Groups directly contained in this group
    pub fn subgroups(&self) -> impl Iterator<Item = &FilterGroup> {
        self.items.iter().filter_map(FilterItem::as_group)
    }

    /// All rules in the subtree, depth first
    pub fn all_rules(&self) -> Vec<&FilterRule> {
        let mut rules = Vec::new();
        collect_rules(self, &mut rules);
        rules
    }

    /// Number of group levels below this one (0 for a group of rules)
    pub fn depth(&self) -> usize {
        self.subgroups().map(|g| g.depth() + 1).max().unwrap_or(0)
    }

    /// Find a rule anywhere in the subtree
    pub fn find_rule(&self, id: &str) -> Option<&FilterRule> {
        self.all_rules().into_iter().find(|r| r.id == id)
    }

    /// Index path from this group to the item with `id`
    pub fn path_of(&self, id: &str) -> Option<Vec<usize>> {
        for (index, item) in self.items.iter().enumerate() {
            if item.id() == id {
                return Some(vec![index]);
            }
            if let FilterItem::Group(group) = item {
                if let Some(mut rest) = group.path_of(id) {
                    rest.insert(0, index);
                    return Some(rest);
                }
            }
        }
        None
    }
}

fn collect_rules<'a>(group: &'a FilterGroup, out: &mut Vec<&'a FilterRule>) {
    for item in &group.items {
        match item {
            FilterItem::Rule(rule) => out.push(rule),
            FilterItem::Group(sub) => collect_rules(sub, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldClass, FilterType, FilterableField};

    fn rule(id: &str, field: &str) -> FilterRule {
        let f = FilterableField::new(field, field, "orders", FilterType::String, FieldClass::Dimension);
        FilterRule {
            id: id.to_string(),
            ..FilterRule::create_default(&f)
        }
    }

    fn sample() -> FilterGroup {
        FilterGroup {
            id: "root".into(),
            operator: GroupOperator::And,
            items: vec![
                rule("r1", "orders_status").into(),
                FilterGroup {
                    id: "g1".into(),
                    operator: GroupOperator::Or,
                    items: vec![rule("r2", "orders_city").into(), rule("r3", "orders_country").into()],
                }
                .into(),
            ],
        }
    }

    #[test]
    fn test_canonical_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["operator"], "and");
        assert_eq!(json["items"][0]["kind"], "rule");
        assert_eq!(json["items"][1]["kind"], "group");
        assert_eq!(json["items"][1]["operator"], "or");
        assert_eq!(json["items"][0]["target"]["fieldId"], "orders_status");
    }

    #[test]
    fn test_json_round_trip() {
        let group = sample();
        let json = serde_json::to_string(&group).unwrap();
        let parsed: FilterGroup = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, group);
    }

    #[test]
    fn test_keyed_shape_is_accepted() {
        let json = r#"{
            "id": "root",
            "and": [
                {"id": "r1", "target": {"fieldId": "orders_status"}, "operator": "equals", "values": ["shipped"]},
                {"id": "g1", "or": [
                    {"id": "r2", "target": {"fieldId": "orders_city"}, "operator": "isNull"}
                ]}
            ]
        }"#;
        let group: FilterGroup = serde_json::from_str(json).unwrap();
        assert!(group.is_and());
        assert_eq!(group.items.len(), 2);
        let nested = group.items[1].as_group().unwrap();
        assert!(nested.is_or());
        assert_eq!(nested.items[0].as_rule().unwrap().values.len(), 0);
    }

    #[test]
    fn test_ambiguous_shape_is_rejected() {
        let json = r#"{"id": "g", "and": [], "or": []}"#;
        assert!(serde_json::from_str::<FilterGroup>(json).is_err());
        let json = r#"{"id": "g", "operator": "and"}"#;
        assert!(serde_json::from_str::<FilterGroup>(json).is_err());
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let json = r#"{"id": "g", "operator": "and", "items": [{"kind": "note", "id": "x"}]}"#;
        assert!(serde_json::from_str::<FilterGroup>(json).is_err());
    }

    #[test]
    fn test_traversal_helpers() {
        let group = sample();
        assert_eq!(group.depth(), 1);
        assert_eq!(group.all_rules().len(), 3);
        assert_eq!(group.rules().count(), 1);
        assert_eq!(group.path_of("r3"), Some(vec![1, 1]));
        assert_eq!(group.path_of("g1"), Some(vec![1]));
        assert!(group.path_of("missing").is_none());
        assert_eq!(group.find_rule("r2").unwrap().field_id(), "orders_city");
    }

    #[test]
    fn test_opposite_operator() {
        assert_eq!(GroupOperator::And.opposite(), GroupOperator::Or);
        assert_eq!(GroupOperator::Or.opposite(), GroupOperator::And);
    }
}
