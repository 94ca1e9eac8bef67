use std::collections::HashSet;
use std::fmt;
use crate::availability::direct_field_classes;
use crate::config::EditorConfig;
use crate::field::{FieldClass, FilterableField, find_field};
use crate::filter::{FilterGroup, FilterItem, FilterRule};

/// A broken invariant found in a filter tree
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Group without items
    EmptyGroup { group_id: String },
    /// OR group whose direct rules span several field classes
    MixedOrGroup { group_id: String, classes: Vec<FieldClass> },
    /// Values present for a null check, or missing for any other operator
    InconsistentValues { rule_id: String },
    /// Rule both required and disabled
    RequiredAndDisabled { rule_id: String },
    /// Rule targets a field missing from the catalog
    UnknownField { rule_id: String, field_id: String },
    /// Operator not offered for the field type
    UnsupportedOperator { rule_id: String, field_id: String },
    /// Group nested deeper than subgroup conversion could have produced
    TooDeep { group_id: String, depth: usize },
    /// Two items share an id
    DuplicateId { id: String },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::EmptyGroup { group_id } => write!(f, "Group '{}' has no items", group_id),
            Violation::MixedOrGroup { group_id, classes } => {
                let names: Vec<&str> = classes.iter().map(|c| c.label()).collect();
                write!(f, "OR group '{}' mixes {}", group_id, names.join(", "))
            }
            Violation::InconsistentValues { rule_id } => {
                write!(f, "Rule '{}' has values that do not fit its operator", rule_id)
            }
            Violation::RequiredAndDisabled { rule_id } => {
                write!(f, "Rule '{}' is both required and disabled", rule_id)
            }
            Violation::UnknownField { rule_id, field_id } => {
                write!(f, "Rule '{}' targets unknown field '{}'", rule_id, field_id)
            }
            Violation::UnsupportedOperator { rule_id, field_id } => write!(
                f,
                "Rule '{}' uses an operator not supported by field '{}'",
                rule_id, field_id
            ),
            Violation::TooDeep { group_id, depth } => {
                write!(f, "Group '{}' is nested {} levels deep", group_id, depth)
            }
            Violation::DuplicateId { id } => write!(f, "Id '{}' is used more than once", id),
        }
    }
}

/// Check a tree against the editing invariants
///
/// Groups may sit at most `config.max_subgroup_depth` levels below the root,
/// the deepest level subgroup conversion can reach.
pub fn validate(
    root: &FilterGroup,
    all_fields: &[FilterableField],
    config: &EditorConfig,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut seen = HashSet::new();
    seen.insert(root.id.clone());
    check_group(root, 0, all_fields, config, &mut seen, &mut violations);
    violations
}

fn check_group(
    group: &FilterGroup,
    depth: usize,
    all_fields: &[FilterableField],
    config: &EditorConfig,
    seen: &mut HashSet<String>,
    violations: &mut Vec<Violation>,
) {
    if group.items.is_empty() {
        violations.push(Violation::EmptyGroup {
            group_id: group.id.clone(),
        });
    }
    if depth > config.max_subgroup_depth {
        violations.push(Violation::TooDeep {
            group_id: group.id.clone(),
            depth,
        });
    }
    if group.is_or() {
        let classes = direct_field_classes(group, all_fields);
        if classes.len() > 1 {
            violations.push(Violation::MixedOrGroup {
                group_id: group.id.clone(),
                classes,
            });
        }
    }

    for item in &group.items {
        if !seen.insert(item.id().to_string()) {
            violations.push(Violation::DuplicateId {
                id: item.id().to_string(),
            });
        }
        match item {
            FilterItem::Rule(rule) => check_rule(rule, all_fields, violations),
            FilterItem::Group(sub) => check_group(sub, depth + 1, all_fields, config, seen, violations),
        }
    }
}

fn check_rule(rule: &FilterRule, all_fields: &[FilterableField], violations: &mut Vec<Violation>) {
    if !rule.has_consistent_values() {
        violations.push(Violation::InconsistentValues {
            rule_id: rule.id.clone(),
        });
    }
    if rule.required && rule.disabled {
        violations.push(Violation::RequiredAndDisabled {
            rule_id: rule.id.clone(),
        });
    }
    match find_field(all_fields, rule.field_id()) {
        None => violations.push(Violation::UnknownField {
            rule_id: rule.id.clone(),
            field_id: rule.field_id().to_string(),
        }),
        Some(field) if !rule.operator.accepts(field.filter_type) => {
            violations.push(Violation::UnsupportedOperator {
                rule_id: rule.id.clone(),
                field_id: field.id.clone(),
            })
        }
        Some(_) => {}
    }
}
