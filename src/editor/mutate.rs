//! Single-group mutations
//!
//! Each function takes a group by reference and returns a new group; the
//! input is never modified.

use tracing::debug;
use crate::availability::direct_field_classes;
use crate::config::{EditorConfig, OperatorChangePolicy};
use crate::field::FilterableField;
use crate::filter::{FilterGroup, FilterItem, FilterRule, GroupOperator};
use super::error::EditError;

/// Outcome of an edit that may empty a group
#[derive(Debug, Clone, PartialEq)]
pub enum GroupEdit {
    /// The group still has items
    Updated(FilterGroup),
    /// The group lost its last item and must be removed from its parent
    Deleted,
}

impl GroupEdit {
    /// The surviving group, if any
    pub fn into_group(self) -> Option<FilterGroup> {
        match self {
            GroupEdit::Updated(group) => Some(group),
            GroupEdit::Deleted => None,
        }
    }
}

/// Append a default rule for `field`
///
/// `available` is the field set computed for this group (see
/// [`crate::availability`]); fields outside it are refused.
pub fn add_rule(
    group: &FilterGroup,
    field: &FilterableField,
    available: &[FilterableField],
) -> Result<FilterGroup, EditError> {
    if !available.iter().any(|f| f.id == field.id) {
        return Err(EditError::FieldNotAvailable(field.id.clone()));
    }
    let rule = FilterRule::create_default(field);
    debug!(group = %group.id, rule = %rule.id, field = %field.id, "adding rule");
    let mut items = group.items.clone();
    items.push(FilterItem::Rule(rule));
    Ok(FilterGroup {
        items,
        ..group.clone()
    })
}

/// Remove the item at `index`, deleting the group when it was the last one
pub fn remove_item(group: &FilterGroup, index: usize) -> Result<GroupEdit, EditError> {
    check_index(group, index)?;
    if group.items.len() == 1 {
        debug!(group = %group.id, "last item removed, deleting group");
        return Ok(GroupEdit::Deleted);
    }
    debug!(group = %group.id, index, "removing item");
    let mut items = group.items.clone();
    items.remove(index);
    Ok(GroupEdit::Updated(FilterGroup {
        items,
        ..group.clone()
    }))
}

/// Replace the item at `index`
///
/// Structural only: no field availability check. Use [`replace_rule`] for
/// edits that may change the field a rule targets.
pub fn replace_item(
    group: &FilterGroup,
    index: usize,
    item: FilterItem,
) -> Result<FilterGroup, EditError> {
    check_index(group, index)?;
    let mut items = group.items.clone();
    items[index] = item;
    Ok(FilterGroup {
        items,
        ..group.clone()
    })
}

/// Replace the rule at `index` with `rule`
///
/// `available` is the field set the slot may hold (see
/// [`crate::availability::available_fields_for_item`]); a rule on any other
/// field is refused so an OR group never ends up mixing field classes.
pub fn replace_rule(
    group: &FilterGroup,
    index: usize,
    rule: FilterRule,
    available: &[FilterableField],
) -> Result<FilterGroup, EditError> {
    check_index(group, index)?;
    if !available.iter().any(|f| f.id == rule.field_id()) {
        return Err(EditError::FieldNotAvailable(rule.field_id().to_string()));
    }
    debug!(group = %group.id, rule = %rule.id, field = %rule.field_id(), "replacing rule");
    replace_item(group, index, FilterItem::Rule(rule))
}

/// Whether a group at `depth` (root = 0) may convert items into subgroups
pub fn can_convert_to_subgroup(depth: usize, config: &EditorConfig) -> bool {
    depth < config.max_subgroup_depth
}

/// Wrap the rule at `index` in a new group with the opposite operator
///
/// `depth` is the nesting depth of `group` (root = 0). Groups cannot be
/// wrapped: their subtree would move one level deeper.
pub fn convert_to_subgroup(
    group: &FilterGroup,
    index: usize,
    depth: usize,
    config: &EditorConfig,
) -> Result<FilterGroup, EditError> {
    if !can_convert_to_subgroup(depth, config) {
        return Err(EditError::DepthLimitReached {
            depth,
            limit: config.max_subgroup_depth,
        });
    }
    check_index(group, index)?;
    if let FilterItem::Group(nested) = &group.items[index] {
        return Err(EditError::GroupNotConvertible(nested.id.clone()));
    }
    let wrapped = FilterGroup::new(group.operator.opposite(), vec![group.items[index].clone()]);
    debug!(group = %group.id, subgroup = %wrapped.id, index, "converting item to subgroup");
    replace_item(group, index, FilterItem::Group(wrapped))
}

/// Switch the group between AND and OR
///
/// Id and items are kept. Switching to OR when the direct rules span more
/// than one field class follows `config.operator_change`.
pub fn change_operator(
    group: &FilterGroup,
    operator: GroupOperator,
    all_fields: &[FilterableField],
    config: &EditorConfig,
) -> Result<FilterGroup, EditError> {
    if operator == GroupOperator::Or && group.is_and() {
        let classes = direct_field_classes(group, all_fields);
        if classes.len() > 1 {
            match config.operator_change {
                OperatorChangePolicy::Reject => {
                    return Err(EditError::MixedFieldClasses {
                        group_id: group.id.clone(),
                        classes,
                    });
                }
                OperatorChangePolicy::Allow => {
                    debug!(group = %group.id, ?classes, "allowing OR group with mixed field classes");
                }
            }
        }
    }
    debug!(group = %group.id, %operator, "changing group operator");
    Ok(FilterGroup {
        operator,
        ..group.clone()
    })
}

fn check_index(group: &FilterGroup, index: usize) -> Result<(), EditError> {
    if index >= group.items.len() {
        return Err(EditError::IndexOutOfBounds {
            index,
            len: group.items.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldClass, FilterType, find_field};

    fn catalog() -> Vec<FilterableField> {
        vec![
            FilterableField::new("orders_status", "status", "orders", FilterType::String, FieldClass::Dimension),
            FilterableField::new("orders_total", "total", "orders", FilterType::Number, FieldClass::Metric),
        ]
    }

    fn rule(field_id: &str) -> FilterItem {
        FilterRule::create_default(find_field(&catalog(), field_id).unwrap()).into()
    }

    #[test]
    fn test_add_rule_appends_default() {
        let fields = catalog();
        let group = FilterGroup::new(GroupOperator::And, vec![rule("orders_status")]);
        let updated = add_rule(&group, &fields[1], &fields).unwrap();
        assert_eq!(updated.id, group.id);
        assert_eq!(updated.items.len(), 2);
        assert_eq!(updated.items[1].as_rule().unwrap().field_id(), "orders_total");
        assert_eq!(group.items.len(), 1);
    }

    #[test]
    fn test_add_rule_refuses_unavailable_field() {
        let fields = catalog();
        let group = FilterGroup::new(GroupOperator::Or, vec![rule("orders_status")]);
        let err = add_rule(&group, &fields[1], &fields[..1]).unwrap_err();
        assert_eq!(err, EditError::FieldNotAvailable("orders_total".into()));
    }

    #[test]
    fn test_remove_last_item_deletes_group() {
        let group = FilterGroup::new(GroupOperator::And, vec![rule("orders_status")]);
        assert_eq!(remove_item(&group, 0).unwrap(), GroupEdit::Deleted);
    }

    #[test]
    fn test_remove_item_keeps_others() {
        let group = FilterGroup::new(GroupOperator::And, vec![rule("orders_status"), rule("orders_total")]);
        let kept_id = group.items[1].id().to_string();
        let updated = remove_item(&group, 0).unwrap().into_group().unwrap();
        assert_eq!(updated.items.len(), 1);
        assert_eq!(updated.items[0].id(), kept_id);
    }

    #[test]
    fn test_index_out_of_bounds() {
        let group = FilterGroup::new(GroupOperator::And, vec![rule("orders_status")]);
        assert_eq!(
            remove_item(&group, 3).unwrap_err(),
            EditError::IndexOutOfBounds { index: 3, len: 1 }
        );
        assert!(replace_item(&group, 1, rule("orders_total")).is_err());
    }

    #[test]
    fn test_convert_uses_opposite_operator() {
        let config = EditorConfig::default();
        let group = FilterGroup::new(GroupOperator::And, vec![rule("orders_status")]);
        let original = group.items[0].clone();
        let converted = convert_to_subgroup(&group, 0, 0, &config).unwrap();
        let sub = converted.items[0].as_group().unwrap();
        assert!(sub.is_or());
        assert_eq!(sub.items, vec![original]);

        let group = FilterGroup::new(GroupOperator::Or, vec![rule("orders_status")]);
        let converted = convert_to_subgroup(&group, 0, 1, &config).unwrap();
        assert!(converted.items[0].as_group().unwrap().is_and());
    }

    #[test]
    fn test_convert_refused_at_depth_limit() {
        let config = EditorConfig::default();
        let group = FilterGroup::new(GroupOperator::And, vec![rule("orders_status")]);
        assert!(can_convert_to_subgroup(1, &config));
        assert!(!can_convert_to_subgroup(2, &config));
        assert_eq!(
            convert_to_subgroup(&group, 0, 2, &config).unwrap_err(),
            EditError::DepthLimitReached { depth: 2, limit: 2 }
        );

        let deeper = EditorConfig {
            max_subgroup_depth: 3,
            ..EditorConfig::default()
        };
        assert!(convert_to_subgroup(&group, 0, 2, &deeper).is_ok());
    }

    #[test]
    fn test_convert_refuses_groups() {
        let config = EditorConfig::default();
        let nested = FilterGroup::new(GroupOperator::Or, vec![rule("orders_status")]);
        let nested_id = nested.id.clone();
        let group = FilterGroup::new(GroupOperator::And, vec![nested.into()]);
        assert_eq!(
            convert_to_subgroup(&group, 0, 0, &config).unwrap_err(),
            EditError::GroupNotConvertible(nested_id)
        );
    }

    #[test]
    fn test_replace_rule_checks_availability() {
        let fields = catalog();
        let group = FilterGroup::new(GroupOperator::Or, vec![rule("orders_total")]);
        let dimension = FilterRule::create_default(&fields[0]);
        let err = replace_rule(&group, 0, dimension, &fields[1..]).unwrap_err();
        assert_eq!(err, EditError::FieldNotAvailable("orders_status".into()));

        let metric = FilterRule::create_default(&fields[1]);
        let metric_id = metric.id.clone();
        let updated = replace_rule(&group, 0, metric, &fields[1..]).unwrap();
        assert_eq!(updated.items[0].id(), metric_id);
    }

    #[test]
    fn test_change_operator_preserves_identity() {
        let config = EditorConfig::default();
        let group = FilterGroup::new(GroupOperator::Or, vec![rule("orders_status"), rule("orders_status")]);
        let flipped = change_operator(&group, GroupOperator::And, &catalog(), &config).unwrap();
        assert_eq!(flipped.id, group.id);
        assert_eq!(flipped.items, group.items);
        assert!(flipped.is_and());
    }

    #[test]
    fn test_change_to_or_with_mixed_classes() {
        let group = FilterGroup::new(GroupOperator::And, vec![rule("orders_status"), rule("orders_total")]);
        let err = change_operator(&group, GroupOperator::Or, &catalog(), &EditorConfig::default()).unwrap_err();
        assert!(matches!(err, EditError::MixedFieldClasses { ref classes, .. } if classes.len() == 2));

        let allow = EditorConfig {
            operator_change: OperatorChangePolicy::Allow,
            ..EditorConfig::default()
        };
        let flipped = change_operator(&group, GroupOperator::Or, &catalog(), &allow).unwrap();
        assert!(flipped.is_or());
    }
}
