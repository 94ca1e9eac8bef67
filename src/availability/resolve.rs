use std::collections::BTreeSet;
use crate::field::{FieldClass, FilterableField, fields_of_class, find_field};
use crate::filter::FilterGroup;

/// Field classes referenced by the rules directly inside `group`
///
/// Nested groups are not descended into. Rules pointing at fields missing
/// from the catalog are skipped.
pub fn direct_field_classes(group: &FilterGroup, all_fields: &[FilterableField]) -> Vec<FieldClass> {
    let classes: BTreeSet<FieldClass> = group
        .rules()
        .filter_map(|rule| find_field(all_fields, rule.field_id()))
        .map(|field| field.field_class)
        .collect();
    classes.into_iter().collect()
}

/// The class an OR group is pinned to, if any
///
/// Returns `None` for AND groups and for OR groups with no direct rules yet.
/// When an OR group is (invalidly) mixed, dimensions win over metrics and
/// metrics over table calculations.
pub fn group_field_class(group: &FilterGroup, all_fields: &[FilterableField]) -> Option<FieldClass> {
    if group.is_and() {
        return None;
    }
    direct_field_classes(group, all_fields).into_iter().next()
}

/// Fields a new rule in `group` may target
pub fn available_fields(group: &FilterGroup, all_fields: &[FilterableField]) -> Vec<FilterableField> {
    match group_field_class(group, all_fields) {
        Some(class) => fields_of_class(all_fields, class),
        None => ordered_by_class(all_fields),
    }
}

/// Fields available in the group at `group_path` below `root`
///
/// Each nested group only sees what its parent offered, so a group inside
/// a metric-only OR group is limited to metrics too. Returns `None` when the
/// path does not lead to a group.
pub fn available_fields_at(
    root: &FilterGroup,
    group_path: &[usize],
    all_fields: &[FilterableField],
) -> Option<Vec<FilterableField>> {
    let mut group = root;
    let mut fields = available_fields(root, all_fields);
    for &index in group_path {
        group = group.items.get(index)?.as_group()?;
        fields = available_fields(group, &fields);
    }
    Some(fields)
}

/// Fields the item at `item_path` may be switched to
///
/// Like [`available_fields_at`] for the item's parent group, but computed as
/// if the item were not there: the last rule of an OR group may move to any
/// class its parent offers. Returns `None` when the path leads nowhere.
pub fn available_fields_for_item(
    root: &FilterGroup,
    item_path: &[usize],
    all_fields: &[FilterableField],
) -> Option<Vec<FilterableField>> {
    let (&index, parent_path) = item_path.split_last()?;
    let mut group = root;
    let mut offered = all_fields.to_vec();
    for &i in parent_path {
        offered = available_fields(group, &offered);
        group = group.items.get(i)?.as_group()?;
    }
    group.items.get(index)?;

    let mut siblings = group.clone();
    siblings.items.remove(index);
    Some(available_fields(&siblings, &offered))
}

// Dimensions first, then metrics, then table calculations
fn ordered_by_class(all_fields: &[FilterableField]) -> Vec<FilterableField> {
    FieldClass::ALL
        .iter()
        .flat_map(|class| fields_of_class(all_fields, *class))
        .collect()
}
