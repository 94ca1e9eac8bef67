//! Path-addressed edits over a whole filter tree
//!
//! Items are addressed by their index path from the root group. Removing
//! the last item of a group deletes that group from its parent, repeating
//! up to the root; an empty root means "no filter".

use serde::{Deserialize, Serialize};
use crate::availability::{available_fields, available_fields_at, available_fields_for_item};
use crate::config::EditorConfig;
use crate::field::{FilterableField, find_field};
use crate::filter::{FilterGroup, FilterItem, FilterOperator, FilterRule, GroupOperator};
use super::error::EditError;
use super::mutate::{self, GroupEdit};

/// A filter tree and the settings its edits obey
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterTree {
    pub root: Option<FilterGroup>,
    #[serde(default)]
    pub config: EditorConfig,
}

impl FilterTree {
    pub fn new(root: Option<FilterGroup>, config: EditorConfig) -> Self {
        Self { root, config }
    }

    /// True when there is no filter at all
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Item at `path`
    pub fn get(&self, path: &[usize]) -> Option<&FilterItem> {
        let (last, parents) = path.split_last()?;
        let mut group = self.root.as_ref()?;
        for &index in parents {
            group = group.items.get(index)?.as_group()?;
        }
        group.items.get(*last)
    }

    /// Group at `path` (empty path = root)
    pub fn group_at(&self, path: &[usize]) -> Option<&FilterGroup> {
        if path.is_empty() {
            return self.root.as_ref();
        }
        self.get(path)?.as_group()
    }

    /// Fields a new rule in the group at `group_path` may target
    pub fn available_fields_at(
        &self,
        group_path: &[usize],
        all_fields: &[FilterableField],
    ) -> Option<Vec<FilterableField>> {
        match &self.root {
            Some(root) => available_fields_at(root, group_path, all_fields),
            None if group_path.is_empty() => Some(available_fields(
                &FilterGroup::new(GroupOperator::And, vec![]),
                all_fields,
            )),
            None => None,
        }
    }

    /// Whether the item at `path` is a rule that may be converted into a subgroup
    pub fn can_convert_at(&self, path: &[usize]) -> bool {
        self.get(path).and_then(FilterItem::as_rule).is_some()
            && mutate::can_convert_to_subgroup(path.len() - 1, &self.config)
    }

    /// Add a rule on `field_id` to the group at `group_path`
    ///
    /// On an empty tree this creates an AND root holding the rule.
    pub fn add_rule_at(
        &self,
        group_path: &[usize],
        field_id: &str,
        all_fields: &[FilterableField],
    ) -> Result<FilterTree, EditError> {
        let field = find_field(all_fields, field_id)
            .ok_or_else(|| EditError::UnknownField(field_id.to_string()))?;
        let available = self
            .available_fields_at(group_path, all_fields)
            .ok_or_else(|| EditError::InvalidPath(group_path.to_vec()))?;

        let Some(root) = &self.root else {
            let root = mutate::add_rule(
                &FilterGroup::new(GroupOperator::And, vec![]),
                field,
                &available,
            )?;
            return Ok(self.with_root(Some(root)));
        };

        let edit = edit_group(root, group_path, 0, group_path, &mut |group: &FilterGroup, _depth: usize| {
            mutate::add_rule(group, field, &available).map(GroupEdit::Updated)
        })?;
        Ok(self.with_root(edit.into_group()))
    }

    /// Remove the item at `path`, deleting emptied ancestors
    pub fn remove_at(&self, path: &[usize]) -> Result<FilterTree, EditError> {
        let (root, parent, index) = self.split_item_path(path)?;
        let edit = edit_group(root, parent, 0, path, &mut |group: &FilterGroup, _depth: usize| {
            mutate::remove_item(group, index)
        })?;
        Ok(self.with_root(edit.into_group()))
    }

    /// Replace the item at `path`
    ///
    /// A rule moved onto another field must target a field the slot accepts,
    /// so an OR group keeps a single field class.
    pub fn replace_at(
        &self,
        path: &[usize],
        item: FilterItem,
        all_fields: &[FilterableField],
    ) -> Result<FilterTree, EditError> {
        let (root, parent, index) = self.split_item_path(path)?;
        let available = match (&item, self.get(path)) {
            (_, None) => return Err(EditError::InvalidPath(path.to_vec())),
            (FilterItem::Rule(new), Some(FilterItem::Rule(old)))
                if new.field_id() == old.field_id() =>
            {
                None
            }
            (FilterItem::Rule(_), Some(_)) => Some(
                available_fields_for_item(root, path, all_fields)
                    .ok_or_else(|| EditError::InvalidPath(path.to_vec()))?,
            ),
            (FilterItem::Group(_), Some(_)) => None,
        };

        let mut item = Some(item);
        let edit = edit_group(root, parent, 0, path, &mut |group: &FilterGroup, _depth: usize| {
            let item = item.take().ok_or_else(|| EditError::InvalidPath(path.to_vec()))?;
            let replaced = match (item, &available) {
                (FilterItem::Rule(rule), Some(available)) => {
                    mutate::replace_rule(group, index, rule, available)
                }
                (item, _) => mutate::replace_item(group, index, item),
            };
            replaced.map(GroupEdit::Updated)
        })?;
        Ok(self.with_root(edit.into_group()))
    }

    /// Apply `f` to the rule at `path`
    ///
    /// Retargeting the rule is checked the same way as [`FilterTree::replace_at`].
    pub fn update_rule_at<F>(
        &self,
        path: &[usize],
        all_fields: &[FilterableField],
        f: F,
    ) -> Result<FilterTree, EditError>
    where
        F: FnOnce(FilterRule) -> Result<FilterRule, EditError>,
    {
        let rule = self
            .get(path)
            .and_then(FilterItem::as_rule)
            .cloned()
            .ok_or_else(|| EditError::InvalidPath(path.to_vec()))?;
        self.replace_at(path, FilterItem::Rule(f(rule)?), all_fields)
    }

    /// Change the operator of the rule at `path`, checking the field type
    pub fn change_rule_operator_at(
        &self,
        path: &[usize],
        operator: FilterOperator,
        all_fields: &[FilterableField],
    ) -> Result<FilterTree, EditError> {
        self.update_rule_at(path, all_fields, |rule| {
            let field = find_field(all_fields, rule.field_id())
                .ok_or_else(|| EditError::UnknownField(rule.field_id().to_string()))?;
            if !operator.accepts(field.filter_type) {
                return Err(EditError::OperatorNotSupported {
                    operator,
                    filter_type: field.filter_type,
                });
            }
            Ok(rule.with_operator(operator))
        })
    }

    /// Wrap the rule at `path` in a subgroup with the opposite operator
    pub fn convert_at(&self, path: &[usize]) -> Result<FilterTree, EditError> {
        let (root, parent, index) = self.split_item_path(path)?;
        let config = &self.config;
        let edit = edit_group(root, parent, 0, path, &mut |group: &FilterGroup, depth: usize| {
            mutate::convert_to_subgroup(group, index, depth, config).map(GroupEdit::Updated)
        })?;
        Ok(self.with_root(edit.into_group()))
    }

    /// Switch the group at `group_path` between AND and OR
    pub fn change_operator_at(
        &self,
        group_path: &[usize],
        operator: GroupOperator,
        all_fields: &[FilterableField],
    ) -> Result<FilterTree, EditError> {
        let root = self
            .root
            .as_ref()
            .ok_or_else(|| EditError::InvalidPath(group_path.to_vec()))?;
        let config = &self.config;
        let edit = edit_group(root, group_path, 0, group_path, &mut |group: &FilterGroup, _depth: usize| {
            mutate::change_operator(group, operator, all_fields, config).map(GroupEdit::Updated)
        })?;
        Ok(self.with_root(edit.into_group()))
    }

    fn with_root(&self, root: Option<FilterGroup>) -> FilterTree {
        FilterTree {
            root,
            config: self.config.clone(),
        }
    }

    fn split_item_path<'a>(
        &'a self,
        path: &'a [usize],
    ) -> Result<(&'a FilterGroup, &'a [usize], usize), EditError> {
        let root = self
            .root
            .as_ref()
            .ok_or_else(|| EditError::InvalidPath(path.to_vec()))?;
        let (index, parent) = path
            .split_last()
            .ok_or_else(|| EditError::InvalidPath(path.to_vec()))?;
        Ok((root, parent, *index))
    }
}

// Walk down `group_path` to a group, apply `f` there, and rebuild the ancestors.
// `depth` is both the nesting depth of `group` and the number of path entries
// already followed. A deleted child is removed from its parent, which may
// delete the parent. Bad paths are reported as `error_path`, the path the
// caller was given.
fn edit_group<F>(
    group: &FilterGroup,
    group_path: &[usize],
    depth: usize,
    error_path: &[usize],
    f: &mut F,
) -> Result<GroupEdit, EditError>
where
    F: FnMut(&FilterGroup, usize) -> Result<GroupEdit, EditError>,
{
    let Some(&index) = group_path.get(depth) else {
        return f(group, depth);
    };
    let child = group
        .items
        .get(index)
        .and_then(FilterItem::as_group)
        .ok_or_else(|| EditError::InvalidPath(error_path.to_vec()))?;
    match edit_group(child, group_path, depth + 1, error_path, f)? {
        GroupEdit::Updated(child) => {
            mutate::replace_item(group, index, FilterItem::Group(child)).map(GroupEdit::Updated)
        }
        GroupEdit::Deleted => mutate::remove_item(group, index),
    }
}
