//! Filter tree editor (verb module)
//!
//! - `mutate` - edits of a single group (add, remove, replace, convert, change operator)
//! - `tree` - the same edits addressed by index path from the root, with
//!   emptied groups removed up the tree

mod error;
mod mutate;
mod tree;

pub use error::EditError;
pub use mutate::{
    add_rule,
    remove_item,
    replace_item,
    replace_rule,
    convert_to_subgroup,
    can_convert_to_subgroup,
    change_operator,
    GroupEdit,
};
pub use tree::FilterTree;
