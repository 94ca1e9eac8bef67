//! Tree validation (verb module)
//!
//! Loaded documents are not guaranteed to satisfy the editing invariants:
//! they may predate them, or have been produced under the `allow` operator
//! policy. `validate` walks a tree and reports every violation it finds.

mod check;

pub use check::{validate, Violation};
