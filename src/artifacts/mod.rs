//! Core data structures and algorithms
//!
//! - `branch`: validated branch names
//! - `checkout`: tree materialization and the untracked-file guard
//! - `log`: commit history traversal
//! - `merge`: merge-base search and three-way snapshot resolution
//! - `objects`: object types (blob, tree, commit)

pub mod branch;
pub mod checkout;
pub mod log;
pub mod merge;
pub mod objects;
