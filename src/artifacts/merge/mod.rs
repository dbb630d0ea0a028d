//! Merge algorithms
//!
//! - `base_finder`: locates the split point (merge base) of two commits
//! - `resolution`: three-way, digest-level snapshot resolution

pub mod base_finder;
pub mod resolution;
