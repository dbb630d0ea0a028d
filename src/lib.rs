//! A local, content-addressable snapshot-versioning engine.
//!
//! `lit` stores every version of every tracked file as an immutable,
//! deduplicated blob in an object database, records snapshots as
//! content-addressed commits forming an append-only DAG, and keeps a
//! mutable staging area between commits. Branches are named pointers
//! into the commit graph; checkout, reset and merge synchronize the
//! working directory with a chosen snapshot.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
