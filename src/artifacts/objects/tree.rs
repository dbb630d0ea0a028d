//! Snapshot tree
//!
//! A tree maps working-directory filenames to blob ids and represents the
//! complete set of tracked files at one point in time. It is a snapshot,
//! not a diff: every commit carries the whole mapping. The working tree is
//! flat, so names are plain filenames rather than paths.

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;

/// Filename -> blob id mapping for one commit
///
/// Ordered storage makes the serialized form (and therefore the commit id)
/// deterministic for a given set of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree(BTreeMap<String, ObjectId>);

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ObjectId> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn insert(&mut self, name: String, oid: ObjectId) {
        self.0.insert(name, oid);
    }

    pub fn remove(&mut self, name: &str) {
        self.0.remove(name);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ObjectId)> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// All filenames appearing in any of the given trees, deduplicated
    pub fn union_names<'t>(trees: &[&'t Tree]) -> Vec<&'t String> {
        let mut names: Vec<&String> = trees.iter().flat_map(|tree| tree.names()).collect();
        names.sort();
        names.dedup();
        names
    }

    /// Serialize as `entry <oid> <name>` lines (filenames may contain spaces)
    pub fn write_entries(&self, lines: &mut Vec<String>) {
        for (name, oid) in &self.0 {
            lines.push(format!("entry {} {}", oid.as_ref(), name));
        }
    }

    /// Parse a single `entry <oid> <name>` line into the tree
    pub fn parse_entry(&mut self, line: &str) -> anyhow::Result<()> {
        let rest = line
            .strip_prefix("entry ")
            .ok_or_else(|| anyhow::anyhow!("Invalid tree entry: {line}"))?;
        let (oid, name) = rest
            .split_once(' ')
            .ok_or_else(|| anyhow::anyhow!("Invalid tree entry: {line}"))?;

        self.insert(name.to_string(), ObjectId::try_parse(oid.to_string())?);
        Ok(())
    }
}
