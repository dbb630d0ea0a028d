//! Staging area (index)
//!
//! A mutable buffer of pending changes relative to the current commit's
//! tree: filenames staged for addition (with the digest of the staged
//! content) and filenames staged for removal. Consumed by commit creation
//! and cleared after every successful commit, branch switch, reset or
//! merge. Only digests are kept here; the content itself lives in the
//! object database from the moment it is staged.
//!
//! ## File format
//!
//! One pending change per line in `.lit/index`:
//!
//! ```text
//! add <blob-sha> <filename>
//! rm <filename>
//! ```

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use anyhow::Context;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

#[derive(Debug)]
pub struct Index {
    path: Box<Path>,
    added: BTreeMap<String, ObjectId>,
    removed: BTreeSet<String>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            added: BTreeMap::new(),
            removed: BTreeSet::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load pending changes from disk; a missing index file means empty
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.added.clear();
        self.removed.clear();

        if !self.path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(&self.path)
            .context(format!("Unable to read index file {}", self.path.display()))?;

        for line in content.lines() {
            if line.is_empty() {
                continue;
            }

            if let Some(rest) = line.strip_prefix("add ") {
                let (oid, name) = rest
                    .split_once(' ')
                    .ok_or_else(|| anyhow::anyhow!("Invalid index entry: {line}"))?;
                self.added
                    .insert(name.to_string(), ObjectId::try_parse(oid.to_string())?);
            } else if let Some(name) = line.strip_prefix("rm ") {
                self.removed.insert(name.to_string());
            } else {
                anyhow::bail!("Invalid index entry: {line}");
            }
        }

        Ok(())
    }

    pub fn write_updates(&self) -> anyhow::Result<()> {
        let mut lines = Vec::new();

        for (name, oid) in &self.added {
            lines.push(format!("add {} {}", oid.as_ref(), name));
        }
        for name in &self.removed {
            lines.push(format!("rm {name}"));
        }

        std::fs::write(&self.path, lines.join("\n"))
            .context(format!("Unable to write index file {}", self.path.display()))
    }

    /// Record a pending addition, cancelling any pending removal
    pub fn stage_addition(&mut self, name: &str, oid: ObjectId) {
        self.removed.remove(name);
        self.added.insert(name.to_string(), oid);
    }

    /// Record a pending removal, cancelling any pending addition
    pub fn stage_removal(&mut self, name: &str) {
        self.added.remove(name);
        self.removed.insert(name.to_string());
    }

    pub fn unstage_addition(&mut self, name: &str) {
        self.added.remove(name);
    }

    /// Drop every pending change for a file (net no-op staging)
    pub fn clear_pending(&mut self, name: &str) {
        self.added.remove(name);
        self.removed.remove(name);
    }

    pub fn is_staged_for_addition(&self, name: &str) -> bool {
        self.added.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn clear(&mut self) {
        self.added.clear();
        self.removed.clear();
    }

    pub fn added(&self) -> &BTreeMap<String, ObjectId> {
        &self.added
    }

    pub fn removed(&self) -> &BTreeSet<String> {
        &self.removed
    }

    /// The next commit's tree: the base tree with pending additions
    /// overlaid and pending removals deleted
    pub fn apply_to(&self, base: &Tree) -> Tree {
        let mut tree = base.clone();

        for (name, oid) in &self.added {
            tree.insert(name.clone(), oid.clone());
        }
        for name in &self.removed {
            tree.remove(name);
        }

        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(fill: char) -> ObjectId {
        ObjectId::try_parse(fill.to_string().repeat(40)).unwrap()
    }

    fn scratch_index() -> Index {
        Index::new(Path::new("unused").to_path_buf().into_boxed_path())
    }

    #[test]
    fn staging_an_addition_cancels_a_pending_removal() {
        let mut index = scratch_index();

        index.stage_removal("wug.txt");
        index.stage_addition("wug.txt", oid('a'));

        assert!(index.is_staged_for_addition("wug.txt"));
        assert!(!index.removed().contains("wug.txt"));
    }

    #[test]
    fn staging_a_removal_cancels_a_pending_addition() {
        let mut index = scratch_index();

        index.stage_addition("wug.txt", oid('a'));
        index.stage_removal("wug.txt");

        assert!(!index.is_staged_for_addition("wug.txt"));
        assert!(index.removed().contains("wug.txt"));
    }

    #[test]
    fn apply_to_overlays_additions_and_drops_removals() {
        let mut base = Tree::new();
        base.insert("kept.txt".to_string(), oid('1'));
        base.insert("gone.txt".to_string(), oid('2'));
        base.insert("changed.txt".to_string(), oid('3'));

        let mut index = scratch_index();
        index.stage_addition("changed.txt", oid('4'));
        index.stage_addition("new.txt", oid('5'));
        index.stage_removal("gone.txt");

        let tree = index.apply_to(&base);

        assert_eq!(tree.get("kept.txt"), Some(&oid('1')));
        assert_eq!(tree.get("changed.txt"), Some(&oid('4')));
        assert_eq!(tree.get("new.txt"), Some(&oid('5')));
        assert!(!tree.contains("gone.txt"));
    }
}
