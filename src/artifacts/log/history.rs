//! Ancestor walks over the commit graph
//!
//! `History` is a lazy iterator over a commit and its transitive parent
//! closure. The graph is a DAG with a single shared root, so every walk
//! is finite; a seen-set keeps each commit yielded at most once even when
//! merge commits make ancestries overlap.

use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashSet, VecDeque};

pub struct History<'d> {
    database: &'d Database,
    queue: VecDeque<ObjectId>,
    seen: HashSet<ObjectId>,
    first_parent_only: bool,
}

impl<'d> History<'d> {
    /// Walk the full ancestor closure, breadth-first from the tip
    pub fn full(database: &'d Database, tip: ObjectId) -> Self {
        Self::start(database, tip, false)
    }

    /// Follow only first parents, the chain `log` displays
    pub fn first_parent(database: &'d Database, tip: ObjectId) -> Self {
        Self::start(database, tip, true)
    }

    fn start(database: &'d Database, tip: ObjectId, first_parent_only: bool) -> Self {
        let mut queue = VecDeque::new();
        let mut seen = HashSet::new();
        seen.insert(tip.clone());
        queue.push_back(tip);

        History {
            database,
            queue,
            seen,
            first_parent_only,
        }
    }
}

impl Iterator for History<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = self.queue.pop_front()?;

        let commit = match self.database.load_commit(&oid) {
            Ok(commit) => commit,
            Err(err) => return Some(Err(err)),
        };

        let parents: &[ObjectId] = if self.first_parent_only {
            commit
                .first_parent()
                .map(std::slice::from_ref)
                .unwrap_or(&[])
        } else {
            commit.parents()
        };

        for parent in parents {
            if self.seen.insert(parent.clone()) {
                self.queue.push_back(parent.clone());
            }
        }

        Some(Ok((oid, commit)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::object::Object;
    use crate::artifacts::objects::tree::Tree;

    fn store_commit(database: &Database, parents: Vec<ObjectId>, message: &str) -> ObjectId {
        let when = chrono::DateTime::from_timestamp(0, 0)
            .unwrap()
            .fixed_offset();
        let commit = Commit::new(parents, Tree::new(), message.to_string(), when);
        let oid = commit.object_id().unwrap();
        database.store(commit).unwrap();
        oid
    }

    fn diamond(database: &Database) -> (ObjectId, ObjectId, ObjectId, ObjectId) {
        let root = store_commit(database, vec![], "root");
        let left = store_commit(database, vec![root.clone()], "left");
        let right = store_commit(database, vec![root.clone()], "right");
        let merge = store_commit(database, vec![left.clone(), right.clone()], "merge");
        (root, left, right, merge)
    }

    #[test]
    fn full_walk_yields_every_ancestor_exactly_once() {
        let dir = assert_fs::TempDir::new().unwrap();
        let database = Database::new(dir.path().to_path_buf().into_boxed_path());
        let (root, _, _, merge) = diamond(&database);

        let walked = History::full(&database, merge.clone())
            .map(|record| record.unwrap().0)
            .collect::<Vec<_>>();

        // the diamond's root is reachable through both parents but shows
        // up only once
        assert_eq!(walked.len(), 4);
        assert_eq!(walked[0], merge);
        assert_eq!(*walked.last().unwrap(), root);
    }

    #[test]
    fn first_parent_walk_skips_side_branches() {
        let dir = assert_fs::TempDir::new().unwrap();
        let database = Database::new(dir.path().to_path_buf().into_boxed_path());
        let (root, left, _, merge) = diamond(&database);

        let walked = History::first_parent(&database, merge.clone())
            .map(|record| record.unwrap().0)
            .collect::<Vec<_>>();

        assert_eq!(walked, vec![merge, left, root]);
    }
}
