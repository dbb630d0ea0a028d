//! Commit object
//!
//! A commit is an immutable, content-addressed record of one snapshot:
//! the full tree, 0..=2 parent ids, a message and a timestamp. Its id is
//! the SHA-1 of the serialized record, so two logically identical commits
//! (same parents, tree, message and timestamp) share one id, and commits
//! reference each other only by id, never by live handle.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! entry <blob-sha> <filename>
//! timestamp <unix-seconds> <timezone>
//!
//! <commit message>
//! ```
//!
//! The root commit has no `parent` lines; a merge commit has two.

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use anyhow::Context;
use bytes::Bytes;
use std::io::{BufRead, Write};

/// Message of the zero-parent root commit created by `init`
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// Commit object
///
/// Immutable once created; every accessor borrows. The embedded [`Tree`]
/// is the complete snapshot, not a delta against the parent.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit ids: empty for the root, one normally, two for merges
    parents: Vec<ObjectId>,
    /// Complete filename -> blob id snapshot
    tree: Tree,
    /// Commit message
    message: String,
    /// Commit timestamp
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Commit {
    pub fn new(
        parents: Vec<ObjectId>,
        tree: Tree,
        message: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Commit {
            parents,
            tree,
            message,
            timestamp,
        }
    }

    /// The shared root commit: empty tree, no parents, epoch timestamp.
    ///
    /// Every repository starts from this exact record, so the root id is
    /// identical across repositories.
    pub fn initial() -> Self {
        let epoch = chrono::DateTime::from_timestamp(0, 0)
            .expect("epoch is representable")
            .fixed_offset();

        Commit::new(
            Vec::new(),
            Tree::new(),
            INITIAL_COMMIT_MESSAGE.to_string(),
            epoch,
        )
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    /// First parent, absent only for the root commit
    pub fn first_parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() == 2
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }

    /// Format the timestamp for `log` output, e.g. `Thu Jan 1 00:00:00 1970 +0000`
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    fn parse_offset(raw: &str) -> anyhow::Result<chrono::FixedOffset> {
        anyhow::ensure!(
            raw.len() == 5 && (raw.starts_with('+') || raw.starts_with('-')),
            "Invalid timezone offset: {raw}"
        );

        let sign = if raw.starts_with('-') { -1 } else { 1 };
        let hours: i32 = raw[1..3].parse().context("Invalid offset hours")?;
        let minutes: i32 = raw[3..5].parse().context("Invalid offset minutes")?;

        chrono::FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .ok_or_else(|| anyhow::anyhow!("Timezone offset out of range: {raw}"))
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = vec![];

        for parent in &self.parents {
            object_content.push(format!("parent {}", parent.as_ref()));
        }
        self.tree.write_entries(&mut object_content);
        object_content.push(format!(
            "timestamp {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        let object_content = object_content.join("\n");

        let mut content_bytes = Vec::new();
        content_bytes.write_all(object_content.as_bytes())?;

        let mut commit_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), content_bytes.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8(content)?;
        let mut lines = content.lines();

        let mut parents = Vec::new();
        let mut tree = Tree::new();
        let mut timestamp = None;

        for line in lines.by_ref() {
            if line.is_empty() {
                break;
            }

            if let Some(parent_oid) = line.strip_prefix("parent ") {
                parents.push(ObjectId::try_parse(parent_oid.to_string())?);
            } else if line.starts_with("entry ") {
                tree.parse_entry(line)?;
            } else if let Some(raw) = line.strip_prefix("timestamp ") {
                let (seconds, offset) = raw
                    .split_once(' ')
                    .context("Invalid commit object: malformed timestamp line")?;
                let seconds: i64 = seconds
                    .parse()
                    .context("Invalid commit object: bad timestamp seconds")?;
                let offset = Self::parse_offset(offset)?;

                timestamp = Some(
                    chrono::DateTime::from_timestamp(seconds, 0)
                        .context("Invalid commit object: timestamp out of range")?
                        .with_timezone(&offset),
                );
            } else {
                anyhow::bail!("Invalid commit object: unexpected line {line:?}");
            }
        }

        let timestamp = timestamp.context("Invalid commit object: missing timestamp line")?;
        let message = lines.collect::<Vec<&str>>().join("\n");

        Ok(Self::new(parents, tree, message, timestamp))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn oid(fill: char) -> ObjectId {
        ObjectId::try_parse(fill.to_string().repeat(40)).unwrap()
    }

    fn sample_tree() -> Tree {
        let mut tree = Tree::new();
        tree.insert("wug.txt".to_string(), oid('a'));
        tree.insert("notwug.txt".to_string(), oid('b'));
        tree
    }

    #[test]
    fn identical_logical_commits_share_an_id() {
        let when = chrono::DateTime::from_timestamp(1_700_000_000, 0)
            .unwrap()
            .fixed_offset();
        let one = Commit::new(vec![oid('1')], sample_tree(), "same".to_string(), when);
        let two = Commit::new(vec![oid('1')], sample_tree(), "same".to_string(), when);

        assert_eq!(one.object_id().unwrap(), two.object_id().unwrap());
    }

    #[test]
    fn changing_any_field_changes_the_id() {
        let when = chrono::DateTime::from_timestamp(1_700_000_000, 0)
            .unwrap()
            .fixed_offset();
        let base = Commit::new(vec![oid('1')], sample_tree(), "msg".to_string(), when);
        let other_message = Commit::new(vec![oid('1')], sample_tree(), "other".to_string(), when);
        let other_parent = Commit::new(vec![oid('2')], sample_tree(), "msg".to_string(), when);

        assert_ne!(
            base.object_id().unwrap(),
            other_message.object_id().unwrap()
        );
        assert_ne!(base.object_id().unwrap(), other_parent.object_id().unwrap());
    }

    #[test]
    fn merge_commit_round_trips_with_both_parents_in_order() {
        let when = chrono::DateTime::from_timestamp(1_700_000_000, 0)
            .unwrap()
            .fixed_offset();
        let commit = Commit::new(
            vec![oid('1'), oid('2')],
            sample_tree(),
            "Merged dev into master.".to_string(),
            when,
        );

        let serialized = commit.serialize().unwrap();
        let mut reader = Cursor::new(serialized);
        ObjectType::parse_object_type(&mut reader).unwrap();
        let parsed = Commit::deserialize(reader).unwrap();

        assert_eq!(parsed, commit);
        assert!(parsed.is_merge());
        assert_eq!(parsed.parents(), &[oid('1'), oid('2')]);
    }

    #[test]
    fn initial_commit_is_the_same_everywhere() {
        let one = Commit::initial();
        let two = Commit::initial();

        assert!(one.parents().is_empty());
        assert!(one.tree().is_empty());
        assert_eq!(one.object_id().unwrap(), two.object_id().unwrap());
    }

    #[test]
    fn multi_line_messages_survive_round_trip() {
        let when = chrono::DateTime::from_timestamp(0, 0).unwrap().fixed_offset();
        let commit = Commit::new(
            Vec::new(),
            Tree::new(),
            "first line\n\nbody paragraph".to_string(),
            when,
        );

        let serialized = commit.serialize().unwrap();
        let mut reader = Cursor::new(serialized);
        ObjectType::parse_object_type(&mut reader).unwrap();
        let parsed = Commit::deserialize(reader).unwrap();

        assert_eq!(parsed.message(), "first line\n\nbody paragraph");
    }
}
