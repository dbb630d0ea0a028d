//! Three-way snapshot resolution
//!
//! Given the split-point tree and the two tips' trees, decides the merged
//! version of every filename. "Changed" means digest inequality; file
//! content is never inspected. Files changed differently on both sides
//! resolve to a conflict whose working content carries both versions
//! between markers, with an absent side treated as empty.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use bytes::Bytes;
use std::collections::BTreeMap;

const CONFLICT_HEADER: &str = "<<<<<<< HEAD\n";
const CONFLICT_SEPARATOR: &str = "=======\n";
const CONFLICT_FOOTER: &str = ">>>>>>>\n";

/// Merged outcome for a single filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileResolution {
    /// The current side's version (or its absence) stands
    KeepCurrent,
    /// Adopt the other side's version; `None` deletes the file
    TakeOther(Option<ObjectId>),
    /// Both sides changed the file differently relative to the split
    Conflict {
        current: Option<ObjectId>,
        other: Option<ObjectId>,
    },
}

/// Per-filename decisions for one merge
#[derive(Debug, Default)]
pub struct Resolution {
    decisions: BTreeMap<String, FileResolution>,
}

impl Resolution {
    /// Resolve every filename appearing in any of the three snapshots
    pub fn resolve(split: &Tree, current: &Tree, other: &Tree) -> Self {
        let mut decisions = BTreeMap::new();

        for name in Tree::union_names(&[split, current, other]) {
            let base = split.get(name);
            let ours = current.get(name);
            let theirs = other.get(name);

            let decision = if ours == theirs {
                // both sides agree, including both absent
                FileResolution::KeepCurrent
            } else if base == ours {
                // unchanged on our side, so the other side's change wins
                FileResolution::TakeOther(theirs.cloned())
            } else if base == theirs {
                // unchanged on their side, so our change wins
                FileResolution::KeepCurrent
            } else {
                FileResolution::Conflict {
                    current: ours.cloned(),
                    other: theirs.cloned(),
                }
            };

            decisions.insert(name.clone(), decision);
        }

        Resolution { decisions }
    }

    pub fn decisions(&self) -> &BTreeMap<String, FileResolution> {
        &self.decisions
    }

    pub fn has_conflicts(&self) -> bool {
        self.decisions
            .values()
            .any(|decision| matches!(decision, FileResolution::Conflict { .. }))
    }
}

/// Working-file content for a conflicted file: the current version, a
/// delimiter, then the other version, an absent side contributing nothing
pub fn conflict_content(current: Option<&Bytes>, other: Option<&Bytes>) -> Bytes {
    let mut content = Vec::new();

    content.extend_from_slice(CONFLICT_HEADER.as_bytes());
    if let Some(current) = current {
        content.extend_from_slice(current);
    }
    content.extend_from_slice(CONFLICT_SEPARATOR.as_bytes());
    if let Some(other) = other {
        content.extend_from_slice(other);
    }
    content.extend_from_slice(CONFLICT_FOOTER.as_bytes());

    Bytes::from(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(fill: char) -> ObjectId {
        ObjectId::try_parse(fill.to_string().repeat(40)).unwrap()
    }

    fn tree(entries: &[(&str, char)]) -> Tree {
        let mut tree = Tree::new();
        for (name, fill) in entries {
            tree.insert(name.to_string(), oid(*fill));
        }
        tree
    }

    #[test]
    fn file_changed_only_in_other_is_taken() {
        let split = tree(&[("f.txt", 'a')]);
        let current = tree(&[("f.txt", 'a')]);
        let other = tree(&[("f.txt", 'b')]);

        let resolution = Resolution::resolve(&split, &current, &other);
        assert_eq!(
            resolution.decisions()["f.txt"],
            FileResolution::TakeOther(Some(oid('b')))
        );
        assert!(!resolution.has_conflicts());
    }

    #[test]
    fn file_deleted_only_in_other_is_deleted() {
        let split = tree(&[("f.txt", 'a')]);
        let current = tree(&[("f.txt", 'a')]);
        let other = tree(&[]);

        let resolution = Resolution::resolve(&split, &current, &other);
        assert_eq!(
            resolution.decisions()["f.txt"],
            FileResolution::TakeOther(None)
        );
    }

    #[test]
    fn file_changed_only_in_current_is_kept() {
        let split = tree(&[("f.txt", 'a')]);
        let current = tree(&[("f.txt", 'c')]);
        let other = tree(&[("f.txt", 'a')]);

        let resolution = Resolution::resolve(&split, &current, &other);
        assert_eq!(resolution.decisions()["f.txt"], FileResolution::KeepCurrent);
    }

    #[test]
    fn file_added_on_one_side_only_is_adopted() {
        let split = tree(&[]);
        let current = tree(&[("mine.txt", 'c')]);
        let other = tree(&[("theirs.txt", 'd')]);

        let resolution = Resolution::resolve(&split, &current, &other);
        assert_eq!(
            resolution.decisions()["mine.txt"],
            FileResolution::KeepCurrent
        );
        assert_eq!(
            resolution.decisions()["theirs.txt"],
            FileResolution::TakeOther(Some(oid('d')))
        );
    }

    #[test]
    fn file_changed_identically_on_both_sides_is_not_a_conflict() {
        let split = tree(&[("f.txt", 'a')]);
        let current = tree(&[("f.txt", 'b')]);
        let other = tree(&[("f.txt", 'b')]);

        let resolution = Resolution::resolve(&split, &current, &other);
        assert_eq!(resolution.decisions()["f.txt"], FileResolution::KeepCurrent);
    }

    #[test]
    fn divergent_changes_conflict() {
        let split = tree(&[("f.txt", 'a')]);
        let current = tree(&[("f.txt", 'b')]);
        let other = tree(&[("f.txt", 'c')]);

        let resolution = Resolution::resolve(&split, &current, &other);
        assert_eq!(
            resolution.decisions()["f.txt"],
            FileResolution::Conflict {
                current: Some(oid('b')),
                other: Some(oid('c')),
            }
        );
        assert!(resolution.has_conflicts());
    }

    #[test]
    fn modify_versus_delete_conflicts() {
        let split = tree(&[("f.txt", 'a')]);
        let current = tree(&[("f.txt", 'b')]);
        let other = tree(&[]);

        let resolution = Resolution::resolve(&split, &current, &other);
        assert_eq!(
            resolution.decisions()["f.txt"],
            FileResolution::Conflict {
                current: Some(oid('b')),
                other: None,
            }
        );
    }

    #[test]
    fn conflict_content_treats_an_absent_side_as_empty() {
        let ours = Bytes::from_static(b"ours\n");

        let content = conflict_content(Some(&ours), None);
        let expected = "<<<<<<< HEAD\nours\n=======\n>>>>>>>\n";

        assert_eq!(content, Bytes::from_static(expected.as_bytes()));
    }
}
