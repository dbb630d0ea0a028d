//! Tree materialization
//!
//! A `Migration` synchronizes the working directory with a target tree:
//! every file in the target is written from its stored blob, and every
//! file tracked by the current HEAD but absent from the target is
//! deleted. The untracked-file guard runs first and fails without
//! modifying anything, so mutation only starts once all preconditions
//! have passed.

use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::tree::Tree;
use crate::errors::LitError;
use derive_new::new;

#[derive(new)]
pub struct Migration<'r> {
    repository: &'r Repository,
}

impl<'r> Migration<'r> {
    /// Working files that are neither tracked by HEAD nor staged for
    /// addition, sorted by name
    pub fn untracked_files(&self) -> anyhow::Result<Vec<String>> {
        let head_tree = self.repository.head_commit()?.tree().clone();
        let index = self.repository.index();

        Ok(self
            .repository
            .workspace()
            .list_files()?
            .into_iter()
            .filter(|name| !head_tree.contains(name) && !index.is_staged_for_addition(name))
            .collect())
    }

    /// Fail when any untracked file exists (branch switch and reset)
    pub fn guard_untracked(&self) -> anyhow::Result<()> {
        if self.untracked_files()?.is_empty() {
            Ok(())
        } else {
            Err(LitError::UntrackedInTheWay.into())
        }
    }

    /// Fail only for untracked files the given trees would overwrite (merge)
    pub fn guard_untracked_against(&self, trees: &[&Tree]) -> anyhow::Result<()> {
        let blocked = self
            .untracked_files()?
            .into_iter()
            .any(|name| trees.iter().any(|tree| tree.contains(&name)));

        if blocked {
            Err(LitError::UntrackedInTheWay.into())
        } else {
            Ok(())
        }
    }

    /// Make the working directory match `target`
    ///
    /// Overwrites every file in the target tree and deletes files tracked
    /// only by the current HEAD. Callers run the untracked guard first.
    pub fn checkout_tree(&self, target: &Tree) -> anyhow::Result<()> {
        let head_tree = self.repository.head_commit()?.tree().clone();

        for (name, oid) in target.iter() {
            let blob = self.repository.database().load_blob(oid)?;
            self.repository.workspace().write_file(name, blob.content())?;
        }

        for name in head_tree.names() {
            if !target.contains(name) {
                self.repository.workspace().remove_file(name)?;
            }
        }

        Ok(())
    }

    /// Restore a single file from a commit's snapshot
    pub fn checkout_file(&self, commit: &Commit, file_name: &str) -> anyhow::Result<()> {
        let oid = commit
            .tree()
            .get(file_name)
            .ok_or(LitError::FileNotInCommit)?;

        let blob = self.repository.database().load_blob(oid)?;
        self.repository
            .workspace()
            .write_file(file_name, blob.content())
    }
}
