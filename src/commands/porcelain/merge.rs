use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::merge::base_finder::BaseFinder;
use crate::artifacts::merge::resolution::{FileResolution, Resolution, conflict_content};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::LitError;
use bytes::Bytes;
use std::io::Write;

impl Repository {
    /// Merge another branch into the current one
    ///
    /// Preconditions are checked in a fixed order before anything is
    /// written: clean staging area, branch exists, not a self-merge, and
    /// no untracked file the merge could overwrite. The split point then
    /// decides the outcome: already up to date, fast-forward, or a true
    /// three-way merge producing a two-parent commit. Conflicts do not
    /// abort the merge; the conflicted content is committed and reported.
    pub fn merge(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        {
            let mut index = self.index();
            index.rehydrate()?;

            if !index.is_empty() {
                return Err(LitError::UncommittedChanges.into());
            }
        }

        let other_oid = self
            .refs()
            .lookup_branch(branch_name)?
            .ok_or(LitError::BranchMissing)?;

        let current_branch = self.refs().current_branch()?;
        if branch_name == current_branch.as_ref() {
            return Err(LitError::SelfMerge.into());
        }

        let head_oid = self.head_oid()?;
        let head_commit = self.database().load_commit(&head_oid)?;
        let other_commit = self.database().load_commit(&other_oid)?;

        let migration = Migration::new(self);
        migration.guard_untracked_against(&[head_commit.tree(), other_commit.tree()])?;

        let split_oid = {
            let finder = BaseFinder::new(|oid: &ObjectId| self.database().commit_parents(oid));
            finder
                .find_merge_base(&head_oid, &other_oid)?
                .ok_or_else(|| anyhow::anyhow!("No common ancestor between branch tips"))?
        };

        if split_oid == other_oid {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }

        if split_oid == head_oid {
            migration.checkout_tree(other_commit.tree())?;

            let mut index = self.index();
            index.clear();
            index.write_updates()?;
            drop(index);

            self.refs().update_head(&other_oid)?;
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let split_commit = self.database().load_commit(&split_oid)?;
        let resolution = Resolution::resolve(
            split_commit.tree(),
            head_commit.tree(),
            other_commit.tree(),
        );
        let conflicted = resolution.has_conflicts();

        self.apply_resolution(&resolution)?;

        let message = format!("Merged {branch_name} into {current_branch}.");
        self.commit_staged(vec![head_oid, other_oid], &message)?;

        if conflicted {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }

    /// Write each decided file to the working directory and stage it
    ///
    /// Conflicted files get both versions between markers; the conflicted
    /// blob goes into the object database like any other staged content.
    fn apply_resolution(&self, resolution: &Resolution) -> anyhow::Result<()> {
        for (name, decision) in resolution.decisions() {
            match decision {
                FileResolution::KeepCurrent => {}
                FileResolution::TakeOther(Some(oid)) => {
                    let blob = self.database().load_blob(oid)?;
                    self.workspace().write_file(name, blob.content())?;
                    self.index().stage_addition(name, oid.clone());
                }
                FileResolution::TakeOther(None) => {
                    self.workspace().remove_file(name)?;
                    self.index().stage_removal(name);
                }
                FileResolution::Conflict { current, other } => {
                    let current = self.blob_content(current.as_ref())?;
                    let other = self.blob_content(other.as_ref())?;
                    let content = conflict_content(current.as_ref(), other.as_ref());

                    let blob = Blob::new(content.clone());
                    let blob_oid = blob.object_id()?;
                    self.database().store(blob)?;

                    self.workspace().write_file(name, &content)?;
                    self.index().stage_addition(name, blob_oid);
                }
            }
        }

        Ok(())
    }

    fn blob_content(&self, oid: Option<&ObjectId>) -> anyhow::Result<Option<Bytes>> {
        oid.map(|oid| Ok(self.database().load_blob(oid)?.content().clone()))
            .transpose()
    }
}
