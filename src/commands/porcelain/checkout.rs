use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::errors::LitError;

impl Repository {
    /// Switch to another branch, materializing its snapshot
    ///
    /// Nothing is written until the untracked-file guard has passed, so a
    /// blocked switch leaves every working file and the repository state
    /// exactly as they were. The HEAD symref moves last.
    pub fn checkout_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let target_oid = self
            .refs()
            .lookup_branch(branch_name)?
            .ok_or(LitError::NoSuchBranch)?;

        if branch_name == self.refs().current_branch()?.as_ref() {
            return Err(LitError::CheckoutCurrentBranch.into());
        }

        // the lookup succeeded, so the name is known to be well-formed
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        self.index().rehydrate()?;

        let migration = Migration::new(self);
        migration.guard_untracked()?;

        let target_commit = self.database().load_commit(&target_oid)?;
        migration.checkout_tree(target_commit.tree())?;

        {
            let mut index = self.index();
            index.clear();
            index.write_updates()?;
        }

        self.refs().set_current_branch(&branch_name)
    }

    /// Restore one file from HEAD or from an abbreviated commit id
    ///
    /// Overwrites the working file only; the staging area is untouched.
    pub fn checkout_file(
        &mut self,
        commit_ref: Option<&str>,
        file_name: &str,
    ) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let commit = match commit_ref {
            Some(commit_ref) => {
                let oid = self.database().resolve_prefix(commit_ref)?;
                self.database().load_commit(&oid)?
            }
            None => self.head_commit()?,
        };

        Migration::new(self).checkout_file(&commit, file_name)
    }
}
