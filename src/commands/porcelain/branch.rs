use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::LitError;

impl Repository {
    /// Create a new branch pointing at the current HEAD commit
    pub fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let head_oid = self.head_oid()?;

        self.refs().create_branch(&branch_name, &head_oid)
    }

    /// Delete a branch pointer; the commits it referenced stay reachable
    /// through the rest of the graph
    pub fn rm_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        if self.refs().lookup_branch(branch_name)?.is_none() {
            return Err(LitError::BranchMissing.into());
        }
        if branch_name == self.refs().current_branch()?.as_ref() {
            return Err(LitError::RemoveCurrentBranch.into());
        }

        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        self.refs().delete_branch(&branch_name)
    }
}
