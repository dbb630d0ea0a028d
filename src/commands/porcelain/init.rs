use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::errors::LitError;
use anyhow::Context;
use std::fs;

impl Repository {
    /// Create an empty repository: the marker directory, the object
    /// store, the shared root commit and a `master` branch pointing at it
    pub fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(LitError::RepositoryExists.into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .lit/objects directory")?;

        let initial_commit = Commit::initial();
        let initial_oid = initial_commit.object_id()?;
        self.database().store(initial_commit)?;

        self.refs()
            .init(&BranchName::default_branch(), &initial_oid)
            .context("Failed to create initial HEAD reference")?;

        let index = self.index();
        if !index.path().exists() {
            fs::write(index.path(), b"").context("Failed to create .lit/index file")?;
        }

        Ok(())
    }
}
