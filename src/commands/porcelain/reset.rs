use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;

impl Repository {
    /// Move the current branch (and therefore HEAD) to an arbitrary commit
    ///
    /// Same untracked guard and tree materialization as a branch switch,
    /// but the branch identity is unchanged: only its pointer moves. The
    /// pointer update is the last write.
    pub fn reset(&mut self, commit_ref: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let target_oid = self.database().resolve_prefix(commit_ref)?;
        let target_commit = self.database().load_commit(&target_oid)?;

        self.index().rehydrate()?;

        let migration = Migration::new(self);
        migration.guard_untracked()?;
        migration.checkout_tree(target_commit.tree())?;

        {
            let mut index = self.index();
            index.clear();
            index.write_updates()?;
        }

        self.refs().update_head(&target_oid)
    }
}
