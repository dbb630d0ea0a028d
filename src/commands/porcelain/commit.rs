use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::LitError;

impl Repository {
    /// Turn the staging area into a new commit on the current branch
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        if message.trim().is_empty() {
            return Err(LitError::EmptyCommitMessage.into());
        }

        {
            let mut index = self.index();
            index.rehydrate()?;

            if index.is_empty() {
                return Err(LitError::NothingStaged.into());
            }
        }

        let head_oid = self.head_oid()?;
        self.commit_staged(vec![head_oid], message)?;

        Ok(())
    }

    /// Create a commit from the in-memory staging area
    ///
    /// The new tree is HEAD's tree with pending additions overlaid and
    /// pending removals deleted. The commit object is stored first; the
    /// branch pointer and the cleared index are written last so the
    /// metadata never references an object that was not durably stored.
    pub(crate) fn commit_staged(
        &self,
        parents: Vec<ObjectId>,
        message: &str,
    ) -> anyhow::Result<ObjectId> {
        let head_tree = self.head_commit()?.tree().clone();

        let mut index = self.index();
        let tree = index.apply_to(&head_tree);

        let commit = Commit::new(
            parents,
            tree,
            message.trim().to_string(),
            chrono::Local::now().fixed_offset(),
        );
        let commit_oid = commit.object_id()?;
        self.database().store(commit)?;

        self.refs().update_head(&commit_oid)?;
        index.clear();
        index.write_updates()?;

        Ok(commit_oid)
    }
}
