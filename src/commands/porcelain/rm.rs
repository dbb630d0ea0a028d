use crate::areas::repository::Repository;
use crate::errors::LitError;

impl Repository {
    /// Stage a file for removal
    ///
    /// A file staged for addition is simply unstaged; a file tracked in
    /// HEAD's tree is additionally marked removed and deleted from the
    /// working directory. A file that is neither is nothing to remove.
    pub fn rm(&mut self, file_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let head_tree = self.head_commit()?.tree().clone();

        let mut index = self.index();
        index.rehydrate()?;

        let staged = index.is_staged_for_addition(file_name);
        let tracked = head_tree.contains(file_name);

        if !staged && !tracked {
            return Err(LitError::NothingToRemove.into());
        }

        if staged {
            index.unstage_addition(file_name);
        }
        if tracked {
            index.stage_removal(file_name);
            self.workspace().remove_file(file_name)?;
        }

        index.write_updates()
    }
}
