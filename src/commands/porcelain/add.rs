use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::errors::LitError;

impl Repository {
    /// Stage a file for addition
    ///
    /// Content identical to the version in HEAD's tree makes staging a
    /// net no-op: any pending addition or removal for the file is
    /// dropped. Otherwise the content goes into the object database
    /// immediately and only its digest is kept in the index.
    pub fn add(&mut self, file_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        if !self.workspace().file_exists(file_name) {
            return Err(LitError::FileMissing.into());
        }

        let head_tree = self.head_commit()?.tree().clone();
        let blob = self.workspace().parse_blob(file_name)?;
        let blob_oid = blob.object_id()?;

        let mut index = self.index();
        index.rehydrate()?;

        if head_tree.get(file_name) == Some(&blob_oid) {
            index.clear_pending(file_name);
        } else {
            self.database().store(blob)?;
            index.stage_addition(file_name, blob_oid);
        }

        index.write_updates()
    }
}
