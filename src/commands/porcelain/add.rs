use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::errors::GitletError;

impl Repository {
    /// Stage the working copy of `name` for the next commit
    ///
    /// A file identical to the current commit's version is not staged; any
    /// pending addition or removal of it is dropped instead.
    pub fn add(&mut self, name: &str) -> anyhow::Result<()> {
        if !self.workspace().exists(name) {
            return Err(GitletError::FileNotFound.into());
        }

        let blob = self.workspace().parse_blob(name)?;
        let blob_id = blob.object_id()?;
        let head = self.head_commit()?;

        if head.blob_for(name) == Some(&blob_id) {
            self.index_mut().unstage_addition(name);
            self.index_mut().unstage_removal(name);
        } else {
            self.database().store(&blob)?;
            self.index_mut().stage_addition(name, blob_id);
        }

        Ok(())
    }
}
