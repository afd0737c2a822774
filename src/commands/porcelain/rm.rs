use crate::areas::repository::Repository;
use crate::errors::GitletError;

impl Repository {
    /// Unstage `name`, and if the current commit tracks it, stage its removal
    /// and delete it from the working directory
    pub fn rm(&mut self, name: &str) -> anyhow::Result<()> {
        let head = self.head_commit()?;
        let tracked_oid = head.blob_for(name).cloned();

        if tracked_oid.is_none() && self.index().staged_addition(name).is_none() {
            return Err(GitletError::NoReasonToRemove.into());
        }

        self.index_mut().unstage_addition(name);
        if let Some(tracked_oid) = tracked_oid {
            self.index_mut().stage_removal(name, tracked_oid);
            self.workspace().remove_file(name)?;
        }

        Ok(())
    }
}
