use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;

impl Repository {
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        self.commit_staged(message, None)?;

        Ok(())
    }

    /// Record the staged changes as a child of HEAD and advance the current
    /// branch to it
    ///
    /// Merges pass the tip they merged in as `second_parent`; a merge commit
    /// is recorded even when reconciliation staged nothing.
    pub(crate) fn commit_staged(
        &mut self,
        message: &str,
        second_parent: Option<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        if second_parent.is_none() && self.index().is_empty() {
            return Err(GitletError::NothingToCommit.into());
        }
        if message.trim().is_empty() {
            return Err(GitletError::EmptyMessage.into());
        }

        let parent = self.branches().head().clone();
        let head = self.head_commit()?;
        let tree = self.index().apply_to(head.tree());

        let commit = Commit::new(
            Some(parent),
            second_parent,
            tree,
            Commit::load_timestamp_from_env(),
            message.to_string(),
        );
        let commit_id = self.database().store(&commit)?;

        self.branches_mut().advance_head(commit_id.clone());
        self.index_mut().clear();

        Ok(commit_id)
    }
}
