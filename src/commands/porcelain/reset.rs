use crate::areas::repository::Repository;

impl Repository {
    /// Check out the commit `commit_id` and move the current branch to it
    pub fn reset(&mut self, commit_id: &str) -> anyhow::Result<()> {
        let commit_id = self.resolve_commit_id(commit_id)?;
        let target = self.database().load_commit(&commit_id)?;

        self.migrate_to(&target)?;
        self.branches_mut().advance_head(commit_id);

        Ok(())
    }
}
