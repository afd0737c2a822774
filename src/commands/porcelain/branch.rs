use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::GitletError;

impl Repository {
    /// Create a branch pointing at HEAD without switching to it
    pub fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let head = self.branches().head().clone();

        self.branches_mut().create(branch_name, head)
    }

    /// Delete a branch pointer; its commits stay in the store
    pub fn rm_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| GitletError::BranchNotFound)?;

        self.branches_mut().remove(&branch_name)?;

        Ok(())
    }
}
