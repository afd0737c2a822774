use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;

impl Repository {
    /// Restore `name` from the current commit; staging is left alone
    pub fn checkout_file(&mut self, name: &str) -> anyhow::Result<()> {
        let head = self.branches().head().clone();

        self.restore_file(&head, name)
    }

    /// Restore `name` from the commit `commit_id` (full or abbreviated)
    pub fn checkout_file_at(&mut self, commit_id: &str, name: &str) -> anyhow::Result<()> {
        let commit_id = self.resolve_commit_id(commit_id)?;

        self.restore_file(&commit_id, name)
    }

    /// Switch to `branch_name`, replacing the working files with its tip
    pub fn checkout_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name =
            BranchName::try_parse(branch_name.to_string()).map_err(|_| GitletError::NoSuchBranch)?;
        let tip = self
            .branches()
            .get(&branch_name)
            .cloned()
            .ok_or(GitletError::NoSuchBranch)?;
        if self.branches().is_current(&branch_name) {
            return Err(GitletError::AlreadyOnBranch.into());
        }

        let target = self.database().load_commit(&tip)?;
        self.migrate_to(&target)?;
        self.branches_mut().switch_to(&branch_name)?;

        Ok(())
    }

    fn restore_file(&mut self, commit_id: &ObjectId, name: &str) -> anyhow::Result<()> {
        let commit = self.database().load_commit(commit_id)?;
        let blob_id = commit.blob_for(name).ok_or(GitletError::FileNotInCommit)?;
        let blob = self.database().load_blob(blob_id)?;

        self.workspace().write_file(name, blob.content())
    }

    /// Replace the working files of HEAD with those of `target` and clear
    /// the staging index
    ///
    /// Fails without touching anything if an untracked file is in the way.
    /// Moving branch pointers is left to the caller.
    pub(crate) fn migrate_to(&mut self, target: &Commit) -> anyhow::Result<()> {
        let current = self.head_commit()?;
        let migration = Migration::plan(current.tree(), target.tree(), |name| {
            self.workspace().exists(name)
        })?;

        self.workspace()
            .apply_migration(&migration, |oid| self.database().load_blob(oid))?;
        self.index_mut().clear();

        Ok(())
    }
}
