use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::check_untracked_overwrites;
use crate::artifacts::merge::resolution::{FileResolution, conflict_content, resolve_trees};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use bytes::Bytes;
use std::io::Write;

impl Repository {
    /// Merge the branch `branch_name` into the current branch
    pub fn merge(&mut self, branch_name: &str) -> anyhow::Result<()> {
        if !self.index().is_empty() {
            return Err(GitletError::UncommittedChanges.into());
        }

        let given_branch = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| GitletError::BranchNotFound)?;
        let given_oid = self
            .branches()
            .get(&given_branch)
            .cloned()
            .ok_or(GitletError::BranchNotFound)?;
        if self.branches().is_current(&given_branch) {
            return Err(GitletError::SelfMerge.into());
        }

        let head_oid = self.branches().head().clone();
        let head = self.head_commit()?;
        let given = self.database().load_commit(&given_oid)?;
        check_untracked_overwrites(head.tree(), given.tree(), |name| {
            self.workspace().exists(name)
        })?;

        let split_oid = self
            .split_finder()
            .find_split_point(&head_oid, &given_oid)?;

        if split_oid == given_oid {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }
        if split_oid == head_oid {
            self.migrate_to(&given)?;
            self.branches_mut().advance_head(given_oid);
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let split = self.database().load_commit(&split_oid)?;
        let mut conflicted = false;

        for (name, resolution) in resolve_trees(split.tree(), head.tree(), given.tree()) {
            match resolution {
                FileResolution::TakeGiven(blob_id) => {
                    let blob = self.database().load_blob(&blob_id)?;
                    self.workspace().write_file(&name, blob.content())?;
                    self.index_mut().stage_addition(&name, blob_id);
                }
                FileResolution::Remove(blob_id) => {
                    self.workspace().remove_file(&name)?;
                    self.index_mut().stage_removal(&name, blob_id);
                }
                FileResolution::Conflict { current, given } => {
                    let content = conflict_content(
                        &self.blob_content(current.as_ref())?,
                        &self.blob_content(given.as_ref())?,
                    );
                    let blob_id = self.database().store(&Blob::new(name.clone(), content.clone()))?;
                    self.workspace().write_file(&name, &content)?;
                    self.index_mut().stage_addition(&name, blob_id);
                    conflicted = true;
                }
            }
        }

        let message = format!(
            "Merged {} into {}.",
            given_branch,
            self.branches().current_branch()
        );
        self.commit_staged(&message, Some(given_oid))?;

        if conflicted {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }

    fn blob_content(&self, blob_id: Option<&ObjectId>) -> anyhow::Result<Bytes> {
        match blob_id {
            Some(blob_id) => Ok(self.database().load_blob(blob_id)?.content().clone()),
            None => Ok(Bytes::new()),
        }
    }
}
