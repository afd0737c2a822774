use crate::areas::repository::Repository;
use crate::artifacts::log::write_record;
use crate::errors::GitletError;
use std::io::Write;

impl Repository {
    /// Print the current branch's history along primary parents, newest first
    pub fn log(&self) -> anyhow::Result<()> {
        let mut next = Some(self.branches().head().clone());

        while let Some(commit_id) = next {
            let commit = self.database().load_commit(&commit_id)?;
            write_record(&mut **self.writer(), &commit_id, &commit)?;
            next = commit.parent().cloned();
        }

        Ok(())
    }

    /// Print every commit ever made, in commit id order
    pub fn global_log(&self) -> anyhow::Result<()> {
        for commit_id in self.database().list_commits()? {
            let commit = self.database().load_commit(&commit_id)?;
            write_record(&mut **self.writer(), &commit_id, &commit)?;
        }

        Ok(())
    }

    /// Print the id of every commit whose message is exactly `message`
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let mut found = false;

        for commit_id in self.database().list_commits()? {
            let commit = self.database().load_commit(&commit_id)?;
            if commit.message() == message {
                writeln!(self.writer(), "{}", commit_id)?;
                found = true;
            }
        }

        if !found {
            return Err(GitletError::NoCommitWithMessage.into());
        }

        Ok(())
    }
}
