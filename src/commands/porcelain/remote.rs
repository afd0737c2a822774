//! Transfer between repositories on the same filesystem
//!
//! A remote is another repository's metadata directory. `push` and `fetch`
//! copy every commit the destination lacks, together with the blobs those
//! commits track, then move one branch pointer on the receiving side.
//! The pointer only moves once every object has been written.

use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::repository::{AreaPaths, Repository};
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::merge::split_finder::SplitFinder;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::GitletError;
use std::path::{Path, PathBuf};

/// The stores of a remote repository
struct RemoteRepository {
    database: Database,
    refs: Refs,
}

impl RemoteRepository {
    fn open(metadata_path: &Path) -> anyhow::Result<Self> {
        if !metadata_path.is_dir() {
            return Err(GitletError::RemoteNotFound.into());
        }

        Ok(RemoteRepository {
            database: Database::new(AreaPaths::under(metadata_path).objects.into_boxed_path()),
            refs: Refs::new(metadata_path.to_path_buf().into_boxed_path()),
        })
    }
}

impl Repository {
    /// Register `path` as the metadata directory of the remote `name`
    pub fn add_remote(&mut self, name: &str, path: &str) -> anyhow::Result<()> {
        self.remotes_mut().add(name, PathBuf::from(path))
    }

    pub fn rm_remote(&mut self, name: &str) -> anyhow::Result<()> {
        self.remotes_mut().remove(name)
    }

    /// Append the current branch's history to `branch_name` of the remote
    ///
    /// The remote branch must already be in the current head's history,
    /// otherwise the remote has work that has to be pulled first. A branch
    /// the remote lacks is created.
    pub fn push(&mut self, remote_name: &str, branch_name: &str) -> anyhow::Result<()> {
        let remote = self.open_remote(remote_name)?;
        let branch_name = BranchName::try_parse(branch_name.to_string())?;
        let head_oid = self.branches().head().clone();
        let mut remote_branches = remote.refs.load_table()?;

        if let Some(remote_tip) = remote_branches.get(&branch_name) {
            if !self
                .split_finder()
                .primary_chain_contains(&head_oid, remote_tip)?
            {
                return Err(GitletError::NonFastForward.into());
            }
        }

        let missing = self.split_finder().reachable_from(&head_oid, |commit_id| {
            remote.database.contains(ObjectType::Commit, commit_id)
        })?;
        copy_commits(self.database(), &remote.database, missing)?;

        remote_branches.set_tip(branch_name, head_oid);
        remote.refs.store_table(&remote_branches)
    }

    /// Copy `branch_name` of the remote into the local branch
    /// `<remote>/<branch>`
    pub fn fetch(&mut self, remote_name: &str, branch_name: &str) -> anyhow::Result<()> {
        let remote = self.open_remote(remote_name)?;
        let branch_name = BranchName::try_parse(branch_name.to_string())
            .map_err(|_| GitletError::RemoteBranchNotFound)?;
        let remote_branches = remote.refs.load_table()?;
        let remote_tip = remote_branches
            .get(&branch_name)
            .cloned()
            .ok_or(GitletError::RemoteBranchNotFound)?;

        let remote_graph =
            SplitFinder::new(|commit_id| Ok(remote.database.load_commit(commit_id)?.parents()));
        let missing = remote_graph.reachable_from(&remote_tip, |commit_id| {
            self.database().contains(ObjectType::Commit, commit_id)
        })?;
        copy_commits(&remote.database, self.database(), missing)?;

        let tracking_branch = BranchName::tracking(remote_name, &branch_name)?;
        let branches = self.branches();
        if !branches.contains(&tracking_branch) && branches.overlaps(&tracking_branch) {
            return Err(GitletError::BranchExists.into());
        }
        self.branches_mut().set_tip(tracking_branch, remote_tip);

        Ok(())
    }

    /// Fetch `branch_name` of the remote, then merge `<remote>/<branch>`
    ///
    /// The tracking branch is written before merging, so it survives a
    /// refused merge.
    pub fn pull(&mut self, remote_name: &str, branch_name: &str) -> anyhow::Result<()> {
        self.fetch(remote_name, branch_name)?;
        self.persist_branches()?;

        let tracking_branch = format!("{remote_name}/{branch_name}");
        self.merge(&tracking_branch)
    }

    fn open_remote(&self, remote_name: &str) -> anyhow::Result<RemoteRepository> {
        let remote_path = self
            .remotes()
            .get(remote_name)
            .ok_or(GitletError::RemoteNotFound)?;

        RemoteRepository::open(&self.path().join(remote_path))
    }
}

/// Copy `commit_ids` and the blobs they track from `source` to `destination`
///
/// Ids come in discovery order from the tip; they are written in reverse,
/// each commit after its blobs.
fn copy_commits(
    source: &Database,
    destination: &Database,
    commit_ids: Vec<ObjectId>,
) -> anyhow::Result<()> {
    for commit_id in commit_ids.into_iter().rev() {
        let commit = source.load_commit(&commit_id)?;

        for blob_id in commit.tree().values() {
            if !destination.contains(ObjectType::Blob, blob_id) {
                destination.store(&source.load_blob(blob_id)?)?;
            }
        }
        destination.store(&commit)?;
    }

    Ok(())
}
