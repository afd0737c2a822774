//! Repository context
//!
//! A [`Repository`] bundles every persistent area of one working directory.
//! The mutable state (branch table, staging index, remote registry) is loaded
//! once when the repository is opened, mutated in memory by exactly one
//! command, and written back by [`Repository::persist`]. A command that fails
//! returns before `persist` runs, leaving the persisted state untouched.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::remotes::Remotes;
use crate::areas::workspace::{METADATA_DIR, Workspace};
use crate::artifacts::branch::branch_table::BranchTable;
use crate::artifacts::merge::split_finder::SplitFinder;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use std::cell::{RefCell, RefMut};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    index: Index,
    refs: Refs,
    remotes: Remotes,
    workspace: Workspace,
    branches: BranchTable,
}

/// Paths of the persistent areas under a metadata directory
pub(crate) struct AreaPaths {
    pub objects: PathBuf,
    pub index: PathBuf,
    pub remotes: PathBuf,
}

impl AreaPaths {
    pub(crate) fn under(metadata_path: &Path) -> Self {
        AreaPaths {
            objects: metadata_path.join("objects"),
            index: metadata_path.join("index"),
            remotes: metadata_path.join("remotes"),
        }
    }
}

impl Repository {
    /// Open the repository rooted at `path` and load its mutable state
    pub fn open(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path.canonicalize()?;
        let metadata_path = path.join(METADATA_DIR);
        if !metadata_path.is_dir() {
            return Err(GitletError::NotInitialized.into());
        }

        let refs = Refs::new(metadata_path.clone().into_boxed_path());
        let branches = refs.load_table()?;

        Self::assemble(path, writer, refs, branches)
    }

    pub(crate) fn assemble(
        path: PathBuf,
        writer: Box<dyn std::io::Write>,
        refs: Refs,
        branches: BranchTable,
    ) -> anyhow::Result<Self> {
        let paths = AreaPaths::under(&path.join(METADATA_DIR));

        let mut index = Index::new(paths.index.into_boxed_path());
        index.rehydrate()?;
        let mut remotes = Remotes::new(paths.remotes.into_boxed_path());
        remotes.rehydrate()?;

        Ok(Repository {
            database: Database::new(paths.objects.into_boxed_path()),
            workspace: Workspace::new(path.clone().into_boxed_path()),
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index,
            refs,
            remotes,
            branches,
        })
    }

    /// Write the branch table, staging index and remote registry back to disk
    pub fn persist(&mut self) -> anyhow::Result<()> {
        self.refs.store_table(&self.branches)?;
        self.index.write_updates()?;
        self.remotes.write_updates()?;
        self.writer().flush()?;

        Ok(())
    }

    /// Write only the branch table back to disk
    pub(crate) fn persist_branches(&self) -> anyhow::Result<()> {
        self.refs.store_table(&self.branches)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut Index {
        &mut self.index
    }

    pub fn branches(&self) -> &BranchTable {
        &self.branches
    }

    pub fn branches_mut(&mut self) -> &mut BranchTable {
        &mut self.branches
    }

    pub fn remotes(&self) -> &Remotes {
        &self.remotes
    }

    pub fn remotes_mut(&mut self) -> &mut Remotes {
        &mut self.remotes
    }

    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        self.database.load_commit(self.branches.head())
    }

    /// Resolve a full or abbreviated commit id
    pub fn resolve_commit_id(&self, commit_id: &str) -> anyhow::Result<ObjectId> {
        let mut candidates = self.database.find_commits_by_prefix(commit_id)?;

        match candidates.len() {
            1 => Ok(candidates.remove(0)),
            _ => Err(GitletError::NoSuchCommit.into()),
        }
    }

    /// Graph traversals over this repository's commits
    pub fn split_finder(
        &self,
    ) -> SplitFinder<impl Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>> + '_> {
        SplitFinder::new(|commit_id| Ok(self.database.load_commit(commit_id)?.parents()))
    }
}
