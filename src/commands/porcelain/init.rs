use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::repository::{AreaPaths, Repository};
use crate::areas::workspace::METADATA_DIR;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::branch_table::BranchTable;
use crate::artifacts::objects::commit::Commit;
use crate::errors::GitletError;
use anyhow::Context;
use std::fs;
use std::path::Path;

impl Repository {
    /// Create a repository in `path`: the metadata layout, the initial commit
    /// and a `master` branch pointing at it
    pub fn init(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path.canonicalize()?;
        let metadata_path = path.join(METADATA_DIR);
        if metadata_path.exists() {
            return Err(GitletError::AlreadyInitialized.into());
        }
        let paths = AreaPaths::under(&metadata_path);

        let refs = Refs::new(metadata_path.clone().into_boxed_path());
        fs::create_dir_all(refs.heads_path())
            .context("Failed to create .gitlet/refs/heads directory")?;
        fs::create_dir_all(&paths.objects).context("Failed to create .gitlet/objects directory")?;
        fs::write(&paths.index, b"").context("Failed to create .gitlet/index file")?;

        let database = Database::new(paths.objects.into_boxed_path());
        let root_id = database
            .store(&Commit::initial())
            .context("Failed to store the initial commit")?;

        let branches = BranchTable::new(BranchName::default_branch(), root_id);
        refs.store_table(&branches)
            .context("Failed to create initial HEAD reference")?;

        Self::assemble(path, writer, refs, branches)
    }
}
