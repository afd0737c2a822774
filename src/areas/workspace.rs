use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the repository metadata directory
pub const METADATA_DIR: &str = ".gitlet";

const IGNORED_PATHS: [&str; 3] = [METADATA_DIR, ".", ".."];

/// Plain files at the top of the working directory
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.file_path(name).is_file()
    }

    /// Names of every regular file in the working directory, sorted
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut names = WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .filter(|name| !IGNORED_PATHS.contains(&name.as_str()))
            .collect::<Vec<_>>();
        names.sort();

        Ok(names)
    }

    pub fn read_file(&self, name: &str) -> anyhow::Result<Bytes> {
        let file_path = self.file_path(name);

        let content = std::fs::read(&file_path)
            .with_context(|| format!("Failed to read file: {:?}", file_path))?;

        Ok(Bytes::from(content))
    }

    /// Snapshot a working file as a blob
    pub fn parse_blob(&self, name: &str) -> anyhow::Result<Blob> {
        let content = self.read_file(name)?;
        Ok(Blob::new(name.to_string(), content))
    }

    pub fn write_file(&self, name: &str, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.file_path(name);

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;
        file.write_all(content)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        Ok(())
    }

    /// Delete a working file; a file that is already gone is not an error
    pub fn remove_file(&self, name: &str) -> anyhow::Result<()> {
        let file_path = self.file_path(name);

        match std::fs::remove_file(&file_path) {
            Err(error) if error.kind() != std::io::ErrorKind::NotFound => {
                Err(error).with_context(|| format!("Failed to remove file: {:?}", file_path))
            }
            _ => Ok(()),
        }
    }

    // Deletions go first so that a planned write is never undone.
    pub fn apply_migration(
        &self,
        migration: &Migration,
        load_blob: impl Fn(&ObjectId) -> anyhow::Result<Blob>,
    ) -> anyhow::Result<()> {
        for action in [ActionType::Delete, ActionType::Add, ActionType::Modify] {
            let entries = migration
                .actions()
                .get(&action)
                .ok_or_else(|| anyhow::anyhow!("Invalid action type"))?;

            for (name, oid) in entries {
                match (action, oid) {
                    (ActionType::Delete, None) => self.remove_file(name)?,
                    (ActionType::Add | ActionType::Modify, Some(oid)) => {
                        let blob = load_blob(oid)?;
                        self.write_file(name, blob.content())?;
                    }
                    _ => anyhow::bail!("Invalid action and entry combination"),
                }
            }
        }

        Ok(())
    }
}
