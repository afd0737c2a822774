//! Remote registry
//!
//! Maps remote names to the metadata directory of another repository on the
//! local filesystem. Stored in `.gitlet/remotes`, one `<name> <path>` line per
//! remote. The registry is local bookkeeping and is never versioned.

use crate::errors::GitletError;
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Remotes {
    /// Path to the registry file
    path: Box<Path>,
    remotes: BTreeMap<String, PathBuf>,
    changed: bool,
}

impl Remotes {
    pub fn new(path: Box<Path>) -> Self {
        Remotes {
            path,
            remotes: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.remotes.clear();
        self.changed = false;

        if !self.path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read remotes at {:?}", self.path))?;
        for line in content.lines().filter(|line| !line.is_empty()) {
            let (name, path) = line
                .split_once(' ')
                .with_context(|| format!("malformed remote entry: {line}"))?;
            self.remotes.insert(name.to_string(), PathBuf::from(path));
        }

        Ok(())
    }

    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let content = self
            .remotes
            .iter()
            .map(|(name, path)| format!("{} {}\n", name, path.display()))
            .collect::<String>();
        std::fs::write(&self.path, content)
            .with_context(|| format!("failed to write remotes at {:?}", self.path))?;
        self.changed = false;

        Ok(())
    }

    pub fn add(&mut self, name: &str, path: PathBuf) -> anyhow::Result<()> {
        if name.is_empty() || name.contains(char::is_whitespace) {
            anyhow::bail!("invalid remote name: {name:?}");
        }
        if self.remotes.contains_key(name) {
            return Err(GitletError::RemoteExists.into());
        }

        self.remotes.insert(name.to_string(), path);
        self.changed = true;
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> anyhow::Result<()> {
        self.remotes
            .remove(name)
            .ok_or(GitletError::NoSuchRemote)?;
        self.changed = true;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Path> {
        self.remotes.get(name).map(PathBuf::as_path)
    }
}
