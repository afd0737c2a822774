//! Branch references
//!
//! Branches are human-readable names pointing to commits. They are persisted
//! as plain files and loaded into a [`BranchTable`] for the duration of one
//! command.
//!
//! ## File Format
//!
//! - `HEAD`: `ref: refs/heads/<branch>`, naming the current branch
//! - `refs/heads/<branch>`: the 40-character id of the branch tip
//!
//! Branch names may contain `/` (remote tracking branches such as
//! `origin/master`); those live in nested directories which are pruned once
//! empty.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::branch_table::BranchTable;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::collections::BTreeMap;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

/// Branch references manager
///
/// Reads and writes the ref files under a repository's metadata directory.
/// Writes happen under an exclusive file lock.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.gitlet`)
    path: Box<Path>,
}

/// Regex pattern for parsing the symbolic HEAD reference
const SYMREF_REGEX: &str = r"^ref: refs/heads/(.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

impl Refs {
    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }

    /// Load HEAD and every branch tip
    pub fn load_table(&self) -> anyhow::Result<BranchTable> {
        let current = self.read_current_branch()?;
        let branches = self.read_branches()?;

        BranchTable::from_parts(branches, current)
    }

    /// Persist the table: write changed tips, drop deleted branches, point HEAD
    pub fn store_table(&self, table: &BranchTable) -> anyhow::Result<()> {
        let persisted = self.read_branches()?;

        for (name, tip) in table.iter() {
            if persisted.get(name) != Some(tip) {
                let branch_path = self.heads_path().join(name.as_ref()).into_boxed_path();
                self.update_ref_file(branch_path, tip.as_ref().to_string())?;
            }
        }

        for name in persisted.keys().filter(|name| !table.contains(name)) {
            self.delete_branch_file(name)?;
        }

        let head_content = format!("ref: refs/heads/{}", table.current_branch());
        if self.read_head_content()?.as_deref() != Some(head_content.as_str()) {
            self.update_ref_file(self.head_path(), head_content)?;
        }

        Ok(())
    }

    fn read_head_content(&self) -> anyhow::Result<Option<String>> {
        let head_path = self.head_path();
        if !head_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;
        Ok(Some(content.trim().to_string()))
    }

    fn read_current_branch(&self) -> anyhow::Result<BranchName> {
        let content = self
            .read_head_content()?
            .ok_or_else(|| anyhow::anyhow!("HEAD reference is missing"))?;

        let symref_match = regex::Regex::new(SYMREF_REGEX)?
            .captures(&content)
            .ok_or_else(|| anyhow::anyhow!("HEAD does not name a branch: {content}"))?;

        BranchName::try_parse(symref_match[1].to_string())
    }

    fn read_branches(&self) -> anyhow::Result<BTreeMap<BranchName, ObjectId>> {
        let heads_path = self.heads_path();
        if !heads_path.exists() {
            return Ok(BTreeMap::new());
        }

        WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| {
                let relative_path = entry.path().strip_prefix(heads_path.as_ref())?;
                let name = relative_path
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                let name = BranchName::try_parse(name)?;
                let tip = self.read_ref_file(entry.path())?;

                Ok((name, tip))
            })
            .collect()
    }

    fn read_ref_file(&self, path: &Path) -> anyhow::Result<ObjectId> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;

        ObjectId::try_parse(content.trim().to_string())
            .with_context(|| format!("corrupt ref file at {:?}", path))
    }

    fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        // create all the parent directories if they don't exist
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.clone())
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    fn delete_branch_file(&self, name: &BranchName) -> anyhow::Result<()> {
        let branch_path = self.heads_path().join(name.as_ref());

        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;
        self.prune_branch_empty_parent_dirs(&branch_path)
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.heads_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }
}
