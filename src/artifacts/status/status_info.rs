use crate::areas::index::Index;
use crate::artifacts::branch::branch_table::BranchTable;
use crate::artifacts::objects::commit::Tree;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use colored::Colorize;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

pub type ChangeSet = BTreeMap<String, WorkspaceChangeType>;
pub type FileSet = BTreeSet<String>;

// Terminology:
// - staged files: files staged for addition
// - removed files: files staged for removal
// - unstaged changes: tracked or staged files whose working copy differs or is gone
// - untracked files: working files neither tracked nor staged for addition,
//   plus files staged for removal that were re-created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) branches: Vec<String>,
    pub(crate) current_branch: String,
    pub(crate) staged_files: FileSet,
    pub(crate) removed_files: FileSet,
    pub(crate) workspace_changeset: ChangeSet,
    pub(crate) untracked_files: FileSet,
}

impl StatusInfo {
    /// Compare the working directory with the staging index and the head tree
    ///
    /// `workspace_files` lists the files on disk; `workspace_oid` computes the
    /// blob id a working file would be stored under.
    pub fn inspect(
        table: &BranchTable,
        head_tree: &Tree,
        index: &Index,
        workspace_files: &[String],
        workspace_oid: impl Fn(&str) -> anyhow::Result<ObjectId>,
    ) -> anyhow::Result<Self> {
        let on_disk = workspace_files.iter().cloned().collect::<FileSet>();
        let mut workspace_changeset = ChangeSet::new();

        for (name, staged_oid) in index.additions() {
            Self::check_against_workspace(
                name,
                staged_oid,
                &on_disk,
                &workspace_oid,
                &mut workspace_changeset,
            )?;
        }
        for (name, tracked_oid) in head_tree {
            if index.staged_addition(name).is_some() || index.is_staged_for_removal(name) {
                continue;
            }
            Self::check_against_workspace(
                name,
                tracked_oid,
                &on_disk,
                &workspace_oid,
                &mut workspace_changeset,
            )?;
        }

        let untracked_files = on_disk
            .iter()
            .filter(|name| {
                let tracked = head_tree.contains_key(*name) || index.staged_addition(name).is_some();
                !tracked || index.is_staged_for_removal(name)
            })
            .cloned()
            .collect();

        Ok(StatusInfo {
            branches: table.iter().map(|(name, _)| name.to_string()).collect(),
            current_branch: table.current_branch().to_string(),
            staged_files: index.additions().keys().cloned().collect(),
            removed_files: index.removals().keys().cloned().collect(),
            workspace_changeset,
            untracked_files,
        })
    }

    fn check_against_workspace(
        name: &str,
        expected_oid: &ObjectId,
        on_disk: &FileSet,
        workspace_oid: &impl Fn(&str) -> anyhow::Result<ObjectId>,
        changeset: &mut ChangeSet,
    ) -> anyhow::Result<()> {
        if !on_disk.contains(name) {
            changeset.insert(name.to_string(), WorkspaceChangeType::Deleted);
        } else if &workspace_oid(name)? != expected_oid {
            changeset.insert(name.to_string(), WorkspaceChangeType::Modified);
        }

        Ok(())
    }

    /// Write the five status sections, each sorted and followed by a blank line
    pub fn render(&self, writer: &mut dyn Write) -> anyhow::Result<()> {
        writeln!(writer, "=== Branches ===")?;
        for branch in &self.branches {
            if branch == &self.current_branch {
                writeln!(writer, "{}", format!("*{}", branch).green())?;
            } else {
                writeln!(writer, "{}", branch)?;
            }
        }
        writeln!(writer)?;

        writeln!(writer, "=== Staged Files ===")?;
        for file in &self.staged_files {
            writeln!(writer, "{}", file.green())?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Removed Files ===")?;
        for file in &self.removed_files {
            writeln!(writer, "{}", file.red())?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Modifications Not Staged For Commit ===")?;
        for (file, change) in &self.workspace_changeset {
            writeln!(writer, "{}", change.describe(file))?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Untracked Files ===")?;
        for file in &self.untracked_files {
            writeln!(writer, "{}", file.red())?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
