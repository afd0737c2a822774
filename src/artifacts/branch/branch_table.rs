//! In-memory branch/ref table
//!
//! The table is loaded from `.gitlet/refs` at the start of a command, mutated
//! in memory and persisted back at the end. `head` always equals the tip of
//! the current branch: every mutation that touches the current branch updates
//! both together.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchTable {
    branches: BTreeMap<BranchName, ObjectId>,
    current: BranchName,
    head: ObjectId,
}

impl BranchTable {
    /// A fresh table with a single branch pointing at `root`
    pub fn new(current: BranchName, root: ObjectId) -> Self {
        BranchTable {
            branches: BTreeMap::from([(current.clone(), root.clone())]),
            current,
            head: root,
        }
    }

    /// Rebuild a table from persisted parts
    ///
    /// Fails if the current branch has no tip.
    pub fn from_parts(
        branches: BTreeMap<BranchName, ObjectId>,
        current: BranchName,
    ) -> anyhow::Result<Self> {
        let head = branches
            .get(&current)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("current branch {current} has no commit"))?;

        Ok(BranchTable {
            branches,
            current,
            head,
        })
    }

    pub fn head(&self) -> &ObjectId {
        &self.head
    }

    pub fn current_branch(&self) -> &BranchName {
        &self.current
    }

    pub fn is_current(&self, name: &BranchName) -> bool {
        &self.current == name
    }

    pub fn get(&self, name: &BranchName) -> Option<&ObjectId> {
        self.branches.get(name)
    }

    pub fn contains(&self, name: &BranchName) -> bool {
        self.branches.contains_key(name)
    }

    /// Branches in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = (&BranchName, &ObjectId)> {
        self.branches.iter()
    }

    /// Whether `name` would share a ref path with an existing branch, either
    /// nesting under it (`a/b` next to `a`) or enclosing it
    pub fn overlaps(&self, name: &BranchName) -> bool {
        let name = name.as_ref();

        self.branches.keys().any(|existing| {
            let existing = existing.as_ref();
            existing == name
                || name.starts_with(&format!("{existing}/"))
                || existing.starts_with(&format!("{name}/"))
        })
    }

    pub fn create(&mut self, name: BranchName, tip: ObjectId) -> anyhow::Result<()> {
        if self.overlaps(&name) {
            return Err(GitletError::BranchExists.into());
        }

        self.branches.insert(name, tip);
        Ok(())
    }

    pub fn remove(&mut self, name: &BranchName) -> anyhow::Result<ObjectId> {
        if self.is_current(name) {
            return Err(GitletError::CannotRemoveCurrentBranch.into());
        }

        self.branches
            .remove(name)
            .ok_or_else(|| GitletError::BranchNotFound.into())
    }

    /// Point `name` at `tip`, creating the branch if needed
    pub fn set_tip(&mut self, name: BranchName, tip: ObjectId) {
        if self.is_current(&name) {
            self.head = tip.clone();
        }
        self.branches.insert(name, tip);
    }

    /// Move the current branch, and with it HEAD, to `tip`
    pub fn advance_head(&mut self, tip: ObjectId) {
        self.set_tip(self.current.clone(), tip);
    }

    /// Make `name` the current branch
    pub fn switch_to(&mut self, name: &BranchName) -> anyhow::Result<()> {
        let tip = self.branches.get(name).ok_or(GitletError::NoSuchBranch)?;

        self.head = tip.clone();
        self.current = name.clone();
        Ok(())
    }
}
