//! Working-tree migration between two commits
//!
//! Moving the working directory from the current commit's tree to a target
//! tree is planned up front:
//!
//! 1. Check that no untracked file would be overwritten
//! 2. Delete files only the current commit tracks
//! 3. Write every file the target commit tracks
//!
//! Nothing is touched on disk when the check fails.

use crate::artifacts::objects::commit::Tree;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GitletError;
use std::collections::BTreeMap;

/// Type of file system action required for checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ActionType {
    /// Delete a file tracked only by the current commit
    Delete,
    /// Write a file tracked only by the target commit
    Add,
    /// Overwrite a file tracked by both commits
    Modify,
}

/// Planned actions grouped by type, each listing file names in order
pub type ActionsSet = BTreeMap<ActionType, Vec<(String, Option<ObjectId>)>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    actions: ActionsSet,
}

impl Migration {
    /// Plan the move from `current` to `target`
    ///
    /// `on_disk` reports whether a file name exists in the working directory.
    pub fn plan(
        current: &Tree,
        target: &Tree,
        on_disk: impl Fn(&str) -> bool,
    ) -> anyhow::Result<Self> {
        check_untracked_overwrites(current, target, on_disk)?;

        let mut actions = ActionsSet::from([
            (ActionType::Delete, Vec::new()),
            (ActionType::Add, Vec::new()),
            (ActionType::Modify, Vec::new()),
        ]);

        for name in current.keys().filter(|name| !target.contains_key(*name)) {
            actions
                .entry(ActionType::Delete)
                .or_default()
                .push((name.clone(), None));
        }
        for (name, oid) in target {
            let action = if current.contains_key(name) {
                ActionType::Modify
            } else {
                ActionType::Add
            };
            actions
                .entry(action)
                .or_default()
                .push((name.clone(), Some(oid.clone())));
        }

        Ok(Migration { actions })
    }

    pub fn actions(&self) -> &ActionsSet {
        &self.actions
    }
}

/// Fail if a file tracked by `target` but not by `current` exists on disk
///
/// Such a file is untracked and writing `target` out would destroy it.
pub fn check_untracked_overwrites(
    current: &Tree,
    target: &Tree,
    on_disk: impl Fn(&str) -> bool,
) -> anyhow::Result<()> {
    let in_the_way = target
        .keys()
        .any(|name| !current.contains_key(name) && on_disk(name));

    if in_the_way {
        return Err(GitletError::UntrackedFileConflict.into());
    }

    Ok(())
}
