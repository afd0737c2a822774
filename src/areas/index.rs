//! Gitlet index (staging area)
//!
//! The index records the changes that the next commit will apply on top of
//! the current commit's tree: files staged for addition and files staged for
//! removal. A file name is never staged both ways at once.
//!
//! The index is loaded at command entry with [`Index::rehydrate`] and written
//! back with [`Index::write_updates`] when something changed.

use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::{IndexEntry, StageAction};
use crate::artifacts::objects::commit::Tree;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.gitlet/index`)
    path: Box<Path>,
    /// Files staged for addition, with the blob they will point to
    adding: BTreeMap<String, ObjectId>,
    /// Files staged for removal, with the blob they pointed to
    removing: BTreeMap<String, ObjectId>,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            adding: BTreeMap::new(),
            removing: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index from disk
    ///
    /// A missing or empty file is an empty index. Acquires a shared lock on
    /// the index file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.adding.clear();
        self.removing.clear();
        self.changed = false;

        if !self.path().exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new().read(true).open(self.path())?;
        if index_file.metadata()?.len() == 0 {
            return Ok(());
        }
        let lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        let mut reader = Checksum::new(lock);
        let entries = reader.read_verified()?;

        for line in entries.lines() {
            let entry = IndexEntry::deserialize(std::io::Cursor::new(line))?;
            match entry.action {
                StageAction::Add => self.adding.insert(entry.name, entry.oid),
                StageAction::Remove => self.removing.insert(entry.name, entry.oid),
            };
        }

        Ok(())
    }

    /// Persist the index if it changed since it was loaded
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())?;
        let lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        let mut writer = Checksum::new(lock);
        for entry in self.entries() {
            writer.write(&entry.serialize()?)?;
        }
        writer.write_checksum()?;
        self.changed = false;

        Ok(())
    }

    /// Stage `name` for addition, cancelling any pending removal
    pub fn stage_addition(&mut self, name: &str, oid: ObjectId) {
        self.removing.remove(name);
        self.adding.insert(name.to_string(), oid);
        self.changed = true;
    }

    /// Stage `name` for removal, cancelling any pending addition
    pub fn stage_removal(&mut self, name: &str, oid: ObjectId) {
        self.adding.remove(name);
        self.removing.insert(name.to_string(), oid);
        self.changed = true;
    }

    /// Drop a pending addition; returns whether there was one
    pub fn unstage_addition(&mut self, name: &str) -> bool {
        let removed = self.adding.remove(name).is_some();
        self.changed |= removed;
        removed
    }

    /// Drop a pending removal; returns whether there was one
    pub fn unstage_removal(&mut self, name: &str) -> bool {
        let removed = self.removing.remove(name).is_some();
        self.changed |= removed;
        removed
    }

    pub fn staged_addition(&self, name: &str) -> Option<&ObjectId> {
        self.adding.get(name)
    }

    pub fn is_staged_for_removal(&self, name: &str) -> bool {
        self.removing.contains_key(name)
    }

    pub fn additions(&self) -> &BTreeMap<String, ObjectId> {
        &self.adding
    }

    pub fn removals(&self) -> &BTreeMap<String, ObjectId> {
        &self.removing
    }

    pub fn is_empty(&self) -> bool {
        self.adding.is_empty() && self.removing.is_empty()
    }

    pub fn clear(&mut self) {
        self.changed |= !self.is_empty();
        self.adding.clear();
        self.removing.clear();
    }

    /// The tree obtained by applying the staged changes on top of `base`
    pub fn apply_to(&self, base: &Tree) -> Tree {
        let mut tree = base.clone();

        for (name, oid) in &self.adding {
            tree.insert(name.clone(), oid.clone());
        }
        for name in self.removing.keys() {
            tree.remove(name);
        }

        tree
    }

    fn entries(&self) -> impl Iterator<Item = IndexEntry> + '_ {
        let additions = self
            .adding
            .iter()
            .map(|(name, oid)| IndexEntry::new(StageAction::Add, oid.clone(), name.clone()));
        let removals = self
            .removing
            .iter()
            .map(|(name, oid)| IndexEntry::new(StageAction::Remove, oid.clone(), name.clone()));

        additions.chain(removals)
    }
}
