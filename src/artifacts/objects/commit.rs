//! Gitlet commit object
//!
//! Commits are immutable nodes of the history graph. Each one owns its tree
//! (the mapping from file name to blob id), a primary parent, an optional
//! second parent recorded by merges, a message and a timestamp.
//!
//! Commits never hold other commits, only their ids; graph code resolves
//! parents through the object store on demand.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! parent <second-parent-sha>
//! date <unix-timestamp> <timezone>
//! file <blob-sha> <file name>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// Message of the root commit every repository starts from
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// Environment variable pinning the timestamp of new commits
pub const DATE_ENV_VAR: &str = "GITLET_DATE";

/// File name -> blob id mapping owned by a commit
pub type Tree = BTreeMap<String, ObjectId>;

/// Gitlet commit object
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Primary parent (None only for the initial commit)
    parent: Option<ObjectId>,
    /// Second parent, set on merge commits
    second_parent: Option<ObjectId>,
    /// Snapshot of tracked files
    tree: Tree,
    /// Creation time
    timestamp: DateTime<FixedOffset>,
    /// Commit message
    message: String,
}

impl Commit {
    pub fn new(
        parent: Option<ObjectId>,
        second_parent: Option<ObjectId>,
        tree: Tree,
        timestamp: DateTime<FixedOffset>,
        message: String,
    ) -> Self {
        Commit {
            parent,
            second_parent,
            tree,
            timestamp,
            message,
        }
    }

    /// The root commit: no parent, empty tree, Unix epoch timestamp
    ///
    /// Every repository builds the exact same initial commit, so every
    /// repository shares the same root id.
    pub fn initial() -> Self {
        let epoch = DateTime::<chrono::Utc>::UNIX_EPOCH.fixed_offset();

        Commit::new(
            None,
            None,
            Tree::new(),
            epoch,
            INITIAL_COMMIT_MESSAGE.to_string(),
        )
    }

    /// Load the timestamp for a new commit
    ///
    /// Reads GITLET_DATE if set (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`),
    /// otherwise uses the current local time.
    pub fn load_timestamp_from_env() -> DateTime<FixedOffset> {
        std::env::var(DATE_ENV_VAR)
            .ok()
            .and_then(|date_str| {
                DateTime::parse_from_rfc2822(&date_str)
                    .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                    .ok()
            })
            .unwrap_or_else(|| chrono::Local::now().fixed_offset())
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn second_parent(&self) -> Option<&ObjectId> {
        self.second_parent.as_ref()
    }

    /// Parent ids, primary first
    pub fn parents(&self) -> Vec<ObjectId> {
        self.parent
            .iter()
            .chain(self.second_parent.iter())
            .cloned()
            .collect()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn blob_for(&self, filename: &str) -> Option<&ObjectId> {
        self.tree.get(filename)
    }

    /// Timestamp in human-readable form, e.g. "Thu Jan 1 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    fn tree_representation(&self) -> String {
        let entries = self
            .tree
            .iter()
            .map(|(name, oid)| format!("{name}={oid}"))
            .collect::<Vec<_>>()
            .join(", ");

        format!("{{{entries}}}")
    }

    fn content_lines(&self) -> Vec<String> {
        let mut lines = vec![];

        for parent in self.parents() {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        lines.push(format!(
            "date {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for (name, oid) in &self.tree {
            lines.push(format!("file {} {}", oid.as_ref(), name));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines
    }
}

fn parse_date(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    DateTime::parse_from_str(value, "%s %z")
        .with_context(|| format!("Invalid commit object: malformed date '{value}'"))
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let object_content = self.content_lines().join("\n");

        let mut content_bytes = Vec::new();
        content_bytes.write_all(object_content.as_bytes())?;

        let mut commit_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), content_bytes.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8(content)?;
        let mut lines = content.split('\n');

        // Parse all parent lines (there can be 0, 1 or 2 parents)
        let mut parents = Vec::new();
        let mut next_line = lines
            .next()
            .context("Invalid commit object: missing date line")?;

        while let Some(parent_oid) = next_line.strip_prefix("parent ") {
            parents.push(ObjectId::try_parse(parent_oid.to_string())?);

            next_line = lines
                .next()
                .context("Invalid commit object: missing date line")?;
        }

        let date = next_line
            .strip_prefix("date ")
            .context("Invalid commit object: invalid date line")?;
        let timestamp = parse_date(date)?;

        let mut tree = Tree::new();
        for line in lines.by_ref() {
            if line.is_empty() {
                break;
            }

            let entry = line
                .strip_prefix("file ")
                .context("Invalid commit object: invalid file line")?;
            let (oid, name) = entry
                .split_once(' ')
                .context("Invalid commit object: malformed file line")?;
            tree.insert(name.to_string(), ObjectId::try_parse(oid.to_string())?);
        }

        let message = lines.collect::<Vec<&str>>().join("\n");

        let mut parents = parents.into_iter();
        Ok(Self::new(
            parents.next(),
            parents.next(),
            tree,
            timestamp,
            message,
        ))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn identity(&self) -> anyhow::Result<Bytes> {
        let parent = self.parent.as_ref().map(AsRef::as_ref).unwrap_or("");
        let identity = format!(
            "{}{}{}{}",
            self.message,
            parent,
            self.tree_representation(),
            self.readable_timestamp()
        );

        Ok(Bytes::from(identity))
    }
}
