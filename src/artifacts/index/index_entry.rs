//! Index entry representation
//!
//! Each entry records one pending change: a file staged for addition with the
//! blob it will point to, or a file staged for removal with the blob it
//! pointed to in the current commit.

use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

/// Kind of pending change
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StageAction {
    Add,
    Remove,
}

impl StageAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageAction::Add => "add",
            StageAction::Remove => "rm",
        }
    }
}

impl TryFrom<&str> for StageAction {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "add" => Ok(StageAction::Add),
            "rm" => Ok(StageAction::Remove),
            _ => Err(anyhow::anyhow!("Unknown index action: {value}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    pub action: StageAction,
    pub oid: ObjectId,
    /// File name relative to the working directory root
    pub name: String,
}

impl Packable for IndexEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(Bytes::from(format!(
            "{} {} {}\n",
            self.action.as_str(),
            self.oid,
            self.name
        )))
    }
}

impl Unpackable for IndexEntry {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut line = String::new();
        reader.read_line(&mut line)?;
        let line = line.strip_suffix('\n').unwrap_or(&line);

        let (action, rest) = line
            .split_once(' ')
            .context("Invalid index entry: missing action")?;
        let (oid, name) = rest
            .split_once(' ')
            .context("Invalid index entry: missing file name")?;
        if name.is_empty() {
            anyhow::bail!("Invalid index entry: empty file name");
        }

        Ok(IndexEntry::new(
            StageAction::try_from(action)?,
            ObjectId::try_parse(oid.to_string())?,
            name.to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::io::Cursor;

    #[rstest]
    #[case::addition(StageAction::Add, "notes.txt")]
    #[case::removal(StageAction::Remove, "name with spaces.md")]
    fn entry_line_reads_back(#[case] action: StageAction, #[case] name: &str) {
        let entry = IndexEntry::new(
            action,
            ObjectId::try_parse("ab".repeat(20)).unwrap(),
            name.to_string(),
        );

        let line = entry.serialize().unwrap();

        assert!(line.ends_with(b"\n"));
        assert_eq!(IndexEntry::deserialize(Cursor::new(line)).unwrap(), entry);
    }

    #[rstest]
    #[case::unknown_action("mv abababababababababababababababababababab f")]
    #[case::bad_oid("add xyz f")]
    #[case::no_name("add abababababababababababababababababababab")]
    fn malformed_lines_are_rejected(#[case] line: &str) {
        assert!(IndexEntry::deserialize(Cursor::new(line.to_string())).is_err());
    }
}
