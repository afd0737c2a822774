//! Gitlet blob object
//!
//! A blob is an immutable snapshot of one file: its name and its content.
//! The id is derived from both, so the same content under two names gives
//! two blobs while re-adding an unchanged file gives back the same one.
//!
//! ## Format
//!
//! On disk: `blob <size>\0<filename>\0<content>`

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

/// Gitlet blob object representing one file's content
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    /// Name of the file this snapshot was taken from
    filename: String,
    /// Raw file content
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut content_bytes = Vec::new();
        content_bytes.write_all(self.filename.as_bytes())?;
        content_bytes.write_all(b"\0")?;
        content_bytes.write_all(&self.content)?;

        let mut blob_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), content_bytes.len());
        blob_bytes.write_all(header.as_bytes())?;
        blob_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(blob_bytes))
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let mut filename = Vec::new();
        reader.read_until(b'\0', &mut filename)?;
        let filename = filename
            .strip_suffix(b"\0")
            .context("Invalid blob object: missing filename terminator")?;
        let filename = String::from_utf8(filename.to_vec())?;

        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        Ok(Self::new(filename, Bytes::from(content)))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn identity(&self) -> anyhow::Result<Bytes> {
        let mut identity = Vec::with_capacity(self.filename.len() + self.content.len());
        identity.extend_from_slice(self.filename.as_bytes());
        identity.extend_from_slice(&self.content);

        Ok(Bytes::from(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::object_type::ObjectType;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn identical_name_and_content_share_an_id() {
        let first = Blob::new("a.txt".into(), Bytes::from_static(b"x"));
        let second = Blob::new("a.txt".into(), Bytes::from_static(b"x"));

        assert_eq!(first.object_id().unwrap(), second.object_id().unwrap());
    }

    #[test]
    fn same_content_under_another_name_is_another_blob() {
        let first = Blob::new("a.txt".into(), Bytes::from_static(b"x"));
        let second = Blob::new("b.txt".into(), Bytes::from_static(b"x"));

        assert_ne!(first.object_id().unwrap(), second.object_id().unwrap());
    }

    #[test]
    fn deserialize_reads_back_binary_content() {
        let blob = Blob::new("bin".into(), Bytes::from_static(b"\0\x01\xff\n"));
        let mut reader = Cursor::new(blob.serialize().unwrap());

        assert_eq!(
            ObjectType::parse_object_type(&mut reader).unwrap(),
            ObjectType::Blob
        );
        assert_eq!(Blob::deserialize(reader).unwrap(), blob);
    }
}
