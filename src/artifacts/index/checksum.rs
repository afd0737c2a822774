use crate::artifacts::index::CHECKSUM_SIZE;
use anyhow::anyhow;
use file_guard::FileGuard;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};
use std::ops::DerefMut;

/// Locked index file that hashes everything passing through it
#[derive(Debug)]
pub struct Checksum<'f> {
    file: FileGuard<&'f mut std::fs::File>,
    digest: Sha1,
}

impl<'f> Checksum<'f> {
    pub(crate) fn new(file: FileGuard<&'f mut std::fs::File>) -> Self {
        Checksum {
            file,
            digest: Sha1::new(),
        }
    }

    pub(crate) fn write(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.file.deref_mut().write_all(data)?;
        self.digest.update(data);
        Ok(())
    }

    pub(crate) fn write_checksum(&mut self) -> anyhow::Result<()> {
        let checksum = format!("{:x}\n", self.digest.clone().finalize());
        self.file
            .deref_mut()
            .write_all(checksum.as_bytes())
            .map_err(|_| anyhow!("Failed to write checksum to index file"))?;

        Ok(())
    }

    /// Read the entry section of the file and check it against the last line
    pub(crate) fn read_verified(&mut self) -> anyhow::Result<String> {
        let mut content = String::new();
        self.file.deref_mut().read_to_string(&mut content)?;

        let content = content
            .strip_suffix('\n')
            .ok_or_else(|| anyhow!("Unexpected end-of-file while reading index"))?;
        let (entries, expected_checksum) = match content.rsplit_once('\n') {
            Some((entries, checksum)) => (format!("{entries}\n"), checksum),
            None => (String::new(), content),
        };

        if expected_checksum.len() != CHECKSUM_SIZE {
            return Err(anyhow!("Index checksum line is malformed"));
        }

        self.digest.update(entries.as_bytes());
        let actual_checksum = format!("{:x}", self.digest.clone().finalize());
        if expected_checksum != actual_checksum {
            return Err(anyhow!("Checksum does not match value stored on disk"));
        }

        Ok(entries)
    }
}
