//! Content-addressed object store
//!
//! Blobs and commits live in two namespaces under `.gitlet/objects`, each
//! keyed by the object's SHA-1 id: `<namespace>/<2 hex>/<38 hex>`. Objects
//! are zlib-compressed and written through a temporary file that is renamed
//! into place. Storing is idempotent and nothing is ever updated or deleted.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn namespace_path(&self, object_type: ObjectType) -> PathBuf {
        self.path.join(object_type.namespace())
    }

    /// Store an object and return its id
    ///
    /// Storing an object whose id is already present is a no-op.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object.object_path()?);

        // write the object to disk unless it already exists
        // otherwise, create the object directory
        if !object_path.exists() {
            std::fs::create_dir_all(
                object_path
                    .parent()
                    .context(format!("Invalid object path {}", object_path.display()))?,
            )
            .context(format!(
                "Unable to create object directory {}",
                object_path.display()
            ))?;

            self.write_object(object_path, object.serialize()?)?;
        }

        Ok(object_id)
    }

    pub fn contains(&self, object_type: ObjectType, object_id: &ObjectId) -> bool {
        self.namespace_path(object_type)
            .join(object_id.to_path())
            .exists()
    }

    pub fn load_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let object_reader = self.parse_object_as_bytes(ObjectType::Blob, object_id)?;
        Blob::deserialize(object_reader)
    }

    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let object_reader = self.parse_object_as_bytes(ObjectType::Commit, object_id)?;
        Commit::deserialize(object_reader)
    }

    /// Ids of every stored commit, in ascending order
    pub fn list_commits(&self) -> anyhow::Result<Vec<ObjectId>> {
        self.list_objects(ObjectType::Commit)
    }

    fn list_objects(&self, object_type: ObjectType) -> anyhow::Result<Vec<ObjectId>> {
        let namespace_path = self.namespace_path(object_type);
        if !namespace_path.exists() {
            return Ok(Vec::new());
        }

        let mut object_ids = WalkDir::new(&namespace_path)
            .min_depth(2)
            .max_depth(2)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let dir_name = entry.path().parent()?.file_name()?.to_string_lossy();
                let file_name = entry.file_name().to_string_lossy();
                ObjectId::try_parse(format!("{}{}", dir_name, file_name)).ok()
            })
            .collect::<Vec<_>>();
        object_ids.sort();

        Ok(object_ids)
    }

    fn parse_object_as_bytes(
        &self,
        expected_type: ObjectType,
        object_id: &ObjectId,
    ) -> anyhow::Result<impl BufRead> {
        let object_path = self
            .namespace_path(expected_type)
            .join(object_id.to_path());
        let object_content = self.read_object(object_path)?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_type(&mut object_reader)?;
        if object_type != expected_type {
            anyhow::bail!(
                "object {} is a {}, expected a {}",
                object_id,
                object_type,
                expected_type
            );
        }

        Ok(object_reader)
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        // read the object file
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    /// Find all commits whose id starts with the given prefix
    ///
    /// Used to resolve abbreviated commit ids. An empty result means no match,
    /// more than one means the prefix is ambiguous.
    pub fn find_commits_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(Vec::new());
        }

        // with 2+ characters only the matching fan-out directory needs a look
        if prefix.len() >= 2 {
            let dir_name = &prefix[..2];
            let file_prefix = &prefix[2..];
            let dir_path = self.namespace_path(ObjectType::Commit).join(dir_name);
            let mut matches = Vec::new();

            if dir_path.is_dir() {
                for entry in std::fs::read_dir(&dir_path)? {
                    let entry = entry?;
                    let file_name = entry.file_name();
                    let file_name_str = file_name.to_string_lossy();

                    if file_name_str.starts_with(file_prefix)
                        && let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{file_name_str}"))
                    {
                        matches.push(oid);
                    }
                }
            }
            matches.sort();

            return Ok(matches);
        }

        Ok(self
            .list_commits()?
            .into_iter()
            .filter(|oid| oid.as_ref().starts_with(&prefix))
            .collect())
    }
}
