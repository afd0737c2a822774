use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;
use std::path::PathBuf;

pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    /// The canonical bytes the object id is derived from
    ///
    /// Two objects with equal identity bytes collapse to the same id,
    /// which is what makes storing them idempotent.
    fn identity(&self) -> Result<Bytes>;

    fn object_id(&self) -> Result<ObjectId> {
        let content = self.identity()?;
        let mut hasher = Sha1::new();
        hasher.update(&content);

        let oid = hasher.finalize();
        ObjectId::try_parse(format!("{oid:x}"))
    }

    /// Path of the object relative to the object store root
    fn object_path(&self) -> Result<PathBuf> {
        Ok(PathBuf::from(self.object_type().namespace()).join(self.object_id()?.to_path()))
    }
}
