// src/storage/file.rs
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::{StorageBackend, StorageReference, HELPER_BLOB_FORMAT};
use crate::utils::error::StorageError;

/// Local-filesystem backend: one file per blob under a root directory.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if missing) a blob directory.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)
            .map_err(|e| StorageError::Unavailable(format!("create {}: {e}", root.display())))?;
        Ok(Self { root })
    }

    fn path_for(&self, uri: &str) -> Option<PathBuf> {
        let name = uri.strip_prefix("file://")?;
        // Blob names are UUIDs we minted ourselves; anything with a path
        // separator is not one of ours.
        if name.contains('/') || name.contains('\\') {
            return None;
        }
        Some(self.root.join(name))
    }
}

impl StorageBackend for FileStore {
    fn put(&mut self, blob: &[u8]) -> Result<StorageReference, StorageError> {
        let name = Uuid::new_v4().to_string();
        let path = self.root.join(&name);
        fs::write(&path, blob)
            .map_err(|e| StorageError::Unavailable(format!("write {}: {e}", path.display())))?;
        Ok(StorageReference {
            uri: format!("file://{name}"),
            format: HELPER_BLOB_FORMAT.to_string(),
        })
    }

    fn get(&self, reference: &StorageReference) -> Result<Vec<u8>, StorageError> {
        let path = self
            .path_for(&reference.uri)
            .ok_or_else(|| StorageError::NotFound(reference.uri.clone()))?;

        match fs::read(&path) {
            Ok(blob) => Ok(blob),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(reference.uri.clone()))
            }
            Err(e) => Err(StorageError::Unavailable(format!(
                "read {}: {e}",
                path.display()
            ))),
        }
    }
}
