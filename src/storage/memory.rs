// src/storage/memory.rs
use std::collections::HashMap;

use uuid::Uuid;

use super::{StorageBackend, StorageReference, HELPER_BLOB_FORMAT};
use crate::utils::error::StorageError;

/// In-memory backend for tests, benchmarks, and callers that inline
/// helper data into the payload anyway.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl StorageBackend for MemoryStore {
    fn put(&mut self, blob: &[u8]) -> Result<StorageReference, StorageError> {
        let uri = format!("mem://{}", Uuid::new_v4());
        self.blobs.insert(uri.clone(), blob.to_vec());
        Ok(StorageReference {
            uri,
            format: HELPER_BLOB_FORMAT.to_string(),
        })
    }

    fn get(&self, reference: &StorageReference) -> Result<Vec<u8>, StorageError> {
        self.blobs
            .get(&reference.uri)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(reference.uri.clone()))
    }
}
