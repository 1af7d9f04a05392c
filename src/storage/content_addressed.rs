// src/storage/content_addressed.rs
use std::collections::HashMap;

use sha2::{Digest, Sha256};

use super::{StorageBackend, StorageReference, HELPER_BLOB_FORMAT};
use crate::utils::error::StorageError;

/// Content-addressed backend: blobs keyed by their SHA-256 digest.
///
/// The reference URI encodes the digest, so retrieval recomputes and
/// verifies it. Corruption surfaces at read time as `Unavailable`, never
/// as silently wrong bytes. Storing the same blob twice is a no-op that
/// yields the same reference.
#[derive(Debug, Default)]
pub struct ContentAddressedStore {
    blobs: HashMap<String, Vec<u8>>,
}

impl ContentAddressedStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn digest_hex(blob: &[u8]) -> String {
        hex::encode(Sha256::digest(blob))
    }

    fn digest_of(reference: &StorageReference) -> Option<&str> {
        let digest = reference.uri.strip_prefix("cas://sha256/")?;
        if digest.len() == 64 && digest.chars().all(|c| c.is_ascii_hexdigit()) {
            Some(digest)
        } else {
            None
        }
    }
}

impl StorageBackend for ContentAddressedStore {
    fn put(&mut self, blob: &[u8]) -> Result<StorageReference, StorageError> {
        let digest = Self::digest_hex(blob);
        let uri = format!("cas://sha256/{digest}");
        self.blobs.entry(digest).or_insert_with(|| blob.to_vec());
        Ok(StorageReference {
            uri,
            format: HELPER_BLOB_FORMAT.to_string(),
        })
    }

    fn get(&self, reference: &StorageReference) -> Result<Vec<u8>, StorageError> {
        let digest = Self::digest_of(reference)
            .ok_or_else(|| StorageError::NotFound(reference.uri.clone()))?;

        let blob = self
            .blobs
            .get(digest)
            .ok_or_else(|| StorageError::NotFound(reference.uri.clone()))?;

        if Self::digest_hex(blob) != digest {
            return Err(StorageError::Unavailable(format!(
                "digest mismatch for {}",
                reference.uri
            )));
        }

        Ok(blob.clone())
    }
}
