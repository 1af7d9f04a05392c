// src/storage/mod.rs
mod content_addressed;
mod file;
mod memory;

pub use content_addressed::ContentAddressedStore;
pub use file::FileStore;
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};

use crate::utils::error::StorageError;

/// Pointer to a helper blob held by an external backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageReference {
    pub uri: String,
    pub format: String,
}

/// Abstract put/get contract the core depends on but never implements
/// with real I/O policy of its own.
///
/// Implementations must guarantee `get(put(x)) == x` and distinguish a
/// permanently missing blob (`NotFound`) from a transient backend fault
/// (`Unavailable`) so callers can decide whether to retry. All calls are
/// synchronous; callers pick their own concurrency model around them.
#[cfg_attr(test, mockall::automock)]
pub trait StorageBackend {
    fn put(&mut self, blob: &[u8]) -> Result<StorageReference, StorageError>;
    fn get(&self, reference: &StorageReference) -> Result<Vec<u8>, StorageError>;
}

/// Serialization format tag for helper blobs.
pub const HELPER_BLOB_FORMAT: &str = "helper+json";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mocked_backend_satisfies_the_contract() {
        let mut mock = MockStorageBackend::new();
        let reference = StorageReference {
            uri: "mock://blob/1".to_string(),
            format: HELPER_BLOB_FORMAT.to_string(),
        };

        let expected = reference.clone();
        mock.expect_put()
            .returning(move |_| Ok(expected.clone()));
        mock.expect_get()
            .returning(|_| Ok(b"helper-bytes".to_vec()));

        let stored = mock.put(b"helper-bytes").unwrap();
        assert_eq!(stored, reference);
        assert_eq!(mock.get(&stored).unwrap(), b"helper-bytes");
    }
}
