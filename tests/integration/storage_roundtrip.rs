// tests/integration/storage_roundtrip.rs
use bioanchor::{
    ContentAddressedStore, DidMode, FileStore, HelperData, MemoryStore, StorageBackend,
    StorageReference,
};
use tempfile::tempdir;

use crate::common::{four_scans, full_quality, seeded_rng, TestContext};

fn enrolled_helpers(seed: u64) -> (TestContext, Vec<HelperData>, String) {
    let ctx = TestContext::new();
    let mut rng = seeded_rng(seed);
    let result = ctx
        .core
        .enroll(
            &four_scans(),
            &full_quality(),
            DidMode::Deterministic,
            None,
            &mut rng,
        )
        .unwrap();
    let helpers = result.helpers.clone();
    let id_hash = result.id_hash.clone();
    (ctx, helpers, id_hash)
}

fn roundtrip_through<B: StorageBackend>(backend: &mut B, seed: u64) {
    let (ctx, helpers, id_hash) = enrolled_helpers(seed);

    // Persist each helper blob, keep only the references.
    let references: Vec<StorageReference> = helpers
        .iter()
        .map(|h| backend.put(&serde_json::to_vec(h).unwrap()).unwrap())
        .collect();

    // Later: fetch the blobs back and verify against a fresh rescan.
    let restored: Vec<HelperData> = references
        .iter()
        .map(|r| serde_json::from_slice(&backend.get(r).unwrap()).unwrap())
        .collect();
    assert_eq!(restored, helpers);

    let outcome = ctx
        .core
        .verify(&four_scans(), &full_quality(), &restored, &id_hash)
        .unwrap();
    assert!(outcome.success);
}

#[test]
fn memory_backend_roundtrips_helper_blobs() {
    roundtrip_through(&mut MemoryStore::new(), 300);
}

#[test]
fn file_backend_roundtrips_helper_blobs() {
    let dir = tempdir().unwrap();
    roundtrip_through(&mut FileStore::new(dir.path()).unwrap(), 301);
}

#[test]
fn content_addressed_backend_roundtrips_helper_blobs() {
    roundtrip_through(&mut ContentAddressedStore::new(), 302);
}
