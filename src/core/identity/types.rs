// src/core/identity/types.rs
use blake2::{Blake2b512, Digest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Secret per-finger digest derived by the fuzzy extractor.
///
/// Never serialized and never persisted in plaintext by the core; it only
/// travels in memory between the extractor and the aggregator.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct FingerDigest {
    finger_id: String,
    digest: [u8; 32],
}

impl FingerDigest {
    pub fn new(finger_id: impl Into<String>, digest: [u8; 32]) -> Self {
        Self {
            finger_id: finger_id.into(),
            digest,
        }
    }

    pub fn finger_id(&self) -> &str {
        &self.finger_id
    }

    pub fn digest(&self) -> &[u8; 32] {
        &self.digest
    }
}

impl std::fmt::Debug for FingerDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FingerDigest")
            .field("finger_id", &self.finger_id)
            .field("digest", &"[redacted]")
            .finish()
    }
}

/// Master secret combining all enrolled fingers. Deterministic for a
/// given digest multiset regardless of ordering.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AggregatedCommitment([u8; 32]);

impl AggregatedCommitment {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Publicly shareable, non-reversible identifier for this commitment:
    /// `BLAKE2b-512(commitment)` truncated to 32 bytes.
    pub fn id_hash(&self) -> IdHash {
        let mut hasher = Blake2b512::new();
        hasher.update(self.0);
        let full = hasher.finalize();

        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&full[..32]);
        IdHash(bytes)
    }
}

impl std::fmt::Debug for AggregatedCommitment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AggregatedCommitment([redacted])")
    }
}

/// Public identity hash derived from a commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdHash([u8; 32]);

impl IdHash {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Display for IdHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Immutable record of a minted DID. A later enrollment with different
/// biometric input produces a new record, never an update of this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DidRecord {
    pub did: String,
    pub network: String,
    pub created_at: DateTime<Utc>,
}
