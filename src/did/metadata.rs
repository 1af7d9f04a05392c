// src/did/metadata.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::biometrics::fuzzy::HelperData;
use crate::core::identity::types::AggregatedCommitment;
use crate::storage::StorageReference;
use crate::utils::config::DEFAULT_MAX_PAYLOAD_BYTES;
use crate::utils::error::PayloadError;

/// Schema version for single-controller payloads.
pub const SCHEMA_V1_0: &str = "1.0";
/// Schema version required whenever more than one controller is present.
pub const SCHEMA_V1_1: &str = "1.1";

/// Helper data as it appears in the payload: either the blob itself or a
/// pointer to wherever an external backend stored it. The builder
/// serializes whichever form the caller hands over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HelperReference {
    Inline(HelperData),
    Stored(StorageReference),
}

/// CIP-20 style transaction-metadata payload anchoring one enrollment.
///
/// Built once per enrollment; the version tag is explicit so that v1.0
/// single-controller and v1.1 multi-controller documents never drift
/// into each other silently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataPayload {
    pub schema_version: String,
    pub label: u32,
    pub did: String,
    pub id_hash: String,
    pub controllers: Vec<String>,
    pub helpers: Vec<HelperReference>,
    pub enrolled_at: DateTime<Utc>,
    pub revoked: bool,
}

/// Builder for [`MetadataPayload`] with a configurable size ceiling.
#[derive(Debug, Clone)]
pub struct MetadataPayloadBuilder {
    label: u32,
    size_limit: usize,
    extra_controllers: Vec<String>,
    revoked: bool,
}

impl MetadataPayloadBuilder {
    pub fn new(label: u32) -> Self {
        Self {
            label,
            size_limit: DEFAULT_MAX_PAYLOAD_BYTES,
            extra_controllers: Vec::new(),
            revoked: false,
        }
    }

    /// Override the serialized-size ceiling (default 16 KB).
    pub fn size_limit(mut self, limit: usize) -> Self {
        self.size_limit = limit;
        self
    }

    /// Grant joint authority to an additional DID or address. Any extra
    /// controller switches the payload to schema v1.1.
    pub fn controller(mut self, controller: impl Into<String>) -> Self {
        self.extra_controllers.push(controller.into());
        self
    }

    pub fn revoked(mut self, revoked: bool) -> Self {
        self.revoked = revoked;
        self
    }

    /// Assemble and size-check the payload.
    ///
    /// The commitment never appears in the output; only its id hash does.
    /// A payload over the limit is rejected whole, never truncated.
    pub fn build(
        &self,
        did: &str,
        commitment: &AggregatedCommitment,
        helpers: Vec<HelperReference>,
        enrolled_at: DateTime<Utc>,
    ) -> Result<MetadataPayload, PayloadError> {
        let mut controllers = Vec::with_capacity(1 + self.extra_controllers.len());
        controllers.push(did.to_string());
        for controller in &self.extra_controllers {
            if !controllers.contains(controller) {
                controllers.push(controller.clone());
            }
        }

        let schema_version = if controllers.len() > 1 {
            SCHEMA_V1_1
        } else {
            SCHEMA_V1_0
        };

        let payload = MetadataPayload {
            schema_version: schema_version.to_string(),
            label: self.label,
            did: did.to_string(),
            id_hash: commitment.id_hash().to_hex(),
            controllers,
            helpers,
            enrolled_at,
            revoked: self.revoked,
        };

        let serialized = serde_json::to_vec(&payload)
            .expect("payload types serialize infallibly");
        if serialized.len() > self.size_limit {
            return Err(PayloadError::TooLarge {
                actual: serialized.len(),
                limit: self.size_limit,
            });
        }

        Ok(payload)
    }
}
