use std::collections::HashMap;

use chrono::Utc;
use rand::{CryptoRng, RngCore};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::core::biometrics::fuzzy::{FuzzyExtractor, HelperData};
use crate::core::biometrics::minutiae::FingerScan;
use crate::core::biometrics::quantizer::quantize;
use crate::core::identity::aggregator;
use crate::core::identity::types::{DidRecord, FingerDigest};
use crate::did::builder::{build_did, DidMode};
use crate::did::metadata::{HelperReference, MetadataPayload, MetadataPayloadBuilder};
use crate::utils::config::CoreConfig;
use crate::utils::error::{CoreError, Result};

/// Outcome of one enrollment.
///
/// The serialized form carries only the public artifacts (`did`,
/// `id_hash`, `helpers`, `metadata_payload`). Per-finger digests stay
/// in memory for the caller to drive rotation and are never written out.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentResult {
    pub did: String,
    pub id_hash: String,
    pub helpers: Vec<HelperData>,
    pub metadata_payload: MetadataPayload,
    #[serde(skip)]
    pub record: DidRecord,
    #[serde(skip)]
    pub finger_digests: Vec<FingerDigest>,
    #[serde(skip)]
    pub enrollment_id: Uuid,
}

/// Enrollment call boundary: raw finger scans in, DID plus public
/// artifacts out. Holds no state between calls.
pub struct EnrollmentService {
    config: CoreConfig,
    extractor: FuzzyExtractor,
}

impl EnrollmentService {
    pub fn new(config: CoreConfig) -> Self {
        Self {
            config,
            extractor: FuzzyExtractor::new(),
        }
    }

    /// Enroll a set of fingers and mint the identity artifacts.
    ///
    /// Quantizes and fuzzy-extracts each scan, aggregates the digests
    /// under the quality fallback policy, then derives the DID, the
    /// DidRecord, and the size-checked metadata payload. The injected
    /// RNG is the only entropy source.
    pub fn enroll<R: RngCore + CryptoRng>(
        &self,
        fingers: &[FingerScan],
        quality: &HashMap<String, f64>,
        mode: DidMode,
        network: &str,
        wallet_address: Option<&str>,
        rng: &mut R,
    ) -> Result<EnrollmentResult> {
        if fingers.is_empty() {
            return Err(CoreError::Malformed("no finger scans supplied".into()));
        }

        let mut finger_digests = Vec::with_capacity(fingers.len());
        let mut helpers = Vec::with_capacity(fingers.len());
        for scan in fingers {
            let template = scan
                .clone()
                .into_template(self.config.quantization.grid_size, self.config.quantization.angle_bins);
            let features = quantize(&template)?;
            let (digest, helper) = self.extractor.generate(&scan.finger_id, &features, rng);
            finger_digests.push(digest);
            helpers.push(helper);
        }

        let commitment = aggregator::aggregate(&finger_digests, quality)?;
        let did = build_did(&commitment, mode, network, wallet_address)?;
        let id_hash = commitment.id_hash().to_hex();
        let enrolled_at = Utc::now();

        let helper_refs = helpers.iter().cloned().map(HelperReference::Inline).collect();
        let metadata_payload = MetadataPayloadBuilder::new(self.config.metadata.label)
            .size_limit(self.config.metadata.max_payload_bytes)
            .build(&did, &commitment, helper_refs, enrolled_at)?;

        let record = DidRecord {
            did: did.clone(),
            network: network.to_string(),
            created_at: enrolled_at,
        };
        let enrollment_id = Uuid::new_v4();

        info!(
            "Enrolled identity {} with {} finger(s) on {}",
            enrollment_id,
            fingers.len(),
            network
        );

        Ok(EnrollmentResult {
            did,
            id_hash,
            helpers,
            metadata_payload,
            record,
            finger_digests,
            enrollment_id,
        })
    }
}
