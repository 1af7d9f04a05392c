pub mod core;
pub mod did;
pub mod storage;
pub mod utils;

use std::collections::HashMap;

use rand::{CryptoRng, RngCore};

pub use crate::core::biometrics::fuzzy::{FuzzyExtractor, HelperData};
pub use crate::core::biometrics::minutiae::{FingerScan, FingerTemplate, Minutia};
pub use crate::core::biometrics::quantizer::{quantize, QuantizedFeatureSet, QuantizedMinutia};
pub use crate::core::identity::aggregator::{aggregate, rotate_finger};
pub use crate::core::identity::types::{AggregatedCommitment, DidRecord, FingerDigest, IdHash};
pub use crate::core::services::enrollment::{EnrollmentResult, EnrollmentService};
pub use crate::core::services::verification::{
    VerificationReason, VerificationResult, VerificationService,
};
pub use crate::did::builder::{build_did, DidMode};
pub use crate::did::metadata::{HelperReference, MetadataPayload, MetadataPayloadBuilder};
pub use crate::storage::{
    ContentAddressedStore, FileStore, MemoryStore, StorageBackend, StorageReference,
};
pub use crate::utils::config::CoreConfig;
pub use crate::utils::error::{
    AggregationError, CoreError, DidError, PayloadError, QuantizationError, ReproductionError,
    Result, StorageError,
};

/// Facade bundling the three call boundaries behind one configuration.
///
/// All operations are pure, stateless, synchronous computations; the only
/// entropy consumer is enrollment, via the caller-supplied RNG.
pub struct IdentityCore {
    config: CoreConfig,
    enrollment: EnrollmentService,
    verification: VerificationService,
}

impl IdentityCore {
    pub fn new(config: CoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            enrollment: EnrollmentService::new(config.clone()),
            verification: VerificationService::new(config.clone()),
            config,
        })
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Enroll on the configured network.
    pub fn enroll<R: RngCore + CryptoRng>(
        &self,
        fingers: &[FingerScan],
        quality: &HashMap<String, f64>,
        mode: DidMode,
        wallet_address: Option<&str>,
        rng: &mut R,
    ) -> Result<EnrollmentResult> {
        self.enrollment.enroll(
            fingers,
            quality,
            mode,
            &self.config.did.network,
            wallet_address,
            rng,
        )
    }

    pub fn verify(
        &self,
        fingers: &[FingerScan],
        quality: &HashMap<String, f64>,
        helpers: &[HelperData],
        expected_id_hash: &str,
    ) -> Result<VerificationResult> {
        self.verification
            .verify(fingers, quality, helpers, expected_id_hash)
    }

    /// Swap one finger's digest and recompute the commitment; no other
    /// finger's extractor state is recomputed.
    pub fn rotate_finger(
        &self,
        existing_digests: &[FingerDigest],
        finger_id: &str,
        new_digest: [u8; 32],
    ) -> std::result::Result<AggregatedCommitment, AggregationError> {
        crate::core::identity::aggregator::rotate_finger(existing_digests, finger_id, new_digest)
    }
}
