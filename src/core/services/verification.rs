use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use crate::core::biometrics::fuzzy::{FuzzyExtractor, HelperData};
use crate::core::biometrics::minutiae::FingerScan;
use crate::core::biometrics::quantizer::quantize;
use crate::core::identity::aggregator;
use crate::utils::config::CoreConfig;
use crate::utils::error::{AggregationError, CoreError, ReproductionError, Result};

/// Why a verification succeeded or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationReason {
    Ok,
    CapacityExceeded,
    IntegrityFailure,
    InsufficientQuality,
}

/// Explicit verification outcome. `success` is always a stated boolean,
/// never inferred from the absence of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub success: bool,
    pub reason: VerificationReason,
}

impl VerificationResult {
    fn ok() -> Self {
        Self {
            success: true,
            reason: VerificationReason::Ok,
        }
    }

    fn failed(reason: VerificationReason) -> Self {
        Self {
            success: false,
            reason,
        }
    }
}

/// Verification call boundary: rescans plus stored helpers in, explicit
/// match outcome out. Holds no state between calls.
pub struct VerificationService {
    config: CoreConfig,
    extractor: FuzzyExtractor,
}

impl VerificationService {
    pub fn new(config: CoreConfig) -> Self {
        Self {
            config,
            extractor: FuzzyExtractor::new(),
        }
    }

    /// Check a set of rescans against previously stored helper data.
    ///
    /// Every helper must be matched by a scan with the same finger id;
    /// the helpers define the enrolled set and extra scans are ignored.
    /// Structural problems (malformed hex, duplicate ids, unusable
    /// minutiae) surface as `Err`; authentication outcomes always come
    /// back as an explicit `VerificationResult`.
    pub fn verify(
        &self,
        fingers: &[FingerScan],
        quality: &HashMap<String, f64>,
        helpers: &[HelperData],
        expected_id_hash: &str,
    ) -> Result<VerificationResult> {
        let expected = parse_id_hash(expected_id_hash)?;

        if helpers.is_empty() {
            return Err(CoreError::Malformed("no helper data supplied".into()));
        }

        let mut scans: HashMap<&str, &FingerScan> = HashMap::new();
        for scan in fingers {
            if scans.insert(scan.finger_id.as_str(), scan).is_some() {
                return Err(CoreError::Malformed(format!(
                    "finger {:?} scanned more than once",
                    scan.finger_id
                )));
            }
        }

        let mut seen_helpers = std::collections::HashSet::new();
        for helper in helpers {
            if !seen_helpers.insert(helper.finger_id.as_str()) {
                return Err(CoreError::Malformed(format!(
                    "helper for finger {:?} supplied more than once",
                    helper.finger_id
                )));
            }
        }

        let mut digests = Vec::with_capacity(helpers.len());
        for helper in helpers {
            let Some(scan) = scans.get(helper.finger_id.as_str()) else {
                warn!("No rescan for enrolled finger {}", helper.finger_id);
                return Ok(VerificationResult::failed(
                    VerificationReason::InsufficientQuality,
                ));
            };

            let template = (*scan).clone().into_template(
                self.config.quantization.grid_size,
                self.config.quantization.angle_bins,
            );
            let features = quantize(&template)?;

            match self.extractor.reproduce(&features, helper) {
                Ok(digest) => digests.push(digest),
                Err(ReproductionError::CorrectionCapacityExceeded { .. }) => {
                    warn!("Finger {} outside correction capacity", helper.finger_id);
                    return Ok(VerificationResult::failed(
                        VerificationReason::CapacityExceeded,
                    ));
                }
                Err(ReproductionError::IntegrityFailure) => {
                    warn!("Helper data for finger {} failed integrity", helper.finger_id);
                    return Ok(VerificationResult::failed(
                        VerificationReason::IntegrityFailure,
                    ));
                }
            }
        }

        let commitment = match aggregator::aggregate(&digests, quality) {
            Ok(commitment) => commitment,
            Err(AggregationError::InsufficientQuality { .. }) => {
                return Ok(VerificationResult::failed(
                    VerificationReason::InsufficientQuality,
                ));
            }
            Err(e) => return Err(e.into()),
        };

        let matches = bool::from(commitment.id_hash().as_bytes()[..].ct_eq(&expected[..]));
        if !matches {
            warn!("Reconstructed commitment does not match the expected id hash");
            return Ok(VerificationResult::failed(
                VerificationReason::IntegrityFailure,
            ));
        }

        info!("Verification succeeded for {} finger(s)", helpers.len());
        Ok(VerificationResult::ok())
    }
}

fn parse_id_hash(expected_id_hash: &str) -> Result<[u8; 32]> {
    let bytes = hex::decode(expected_id_hash)
        .map_err(|_| CoreError::Malformed("expected_id_hash is not valid hex".into()))?;
    bytes
        .try_into()
        .map_err(|_| CoreError::Malformed("expected_id_hash must be 32 bytes of hex".into()))
}
