// src/core/biometrics/fuzzy.rs
use blake2::{Blake2b512, Digest};
use hmac::{Hmac, Mac};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroize;

use super::bch::{Bch, BCH_T};
use super::encoding::encode_features;
use super::quantizer::QuantizedFeatureSet;
use crate::core::identity::types::FingerDigest;
use crate::utils::error::ReproductionError;

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

type HmacSha256 = Hmac<Sha256>;

/// Public, non-secret artifact produced at enrollment and required at
/// every reproduce call. The salt blinds the digest, the parity carries
/// the error-correction redundancy, and the tag binds both to the
/// enrollment codeword. None of the fields reveal the codeword itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelperData {
    pub finger_id: String,
    #[serde(with = "hex")]
    pub salt: [u8; SALT_LEN],
    #[serde(with = "hex")]
    pub parity: [u8; 8],
    #[serde(with = "hex")]
    pub hmac_tag: [u8; 32],
}

/// Fuzzy extractor over the BCH(127, 64, 10) codec.
///
/// `generate` is the only entropy-consuming operation; `reproduce` is a
/// pure function of its inputs.
pub struct FuzzyExtractor {
    bch: Bch,
}

impl FuzzyExtractor {
    pub fn new() -> Self {
        Self { bch: Bch::new() }
    }

    /// Derive a fresh digest and helper for one finger.
    ///
    /// Draws a random salt, encodes the feature set into the 64-bit
    /// message word, produces BCH parity, and binds everything with
    /// `hmac_tag = HMAC-SHA256(salt, codeword)`. The digest is
    /// `BLAKE2b-512(codeword || salt)` truncated to 32 bytes.
    pub fn generate<R: RngCore + CryptoRng>(
        &self,
        finger_id: &str,
        features: &QuantizedFeatureSet,
        rng: &mut R,
    ) -> (FingerDigest, HelperData) {
        let mut salt = [0u8; SALT_LEN];
        rng.fill_bytes(&mut salt);

        let codeword = self.bch.encode(encode_features(features));
        let mut codeword_bytes = codeword.to_le_bytes();

        let tag = compute_tag(&salt, &codeword_bytes);
        let digest = derive_digest(&codeword_bytes, &salt);
        codeword_bytes.zeroize();

        let helper = HelperData {
            finger_id: finger_id.to_string(),
            salt,
            parity: Bch::parity_of(codeword).to_le_bytes(),
            hmac_tag: tag,
        };

        (FingerDigest::new(finger_id, digest), helper)
    }

    /// Reproduce the enrollment digest from a noisy rescan.
    ///
    /// The rescan's message word is spliced onto the helper's parity and
    /// BCH-decoded back to the enrollment codeword; the helper tag is then
    /// verified in constant time before the digest is recomputed.
    pub fn reproduce(
        &self,
        features: &QuantizedFeatureSet,
        helper: &HelperData,
    ) -> Result<FingerDigest, ReproductionError> {
        self.reproduce_message(encode_features(features), helper)
    }

    fn reproduce_message(
        &self,
        message: u64,
        helper: &HelperData,
    ) -> Result<FingerDigest, ReproductionError> {
        let received = Bch::assemble(message, u64::from_le_bytes(helper.parity));
        let (corrected, _) = self
            .bch
            .decode(received)
            .map_err(|_| ReproductionError::CorrectionCapacityExceeded { max_errors: BCH_T })?;

        let mut codeword_bytes = corrected.to_le_bytes();

        let mut mac = HmacSha256::new_from_slice(&helper.salt)
            .expect("HMAC accepts keys of any length");
        mac.update(&codeword_bytes);
        if mac.verify_slice(&helper.hmac_tag).is_err() {
            codeword_bytes.zeroize();
            return Err(ReproductionError::IntegrityFailure);
        }

        let digest = derive_digest(&codeword_bytes, &helper.salt);
        codeword_bytes.zeroize();

        Ok(FingerDigest::new(&helper.finger_id, digest))
    }
}

impl Default for FuzzyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn compute_tag(salt: &[u8; SALT_LEN], codeword_bytes: &[u8; 16]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(salt).expect("HMAC accepts keys of any length");
    mac.update(codeword_bytes);
    mac.finalize().into_bytes().into()
}

fn derive_digest(codeword_bytes: &[u8; 16], salt: &[u8; SALT_LEN]) -> [u8; 32] {
    let mut hasher = Blake2b512::new();
    hasher.update(codeword_bytes);
    hasher.update(salt);
    let full = hasher.finalize();

    let mut digest = [0u8; 32];
    digest.copy_from_slice(&full[..32]);
    digest
}
