// src/core/biometrics/encoding.rs
use blake2::{Blake2b512, Digest};

use super::bch::BCH_K;
use super::quantizer::QuantizedFeatureSet;

/// Domain separation for feature-index derivation.
const FEATURE_INDEX_PREFIX: &[u8] = b"bioanchor/feature-index/v1";

/// Map a canonical feature set onto a 64-bit presence bitmap.
///
/// Each discrete triple is hashed under a fixed prefix and the first eight
/// digest bytes select one of the 64 message-bit positions. The map only
/// depends on the triples themselves, so it is stable across enrollment
/// and verification for fixed quantization parameters, and a single
/// minutia drifting across a cell boundary flips at most two bits.
pub fn encode_features(features: &QuantizedFeatureSet) -> u64 {
    let mut word: u64 = 0;
    for triple in features.features() {
        let mut hasher = Blake2b512::new();
        hasher.update(FEATURE_INDEX_PREFIX);
        hasher.update(triple.grid_x.to_le_bytes());
        hasher.update(triple.grid_y.to_le_bytes());
        hasher.update(triple.angle_bin.to_le_bytes());
        let digest = hasher.finalize();

        let mut index_bytes = [0u8; 8];
        index_bytes.copy_from_slice(&digest[..8]);
        let bit = u64::from_le_bytes(index_bytes) % BCH_K as u64;
        word |= 1 << bit;
    }
    word
}
