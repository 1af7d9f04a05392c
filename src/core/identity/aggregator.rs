// src/core/identity/aggregator.rs
use std::collections::{HashMap, HashSet};

use blake2::{Blake2b512, Digest};

use super::types::{AggregatedCommitment, FingerDigest};
use crate::utils::error::AggregationError;

/// Nominal entropy contributed by one enrolled finger, in bits. Four
/// fingers meet the 256-bit commitment target. Documentation invariant,
/// not a runtime check.
pub const NOMINAL_BITS_PER_FINGER: usize = 64;

/// Enrollment target: four fingers.
pub const TARGET_ENROLLED_FINGERS: usize = 4;

/// Minimum per-finger quality to proceed with three of four fingers.
pub const THREE_FINGER_QUALITY_FLOOR: f64 = 0.70;

/// Minimum per-finger quality to proceed with two of four fingers.
pub const TWO_FINGER_QUALITY_FLOOR: f64 = 0.85;

/// Combine per-finger digests into the master commitment, enforcing the
/// quality-weighted fallback policy.
///
/// Four or more fingers proceed unconditionally. Three fingers require
/// every present finger at quality >= 0.70, two require >= 0.85, and
/// fewer than two always fail. A finger missing from the quality map
/// counts as quality 0.0.
pub fn aggregate(
    digests: &[FingerDigest],
    quality: &HashMap<String, f64>,
) -> Result<AggregatedCommitment, AggregationError> {
    reject_duplicates(digests)?;

    let present = digests.len();
    let floor = match present {
        n if n >= TARGET_ENROLLED_FINGERS => None,
        3 => Some(THREE_FINGER_QUALITY_FLOOR),
        2 => Some(TWO_FINGER_QUALITY_FLOOR),
        _ => {
            return Err(AggregationError::InsufficientQuality {
                present,
                required_quality: TWO_FINGER_QUALITY_FLOOR,
            })
        }
    };

    if let Some(floor) = floor {
        let all_meet_floor = digests.iter().all(|d| {
            quality.get(d.finger_id()).copied().unwrap_or(0.0) >= floor
        });
        if !all_meet_floor {
            return Err(AggregationError::InsufficientQuality {
                present,
                required_quality: floor,
            });
        }
    }

    Ok(combine(digests))
}

/// Replace one finger's digest and recompute the commitment.
///
/// Only the combination step re-runs; no other finger's extractor state
/// is touched, so rotation cost is independent of the enrolled-finger
/// count. The quality policy is an enrollment-time concern and does not
/// re-apply here.
pub fn rotate_finger(
    existing: &[FingerDigest],
    finger_id: &str,
    new_digest: [u8; 32],
) -> Result<AggregatedCommitment, AggregationError> {
    reject_duplicates(existing)?;

    if !existing.iter().any(|d| d.finger_id() == finger_id) {
        return Err(AggregationError::UnknownFinger(finger_id.to_string()));
    }

    let rotated: Vec<FingerDigest> = existing
        .iter()
        .map(|d| {
            if d.finger_id() == finger_id {
                FingerDigest::new(finger_id, new_digest)
            } else {
                d.clone()
            }
        })
        .collect();

    Ok(combine(&rotated))
}

/// Canonical combination: pairs sorted by finger id, length-prefixed
/// concatenation, BLAKE2b-512 truncated to 32 bytes.
fn combine(digests: &[FingerDigest]) -> AggregatedCommitment {
    let mut ordered: Vec<&FingerDigest> = digests.iter().collect();
    ordered.sort_by(|a, b| a.finger_id().cmp(b.finger_id()));

    let mut hasher = Blake2b512::new();
    for entry in ordered {
        let id = entry.finger_id().as_bytes();
        hasher.update((id.len() as u32).to_le_bytes());
        hasher.update(id);
        hasher.update(entry.digest());
    }
    let full = hasher.finalize();

    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&full[..32]);
    AggregatedCommitment::from_bytes(bytes)
}

fn reject_duplicates(digests: &[FingerDigest]) -> Result<(), AggregationError> {
    let mut seen = HashSet::new();
    for d in digests {
        if !seen.insert(d.finger_id()) {
            return Err(AggregationError::DuplicateFinger(d.finger_id().to_string()));
        }
    }
    Ok(())
}
