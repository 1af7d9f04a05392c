// tests/common/mod.rs
use std::collections::HashMap;

use bioanchor::{CoreConfig, FingerScan, IdentityCore};
use rand_chacha::ChaCha20Rng;

pub const FINGER_IDS: [&str; 4] = ["left-index", "left-thumb", "right-index", "right-thumb"];

pub struct TestContext {
    pub core: IdentityCore,
}

impl TestContext {
    pub fn new() -> Self {
        let mut config = CoreConfig::default();
        config.did.network = "preprod".to_string();
        Self {
            core: IdentityCore::new(config).unwrap(),
        }
    }
}

pub fn seeded_rng(seed: u64) -> ChaCha20Rng {
    use rand::SeedableRng;
    ChaCha20Rng::seed_from_u64(seed)
}

/// Deterministic synthetic capture: each finger gets a well-separated
/// minutiae cloud so per-finger codewords never collide.
pub fn scan(finger_id: &str, base: f64) -> FingerScan {
    FingerScan {
        finger_id: finger_id.to_string(),
        minutiae: (0..24)
            .map(|i| {
                let i = i as f64;
                [
                    base + (i * 37.0) % 240.0,
                    base + (i * 53.0) % 240.0,
                    (base + i * 29.0) % 360.0,
                ]
            })
            .collect(),
    }
}

pub fn four_scans() -> Vec<FingerScan> {
    FINGER_IDS
        .iter()
        .enumerate()
        .map(|(n, id)| scan(id, 1000.0 * n as f64))
        .collect()
}

/// The same capture with sub-cell jitter on every minutia: a realistic
/// rescan that must still reproduce each digest.
pub fn jittered_scans() -> Vec<FingerScan> {
    four_scans()
        .into_iter()
        .map(|s| FingerScan {
            finger_id: s.finger_id,
            minutiae: s
                .minutiae
                .iter()
                .map(|m| [m[0] + 0.4, m[1] - 0.3, m[2] + 0.8])
                .collect(),
        })
        .collect()
}

pub fn full_quality() -> HashMap<String, f64> {
    FINGER_IDS
        .iter()
        .map(|id| (id.to_string(), 1.0))
        .collect()
}
