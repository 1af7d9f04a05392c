// tests/integration/enrollment_flow.rs
use bioanchor::{DidMode, FingerScan, FuzzyExtractor, HelperReference, quantize};

use crate::common::{four_scans, full_quality, scan, seeded_rng, TestContext};

#[test_log::test]
fn four_finger_enrollment_mints_a_preprod_did() {
    let ctx = TestContext::new();
    let mut rng = seeded_rng(100);

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

    assert!(result.did.starts_with("did:cardano:preprod:"));
    assert!(result.did.len() > "did:cardano:preprod:".len());
    assert_eq!(result.id_hash.len(), 64);
    assert!(result.id_hash.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(result.helpers.len(), 4);
    assert_eq!(result.record.did, result.did);

    // Helpers in the payload are inlined and match the returned ones.
    assert_eq!(result.metadata_payload.helpers.len(), 4);
    for (reference, helper) in result
        .metadata_payload
        .helpers
        .iter()
        .zip(result.helpers.iter())
    {
        match reference {
            HelperReference::Inline(inline) => assert_eq!(inline, helper),
            HelperReference::Stored(_) => panic!("expected inline helper"),
        }
    }
}

#[test_log::test]
fn enrollment_consumes_the_capture_layer_json_shape() {
    let ctx = TestContext::new();
    let mut rng = seeded_rng(101);

    let raw = serde_json::to_string(&four_scans()).unwrap();
    let fingers: Vec<FingerScan> = serde_json::from_str(&raw).unwrap();

    let result = ctx
        .core
        .enroll(
            &fingers,
            &full_quality(),
            DidMode::Deterministic,
            None,
            &mut rng,
        )
        .unwrap();

    let output = serde_json::to_value(&result).unwrap();
    for key in ["did", "id_hash", "helpers", "metadata_payload"] {
        assert!(output.get(key).is_some(), "missing {key}");
    }
}

#[test_log::test]
fn re_enrollment_yields_a_new_identity() {
    let ctx = TestContext::new();
    let mut rng = seeded_rng(102);

    let first = ctx
        .core
        .enroll(
            &four_scans(),
            &full_quality(),
            DidMode::Deterministic,
            None,
            &mut rng,
        )
        .unwrap();
    let second = ctx
        .core
        .enroll(
            &four_scans(),
            &full_quality(),
            DidMode::Deterministic,
            None,
            &mut rng,
        )
        .unwrap();

    // Fresh salts mean fresh digests, a fresh commitment, a fresh DID.
    assert_ne!(first.did, second.did);
    assert_ne!(first.id_hash, second.id_hash);
    assert_ne!(first.enrollment_id, second.enrollment_id);
}

#[test_log::test]
fn finger_rotation_recomputes_only_the_commitment() {
    let ctx = TestContext::new();
    let mut rng = seeded_rng(103);

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

    // Re-capture one damaged finger and fuzzy-extract it in isolation.
    let extractor = FuzzyExtractor::new();
    let rescan = scan("right-thumb", 9000.0);
    let template = rescan.into_template(
        ctx.core.config().quantization.grid_size,
        ctx.core.config().quantization.angle_bins,
    );
    let features = quantize(&template).unwrap();
    let (new_digest, _new_helper) = extractor.generate("right-thumb", &features, &mut rng);

    let rotated = ctx
        .core
        .rotate_finger(&result.finger_digests, "right-thumb", *new_digest.digest())
        .unwrap();

    assert_ne!(rotated.id_hash().to_hex(), result.id_hash);

    // Rotating an id that was never enrolled is refused.
    assert!(ctx
        .core
        .rotate_finger(&result.finger_digests, "left-pinky", [1u8; 32])
        .is_err());
}
