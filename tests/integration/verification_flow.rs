// tests/integration/verification_flow.rs
use bioanchor::{DidMode, FingerScan, VerificationReason};

use crate::common::{four_scans, full_quality, jittered_scans, seeded_rng, TestContext};

fn enroll(ctx: &TestContext, seed: u64) -> (Vec<bioanchor::HelperData>, String) {
    let mut rng = seeded_rng(seed);
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
    (result.helpers, result.id_hash)
}

#[test_log::test]
fn clean_rescan_verifies_ok() {
    let ctx = TestContext::new();
    let (helpers, id_hash) = enroll(&ctx, 200);

    let outcome = ctx
        .core
        .verify(&four_scans(), &full_quality(), &helpers, &id_hash)
        .unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.reason, VerificationReason::Ok);

    let json = serde_json::to_value(outcome).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["reason"], "ok");
}

#[test_log::test]
fn jittered_rescan_still_verifies() {
    let ctx = TestContext::new();
    let (helpers, id_hash) = enroll(&ctx, 201);

    let outcome = ctx
        .core
        .verify(&jittered_scans(), &full_quality(), &helpers, &id_hash)
        .unwrap();

    assert!(outcome.success, "sub-capacity noise must verify");
}

#[test_log::test]
fn displaced_finger_fails_with_capacity_exceeded() {
    let ctx = TestContext::new();
    let (helpers, id_hash) = enroll(&ctx, 202);

    let mut scans = four_scans();
    scans[1] = FingerScan {
        finger_id: "left-thumb".to_string(),
        minutiae: scans[1]
            .minutiae
            .iter()
            .map(|m| [m[0] + 777.0, m[1] + 777.0, (m[2] + 90.0) % 360.0])
            .collect(),
    };

    let outcome = ctx
        .core
        .verify(&scans, &full_quality(), &helpers, &id_hash)
        .unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.reason, VerificationReason::CapacityExceeded);
}

#[test_log::test]
fn swapped_fingers_do_not_verify() {
    let ctx = TestContext::new();
    let (helpers, id_hash) = enroll(&ctx, 203);

    // Present left-index's minutiae under right-index's id and vice versa.
    let mut scans = four_scans();
    let tmp = scans[0].minutiae.clone();
    scans[0].minutiae = scans[2].minutiae.clone();
    scans[2].minutiae = tmp;

    let outcome = ctx
        .core
        .verify(&scans, &full_quality(), &helpers, &id_hash)
        .unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.reason, VerificationReason::CapacityExceeded);
}

#[test_log::test]
fn helpers_from_someone_else_fail_integrity() {
    let ctx = TestContext::new();
    let (helpers, _) = enroll(&ctx, 204);
    let (_, other_id_hash) = enroll(&ctx, 205);

    // Digest reproduction succeeds, but the commitment belongs to a
    // different enrollment.
    let outcome = ctx
        .core
        .verify(&four_scans(), &full_quality(), &helpers, &other_id_hash)
        .unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.reason, VerificationReason::IntegrityFailure);
}

#[test_log::test]
fn low_quality_rescan_set_is_insufficient() {
    let ctx = TestContext::new();
    let (helpers, id_hash) = enroll(&ctx, 206);

    // Only three helpers presented back, one of them under the 0.70 floor.
    let scans = four_scans()[..3].to_vec();
    let three_helpers = helpers[..3].to_vec();
    let mut quality = full_quality();
    quality.insert("right-index".to_string(), 0.69);

    let outcome = ctx
        .core
        .verify(&scans, &quality, &three_helpers, &id_hash)
        .unwrap();

    assert!(!outcome.success);
    assert_eq!(outcome.reason, VerificationReason::InsufficientQuality);
}
