// tests/integration/main.rs
#[path = "../common/mod.rs"]
mod common;

mod enrollment_flow;
mod storage_roundtrip;
mod verification_flow;
