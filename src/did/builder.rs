// src/did/builder.rs
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::core::identity::types::AggregatedCommitment;
use crate::utils::error::DidError;

/// DID method prefix shared by both construction modes.
const DID_METHOD_PREFIX: &str = "did:cardano";

/// How the DID string is derived from the commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DidMode {
    /// Network-scoped hash of the commitment; nothing about the wallet
    /// leaks into the identifier. Preferred for new enrollments.
    #[default]
    Deterministic,
    /// Wallet-address-anchored fragment form kept for deployments that
    /// minted identities before the deterministic scheme existed.
    LegacyFragment,
}

/// Derive the DID string for a commitment.
///
/// Identical inputs always yield a byte-identical ASCII string.
pub fn build_did(
    commitment: &AggregatedCommitment,
    mode: DidMode,
    network: &str,
    wallet_address: Option<&str>,
) -> Result<String, DidError> {
    match mode {
        DidMode::Deterministic => {
            let network = network.trim();
            if network.is_empty() || !network.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(DidError::InvalidNetwork);
            }
            let suffix = bs58::encode(commitment.id_hash().as_bytes()).into_string();
            Ok(format!("{DID_METHOD_PREFIX}:{network}:{suffix}"))
        }
        DidMode::LegacyFragment => {
            let wallet = wallet_address
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .ok_or(DidError::MissingWalletAddress)?;
            let fragment = URL_SAFE_NO_PAD.encode(commitment.as_bytes());
            Ok(format!("{DID_METHOD_PREFIX}:{wallet}#{fragment}"))
        }
    }
}
