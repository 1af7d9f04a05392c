// src/utils/error.rs
use thiserror::Error;

/// Failures while normalizing raw minutiae into a discrete feature set.
#[derive(Debug, Error, PartialEq)]
pub enum QuantizationError {
    #[error("minutiae sequence is empty")]
    Empty,

    #[error("degenerate quantization grid: grid_size={grid_size}, angle_bins={angle_bins}")]
    DegenerateGrid { grid_size: f64, angle_bins: u32 },

    #[error("minutia {index} has a non-finite coordinate or angle")]
    NonFinite { index: usize },
}

/// Failures while reproducing a digest from a noisy rescan.
///
/// `CorrectionCapacityExceeded` is the expected outcome for a different
/// finger or excessive noise; `IntegrityFailure` means the helper data
/// itself does not check out. Callers must be able to tell them apart.
#[derive(Debug, Error, PartialEq)]
pub enum ReproductionError {
    #[error("noisy codeword differs from the enrolled codeword by more than {max_errors} bits")]
    CorrectionCapacityExceeded { max_errors: usize },

    #[error("helper data integrity check failed")]
    IntegrityFailure,
}

/// Failures while combining per-finger digests into a commitment.
#[derive(Debug, Error, PartialEq)]
pub enum AggregationError {
    #[error("{present} finger(s) present but quality floor {required_quality} not met")]
    InsufficientQuality { present: usize, required_quality: f64 },

    #[error("finger {0:?} appears more than once in the digest set")]
    DuplicateFinger(String),

    #[error("finger {0:?} is not part of the enrolled digest set")]
    UnknownFinger(String),
}

/// Failures while constructing a DID string.
#[derive(Debug, Error, PartialEq)]
pub enum DidError {
    #[error("legacy fragment mode requires a wallet address")]
    MissingWalletAddress,

    #[error("network identifier is empty or malformed")]
    InvalidNetwork,
}

/// Failures while building an on-chain metadata payload.
#[derive(Debug, Error, PartialEq)]
pub enum PayloadError {
    #[error("serialized payload is {actual} bytes, exceeding the {limit} byte limit")]
    TooLarge { actual: usize, limit: usize },
}

/// Failures raised by storage backends.
///
/// `NotFound` is permanent for the given reference; `Unavailable` is
/// transient and the caller may retry.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no blob stored under reference {0:?}")]
    NotFound(String),

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("malformed input: {0}")]
    Malformed(String),

    #[error(transparent)]
    Quantization(#[from] QuantizationError),

    #[error(transparent)]
    Reproduction(#[from] ReproductionError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    #[error(transparent)]
    Did(#[from] DidError),

    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
