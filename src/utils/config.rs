use config::{Config as ConfigLib, ConfigError, Environment, File};
use serde::Deserialize;

use crate::utils::error::{CoreError, Result};

/// Default CIP-20 transaction-metadata label for identity payloads.
pub const DEFAULT_METADATA_LABEL: u32 = 674;

/// Default serialized payload ceiling, matching Cardano inline-metadata practice.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 16 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct CoreConfig {
    pub quantization: QuantizationConfig,
    pub metadata: MetadataConfig,
    pub did: DidConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuantizationConfig {
    /// Side length of one spatial grid cell, in the scanner's coordinate units.
    pub grid_size: f64,
    /// Number of discrete orientation bins over [0, 360).
    pub angle_bins: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetadataConfig {
    pub label: u32,
    pub max_payload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DidConfig {
    pub network: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            quantization: QuantizationConfig {
                grid_size: 12.0,
                angle_bins: 16,
            },
            metadata: MetadataConfig {
                label: DEFAULT_METADATA_LABEL,
                max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            },
            did: DidConfig {
                network: "mainnet".to_string(),
            },
        }
    }
}

impl CoreConfig {
    /// Load configuration from `config/default.toml` (optional), a local
    /// override file, and `BIOANCHOR_*` environment variables.
    pub fn load() -> Result<Self> {
        let config = ConfigLib::builder()
            // Start with default values
            .set_default("quantization.grid_size", 12.0)?
            .set_default("quantization.angle_bins", 16)?
            .set_default("metadata.label", DEFAULT_METADATA_LABEL as i64)?
            .set_default("metadata.max_payload_bytes", DEFAULT_MAX_PAYLOAD_BYTES as i64)?
            .set_default("did.network", "mainnet")?
            // Load from config file
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // Override with environment variables (e.g., BIOANCHOR_DID_NETWORK)
            .add_source(Environment::with_prefix("BIOANCHOR").separator("_"))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.quantization.grid_size.is_finite() || self.quantization.grid_size <= 0.0 {
            return Err(CoreError::Config(
                "quantization.grid_size must be a positive finite number".into(),
            ));
        }
        if self.quantization.angle_bins == 0 || self.quantization.angle_bins > 360 {
            return Err(CoreError::Config(
                "quantization.angle_bins must be in 1..=360".into(),
            ));
        }
        if self.metadata.max_payload_bytes == 0 {
            return Err(CoreError::Config(
                "metadata.max_payload_bytes must be greater than 0".into(),
            ));
        }
        if self.did.network.trim().is_empty() {
            return Err(CoreError::Config("did.network must be set".into()));
        }

        Ok(())
    }
}

impl From<ConfigError> for CoreError {
    fn from(error: ConfigError) -> Self {
        CoreError::Config(error.to_string())
    }
}
