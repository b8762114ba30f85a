//! Settings loading and validation.
//!
//! Values are read from `SEALKIT_*` environment variables. Every field has a
//! default, so an empty environment yields [`Settings::default`]. Settings
//! never carry key material.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::crypto::AES_KEY_LENS;

/// Validated toolkit settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Size of generated AES keys in bits (128, 192 or 256).
    #[serde(default = "default_key_bits")]
    pub key_bits: usize,

    /// Size of generated HMAC keys in bits.
    #[serde(default = "default_mac_key_bits")]
    pub mac_key_bits: usize,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default = "default_log_json")]
    pub log_json: bool,
}

fn default_key_bits() -> usize {
    256
}
fn default_mac_key_bits() -> usize {
    256
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_json() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_bits: default_key_bits(),
            mac_key_bits: default_mac_key_bits(),
            log_level: default_log_level(),
            log_json: default_log_json(),
        }
    }
}

impl Settings {
    /// Load and validate settings from `SEALKIT_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        Self::load(config::Environment::with_prefix("SEALKIT"))
    }

    fn load(source: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(source.try_parsing(true))
            .build()
            .context("failed to build settings from environment")?;

        let s: Settings = cfg
            .try_deserialize()
            .context("failed to deserialise settings")?;

        s.validate()?;
        Ok(s)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    pub fn validate(&self) -> Result<()> {
        if !AES_KEY_LENS.contains(&(self.key_bits / 8)) || self.key_bits % 8 != 0 {
            anyhow::bail!("SEALKIT_KEY_BITS must be 128, 192 or 256 (got {})", self.key_bits);
        }
        if self.mac_key_bits < 128 || self.mac_key_bits % 8 != 0 {
            anyhow::bail!(
                "SEALKIT_MAC_KEY_BITS must be a multiple of 8 and at least 128 (got {})",
                self.mac_key_bits
            );
        }
        if self.log_level.trim().is_empty() {
            anyhow::bail!("SEALKIT_LOG_LEVEL must not be empty");
        }
        Ok(())
    }
}
