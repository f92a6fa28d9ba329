//! Ledger configuration
//!
//! Defaults reproduce the deployed ledger constants. A TOML file may override
//! them; a missing file yields the defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Reserved principal that can never become the authority contract.
pub const BURN_PRINCIPAL: &str = "SP000000000000000000002Q6VF78";

/// What `calculate_share` does when the pool denominator is zero or negative.
///
/// The pool is `participants * 100 + (100 - organizer_weight)`, so an empty
/// tour with the default organizer weight always hits this case.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DegeneratePoolPolicy {
    /// The share is 0; registration proceeds.
    #[default]
    ZeroShare,
    /// The computation fails with `InvalidWeight`.
    Reject,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Reserved split rule; no operation reads it yet.
    pub default_split_rule: u32,

    /// Sentinel rejected by `set_authority_contract`
    pub burn_principal: String,

    /// Weight used when a role has no entry
    pub default_role_weight: u32,

    /// Role whose weight adjusts the pool once per tour
    pub organizer_role: String,

    /// Inclusive upper bound on role weights
    pub max_role_weight: u32,

    pub degenerate_pool: DegeneratePoolPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            default_split_rule: 1,
            burn_principal: BURN_PRINCIPAL.to_string(),
            default_role_weight: 100,
            organizer_role: "organizer".to_string(),
            max_role_weight: 1000,
            degenerate_pool: DegeneratePoolPolicy::ZeroShare,
        }
    }
}

impl LedgerConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns the defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: LedgerConfig =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_role_weight == 0 {
            return Err(ConfigError::Invalid(
                "default_role_weight must be positive".to_string(),
            ));
        }
        if self.max_role_weight == 0 {
            return Err(ConfigError::Invalid(
                "max_role_weight must be positive".to_string(),
            ));
        }
        if self.default_role_weight > self.max_role_weight {
            return Err(ConfigError::Invalid(format!(
                "default_role_weight {} exceeds max_role_weight {}",
                self.default_role_weight, self.max_role_weight
            )));
        }
        if self.organizer_role.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "organizer_role cannot be empty".to_string(),
            ));
        }
        if self.burn_principal.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "burn_principal cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether `weight` lies in `(0, max_role_weight]`.
    pub fn is_valid_weight(&self, weight: u32) -> bool {
        weight > 0 && weight <= self.max_role_weight
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
