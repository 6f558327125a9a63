//! Token configuration with TOML file support.

use gavel_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::LedgerError;

/// Deployment parameters of a token ledger.
///
/// Can be loaded from a TOML file via [`TokenConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Human-readable token name; also the typed-data domain name.
    #[serde(default = "default_name")]
    pub name: String,

    /// Ticker symbol.
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Chain the ledger is deployed on, bound into every signed message.
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    /// Version string of the typed-data signing domain.
    #[serde(default = "default_permit_version")]
    pub permit_version: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_name() -> String {
    "Gavel".to_string()
}

fn default_symbol() -> String {
    "GVL".to_string()
}

fn default_chain_id() -> u64 {
    1
}

fn default_permit_version() -> String {
    "1".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl TokenConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| LedgerError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, LedgerError> {
        toml::from_str(s).map_err(|e| LedgerError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, LedgerError> {
        toml::to_string_pretty(self).map_err(|e| LedgerError::Config(e.to_string()))
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            symbol: default_symbol(),
            chain_id: default_chain_id(),
            permit_version: default_permit_version(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}
