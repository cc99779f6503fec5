//! Ledger configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MEMBER_LEDGER_DATA_DIR` - Directory holding the stored JSON values
//!   (default: `.member-ledger`)
//! - `MEMBER_LEDGER_LOG` - Log filter directive (default: `info`)

use std::path::PathBuf;

use thiserror::Error;

use crate::store::{JsonFileStore, StoreError};

const DEFAULT_DATA_DIR: &str = ".member-ledger";
const DEFAULT_LOG_FILTER: &str = "info";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Ledger configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Directory for the file-backed store
    pub data_dir: PathBuf,
    /// `tracing` filter directive (e.g. `info`, `member_ledger=debug`)
    pub log_filter: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl LedgerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = match lookup("MEMBER_LEDGER_DATA_DIR") {
            Some(dir) if dir.trim().is_empty() => {
                return Err(ConfigError::InvalidEnvVar(
                    "MEMBER_LEDGER_DATA_DIR".to_owned(),
                    "must not be empty".to_owned(),
                ));
            }
            Some(dir) => PathBuf::from(dir.trim()),
            None => PathBuf::from(DEFAULT_DATA_DIR),
        };

        let log_filter = lookup("MEMBER_LEDGER_LOG")
            .map(|filter| filter.trim().to_owned())
            .filter(|filter| !filter.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned());

        Ok(Self {
            data_dir,
            log_filter,
        })
    }

    /// Open the file-backed store in the configured data directory.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the directory cannot be created.
    pub fn open_store(&self) -> Result<JsonFileStore, StoreError> {
        JsonFileStore::open(&self.data_dir)
    }
}
