//! Unified error handling for the ledger.

use thiserror::Error;

use member_ledger_core::RecordError;

use crate::config::ConfigError;
use crate::services::{AuthError, RecordServiceError};
use crate::store::StoreError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Sign-up, sign-in or session check failed.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// Member or payment form / position rejected.
    #[error("{0}")]
    Record(#[from] RecordError),

    /// Store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<RecordServiceError> for LedgerError {
    fn from(err: RecordServiceError) -> Self {
        match err {
            RecordServiceError::Record(err) => Self::Record(err),
            RecordServiceError::Store(err) => Self::Store(err),
        }
    }
}

impl LedgerError {
    /// Returns true if the error is a rejected form or request rather than
    /// an environment failure (store, configuration).
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        match self {
            Self::Auth(AuthError::Store(_)) | Self::Store(_) | Self::Config(_) => false,
            Self::Auth(_) | Self::Record(_) => true,
        }
    }
}
