//! Persistent key-value storage.
//!
//! # Keys
//!
//! | Key | Value |
//! |---|---|
//! | `users` | array of users |
//! | `currentUser` | the signed-in session, or absent |
//! | `members` | array of members |
//! | `payments` | array of payments |
//! | `theme` | `"dark"` or `"light"` |
//!
//! Each key holds one JSON document. Writes replace the whole value and are
//! atomic per key; there are no transactions across keys. Callers persist
//! explicitly after every mutation.

pub mod file;
pub mod memory;

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem error while reading or writing a value.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A value could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key contains characters a backend cannot store.
    #[error("invalid store key: {0}")]
    InvalidKey(String),
}

/// A string-keyed store of string values.
///
/// Methods take `&self`: the ledger is single-threaded and backends handle
/// their own interior mutability.
pub trait KeyValueStore {
    /// Read the raw value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend fails to read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend fails to write.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend fails to delete.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// The fixed keys the ledger stores its state under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Users,
    CurrentUser,
    Members,
    Payments,
    Theme,
}

impl StoreKey {
    /// All keys.
    pub const ALL: [Self; 5] = [
        Self::Users,
        Self::CurrentUser,
        Self::Members,
        Self::Payments,
        Self::Theme,
    ];

    /// The key as stored.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::CurrentUser => "currentUser",
            Self::Members => "members",
            Self::Payments => "payments",
            Self::Theme => "theme",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read and decode the JSON value under `key`.
///
/// Absent keys, `null`, and values that fail to decode as `T` all come back
/// as `Ok(None)`; a malformed value is logged and otherwise ignored.
///
/// # Errors
///
/// Returns `StoreError` only if the backend itself fails.
pub fn read_json<T, S>(store: &S, key: StoreKey) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key.as_str())? else {
        return Ok(None);
    };

    if raw.trim() == "null" {
        return Ok(None);
    }

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            tracing::warn!(key = %key, error = %err, "Ignoring malformed stored value");
            Ok(None)
        }
    }
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns `StoreError` if encoding or the backend write fails.
pub fn write_json<T, S>(store: &S, key: StoreKey, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key.as_str(), &raw)
}
