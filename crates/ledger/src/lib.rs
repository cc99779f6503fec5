//! Member Ledger library.
//!
//! Everything behind the command line: where data lives, who is signed
//! in, and the member and payment lists. All operations are synchronous
//! and run to completion; every mutation is written back to the store
//! before the in-memory working copy changes.
//!
//! # Modules
//!
//! - [`config`] - Environment-driven configuration
//! - [`store`] - The key-value store abstraction and its backends
//! - [`services`] - Auth gate, member registry, payment ledger, preferences, dashboard
//! - [`error`] - Application-level error type

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod services;
pub mod store;

pub use config::{ConfigError, LedgerConfig};
pub use error::LedgerError;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError, StoreKey};
