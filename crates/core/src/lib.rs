//! Member Ledger Core - Shared types and list logic.
//!
//! This crate provides the domain vocabulary used across all Member Ledger
//! components:
//! - `ledger` - Store backends and the auth, member and payment services
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure functions over
//! in-memory collections - no I/O, no storage access. Persisting a
//! collection after a mutation is always the caller's job.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, emails, passwords, amounts and enums
//! - [`records`] - Users, sessions, members and payments plus form validation
//! - [`collection`] - Positional record collections, filtering and sorting
//! - [`error`] - Record validation and indexing errors

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod collection;
pub mod error;
pub mod records;
pub mod types;

pub use collection::{Entry, Record, RecordCollection, SortDirection, SortKey, SortSpec, View};
pub use error::RecordError;
pub use records::*;
pub use types::*;
