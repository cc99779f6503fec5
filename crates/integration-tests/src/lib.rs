//! Integration tests for Member Ledger.
//!
//! Every test runs the ledger services against a [`JsonFileStore`] in a
//! fresh temporary directory, so nothing leaks between tests or into the
//! working directory.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p member-ledger-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `auth_flow` - Sign-up, sign-in, sign-out and protected access
//! - `member_registry` - Member lifecycle, search and sort over the file store
//! - `payment_ledger` - Payment validation, totals and legacy data

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use secrecy::SecretString;
use tempfile::TempDir;

use member_ledger::services::{AuthGate, SignInRequest, SignUpRequest};
use member_ledger::{JsonFileStore, KeyValueStore};
use member_ledger_core::Session;

/// A file store in a temporary directory that lives as long as the context.
pub struct TestContext {
    dir: TempDir,
    pub store: JsonFileStore,
}

impl TestContext {
    /// Create a context with an empty store.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = JsonFileStore::open(dir.path()).expect("Failed to open store");
        Self { dir, store }
    }

    /// A second store over the same directory, as a restarted process
    /// would see it.
    ///
    /// # Panics
    ///
    /// Panics if the store cannot be opened.
    #[must_use]
    pub fn reopen(&self) -> JsonFileStore {
        JsonFileStore::open(self.dir.path()).expect("Failed to reopen store")
    }

    /// Path of the file backing `key`.
    #[must_use]
    pub fn file_for(&self, key: &str) -> PathBuf {
        self.dir.path().join(format!("{key}.json"))
    }

    /// Write a raw stored value, bypassing the services.
    ///
    /// # Panics
    ///
    /// Panics if the value cannot be written.
    pub fn seed(&self, key: &str, raw: &str) {
        self.store.set(key, raw).expect("Failed to seed store");
    }

    /// Raw stored value for `key`.
    ///
    /// # Panics
    ///
    /// Panics if the store cannot be read.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.store.get(key).expect("Failed to read store")
    }

    /// Register `username` and sign in, returning the session.
    ///
    /// # Panics
    ///
    /// Panics if either step fails.
    pub fn signed_in(&self, username: &str) -> Session {
        let email = format!("{username}@example.com");
        let auth = AuthGate::new(&self.store);
        auth.sign_up(&sign_up_request(username, &email, "secret1"))
            .expect("Failed to sign up");
        auth.sign_in(&sign_in_request(username, &email, "secret1"))
            .expect("Failed to sign in")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A sign-up form with matching passwords and accepted terms.
#[must_use]
pub fn sign_up_request(username: &str, email: &str, password: &str) -> SignUpRequest {
    SignUpRequest {
        username: username.to_owned(),
        email: email.to_owned(),
        password: SecretString::from(password.to_owned()),
        confirm_password: SecretString::from(password.to_owned()),
        accepted_terms: true,
    }
}

/// A sign-in form with "remember me" checked.
#[must_use]
pub fn sign_in_request(username: &str, email: &str, password: &str) -> SignInRequest {
    SignInRequest {
        username: username.to_owned(),
        email: email.to_owned(),
        password: SecretString::from(password.to_owned()),
        remember: true,
    }
}
