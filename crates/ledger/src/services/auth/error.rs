//! Authentication error types.

use thiserror::Error;

use member_ledger_core::{EmailError, Password};

use crate::store::StoreError;

/// Errors that can occur during sign-up, sign-in and session checks.
///
/// Every variant except [`AuthError::Store`] is a recoverable form error:
/// nothing was written when it is returned.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required field was left blank.
    #[error("please fill in all fields")]
    MissingFields,

    /// Password shorter than the minimum length.
    #[error("password must be at least {} characters", Password::MIN_LENGTH)]
    WeakPassword,

    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Terms and conditions were not accepted.
    #[error("you must agree to the terms and conditions")]
    TermsNotAccepted,

    /// Email is not a well-formed address.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Username or email already registered.
    #[error("username or email already exists")]
    AlreadyExists,

    /// The "remember me" consent box was not checked.
    #[error("please check \"remember me\" to sign in")]
    ConsentRequired,

    /// No user matches the given username, email and password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A protected operation was attempted without a session.
    #[error("please sign in first")]
    NotAuthenticated,

    /// Store read/write error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
