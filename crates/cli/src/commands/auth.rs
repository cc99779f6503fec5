//! Account commands.
//!
//! # Usage
//!
//! ```bash
//! member-ledger sign-up -u ada -e ada@example.com -p secret1 --confirm-password secret1 --accept-terms
//! member-ledger sign-in -u ada -e ada@example.com -p secret1 --remember
//! member-ledger whoami
//! member-ledger sign-out
//! ```

use std::io::Write;

use clap::Args;
use secrecy::SecretString;

use member_ledger::KeyValueStore;
use member_ledger::services::{AuthGate, AuthState, SignInRequest, SignUpRequest};

use super::CommandError;

/// `sign-up` arguments.
#[derive(Debug, Args)]
pub struct SignUpArgs {
    /// Username
    #[arg(short, long)]
    pub username: String,

    /// Email address
    #[arg(short, long)]
    pub email: String,

    /// Password (at least six characters)
    #[arg(short, long)]
    pub password: String,

    /// Password again
    #[arg(long)]
    pub confirm_password: String,

    /// Agree to the terms and conditions
    #[arg(long)]
    pub accept_terms: bool,
}

/// `sign-in` arguments.
#[derive(Debug, Args)]
pub struct SignInArgs {
    /// Username
    #[arg(short, long)]
    pub username: String,

    /// Email address
    #[arg(short, long)]
    pub email: String,

    /// Password
    #[arg(short, long)]
    pub password: String,

    /// Remember this sign-in (required)
    #[arg(long)]
    pub remember: bool,
}

/// Register a new account. Does not sign in.
pub fn sign_up<S: KeyValueStore + ?Sized>(
    store: &S,
    args: SignUpArgs,
) -> Result<(), CommandError> {
    let request = SignUpRequest {
        username: args.username,
        email: args.email,
        password: SecretString::from(args.password),
        confirm_password: SecretString::from(args.confirm_password),
        accepted_terms: args.accept_terms,
    };
    AuthGate::new(store).sign_up(&request)?;

    writeln!(
        std::io::stdout().lock(),
        "Account created. Sign in with `member-ledger sign-in`."
    )?;
    Ok(())
}

/// Sign in and remember the session.
pub fn sign_in<S: KeyValueStore + ?Sized>(
    store: &S,
    args: SignInArgs,
) -> Result<(), CommandError> {
    let request = SignInRequest {
        username: args.username,
        email: args.email,
        password: SecretString::from(args.password),
        remember: args.remember,
    };
    let session = AuthGate::new(store).sign_in(&request)?;

    writeln!(std::io::stdout().lock(), "Welcome, {}!", session.username)?;
    Ok(())
}

/// Forget the current session.
pub fn sign_out<S: KeyValueStore + ?Sized>(store: &S) -> Result<(), CommandError> {
    AuthGate::new(store).sign_out()?;
    writeln!(std::io::stdout().lock(), "Signed out.")?;
    Ok(())
}

/// Print who is signed in.
pub fn whoami<S: KeyValueStore + ?Sized>(store: &S) -> Result<(), CommandError> {
    let mut out = std::io::stdout().lock();
    match AuthGate::new(store).state()? {
        AuthState::Authenticated(session) => {
            writeln!(out, "{} <{}>", session.username, session.email)?;
        }
        AuthState::Anonymous => writeln!(out, "Not signed in.")?,
    }
    Ok(())
}
