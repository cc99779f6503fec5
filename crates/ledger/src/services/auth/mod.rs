//! Auth gate.
//!
//! Local username/email/password accounts with a single signed-in session.
//! Two states: anonymous (no `currentUser` stored) and authenticated.
//! Sign-up never signs the new user in.

mod error;

pub use error::AuthError;

use secrecy::{ExposeSecret, SecretString};

use member_ledger_core::{Email, Password, Session, User};

use crate::store::{KeyValueStore, StoreKey, read_json, write_json};

/// Sign-up form.
#[derive(Debug)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
    pub accepted_terms: bool,
}

/// Sign-in form.
#[derive(Debug)]
pub struct SignInRequest {
    pub username: String,
    pub email: String,
    pub password: SecretString,
    /// The "remember me" consent box; sign-in requires it.
    pub remember: bool,
}

/// Whether anyone is signed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated(Session),
}

/// Authentication service over a key-value store.
pub struct AuthGate<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> AuthGate<'a, S> {
    /// Create a new auth gate.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// All registered users.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the store cannot be read.
    pub fn users(&self) -> Result<Vec<User>, AuthError> {
        Ok(read_json(self.store, StoreKey::Users)?.unwrap_or_default())
    }

    /// Register a new account.
    ///
    /// Checks run in form order: blank fields, password length, password
    /// confirmation, terms, email format, then uniqueness of username and
    /// case-folded email. The user list is only written on success.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as an `AuthError`.
    pub fn sign_up(&self, request: &SignUpRequest) -> Result<(), AuthError> {
        let username = request.username.trim();
        let password = request.password.expose_secret();
        let confirm = request.confirm_password.expose_secret();

        if username.is_empty()
            || request.email.trim().is_empty()
            || password.is_empty()
            || confirm.is_empty()
        {
            return Err(AuthError::MissingFields);
        }
        if !Password::is_strong_enough(password) {
            return Err(AuthError::WeakPassword);
        }
        if password != confirm {
            return Err(AuthError::PasswordMismatch);
        }
        if !request.accepted_terms {
            return Err(AuthError::TermsNotAccepted);
        }
        let email = Email::parse(&request.email)?;

        let mut users = self.users()?;
        if users
            .iter()
            .any(|user| user.collides_with(username, email.as_str()))
        {
            tracing::debug!(username, "Sign-up rejected: account exists");
            return Err(AuthError::AlreadyExists);
        }

        users.push(User {
            username: username.to_owned(),
            email,
            password: Password::new(password.to_owned()),
        });
        write_json(self.store, StoreKey::Users, &users)?;

        tracing::info!(username, "Account created");
        Ok(())
    }

    /// Sign in and persist the session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ConsentRequired` if "remember me" is unchecked,
    /// `AuthError::MissingFields` if a field is blank, and
    /// `AuthError::InvalidCredentials` if no user matches all three of
    /// username, email and password.
    pub fn sign_in(&self, request: &SignInRequest) -> Result<Session, AuthError> {
        if !request.remember {
            return Err(AuthError::ConsentRequired);
        }

        let username = request.username.trim();
        let password = request.password.expose_secret();
        if username.is_empty() || request.email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let users = self.users()?;
        let user = users
            .iter()
            .find(|user| user.has_credentials(username, &request.email, password))
            .ok_or_else(|| {
                tracing::debug!(username, "Sign-in rejected: invalid credentials");
                AuthError::InvalidCredentials
            })?;

        let session = Session::from(user);
        write_json(self.store, StoreKey::CurrentUser, &session)?;

        tracing::info!(username = %session.username, "Signed in");
        Ok(session)
    }

    /// Drop the current session. Signing out while anonymous is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the session cannot be removed.
    pub fn sign_out(&self) -> Result<(), AuthError> {
        self.store.remove(StoreKey::CurrentUser.as_str())?;
        tracing::info!("Signed out");
        Ok(())
    }

    /// The persisted session, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the store cannot be read.
    pub fn current_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(read_json(self.store, StoreKey::CurrentUser)?)
    }

    /// Current auth state.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the store cannot be read.
    pub fn state(&self) -> Result<AuthState, AuthError> {
        Ok(self
            .current_session()?
            .map_or(AuthState::Anonymous, AuthState::Authenticated))
    }

    /// The session, or `AuthError::NotAuthenticated` for protected views.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` when anonymous.
    pub fn require_session(&self) -> Result<Session, AuthError> {
        self.current_session()?.ok_or(AuthError::NotAuthenticated)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn sign_up_request(username: &str, email: &str, password: &str) -> SignUpRequest {
        SignUpRequest {
            username: username.to_owned(),
            email: email.to_owned(),
            password: SecretString::from(password.to_owned()),
            confirm_password: SecretString::from(password.to_owned()),
            accepted_terms: true,
        }
    }

    fn sign_in_request(username: &str, email: &str, password: &str) -> SignInRequest {
        SignInRequest {
            username: username.to_owned(),
            email: email.to_owned(),
            password: SecretString::from(password.to_owned()),
            remember: true,
        }
    }

    #[test]
    fn test_sign_up_then_sign_in() {
        let store = MemoryStore::new();
        let gate = AuthGate::new(&store);

        gate.sign_up(&sign_up_request("ada", "Ada@Example.com", "analytical"))
            .unwrap();
        assert_eq!(gate.state().unwrap(), AuthState::Anonymous);

        let session = gate
            .sign_in(&sign_in_request("ada", "ada@example.com", "analytical"))
            .unwrap();
        assert_eq!(session.username, "ada");
        assert_eq!(session.email.as_str(), "ada@example.com");
        assert_eq!(gate.state().unwrap(), AuthState::Authenticated(session));
    }

    #[test]
    fn test_sign_up_weak_password() {
        let store = MemoryStore::new();
        let gate = AuthGate::new(&store);
        let result = gate.sign_up(&sign_up_request("ada", "ada@example.com", "abc"));
        assert!(matches!(result, Err(AuthError::WeakPassword)));
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_sign_up_validation_order() {
        let store = MemoryStore::new();
        let gate = AuthGate::new(&store);

        let mut request = sign_up_request("", "ada@example.com", "abc");
        assert!(matches!(gate.sign_up(&request), Err(AuthError::MissingFields)));

        request.username = "ada".to_owned();
        assert!(matches!(gate.sign_up(&request), Err(AuthError::WeakPassword)));

        request.password = SecretString::from("analytical".to_owned());
        assert!(matches!(gate.sign_up(&request), Err(AuthError::PasswordMismatch)));

        request.confirm_password = SecretString::from("analytical".to_owned());
        request.accepted_terms = false;
        assert!(matches!(gate.sign_up(&request), Err(AuthError::TermsNotAccepted)));

        request.accepted_terms = true;
        request.email = "not-an-email".to_owned();
        assert!(matches!(gate.sign_up(&request), Err(AuthError::InvalidEmail(_))));

        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_sign_up_rejects_duplicates_without_writing() {
        let store = MemoryStore::new();
        let gate = AuthGate::new(&store);
        gate.sign_up(&sign_up_request("ada", "ada@example.com", "analytical"))
            .unwrap();
        let before = store.snapshot();

        let same_name = gate.sign_up(&sign_up_request("ada", "other@example.com", "analytical"));
        assert!(matches!(same_name, Err(AuthError::AlreadyExists)));

        let same_email = gate.sign_up(&sign_up_request("grace", "ADA@EXAMPLE.COM", "analytical"));
        assert!(matches!(same_email, Err(AuthError::AlreadyExists)));

        assert_eq!(store.snapshot(), before);
        assert_eq!(gate.users().unwrap().len(), 1);
    }

    #[test]
    fn test_sign_in_requires_consent_first() {
        let store = MemoryStore::new();
        let gate = AuthGate::new(&store);
        let mut request = sign_in_request("", "", "");
        request.remember = false;
        assert!(matches!(gate.sign_in(&request), Err(AuthError::ConsentRequired)));

        request.remember = true;
        assert!(matches!(gate.sign_in(&request), Err(AuthError::MissingFields)));
    }

    #[test]
    fn test_sign_in_invalid_credentials() {
        let store = MemoryStore::new();
        let gate = AuthGate::new(&store);
        gate.sign_up(&sign_up_request("ada", "ada@example.com", "analytical"))
            .unwrap();

        for (username, email, password) in [
            ("ada", "ada@example.com", "wrong-password"),
            ("ada", "grace@example.com", "analytical"),
            ("grace", "ada@example.com", "analytical"),
        ] {
            let result = gate.sign_in(&sign_in_request(username, email, password));
            assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        }
        assert_eq!(gate.current_session().unwrap(), None);
    }

    #[test]
    fn test_sign_out_is_idempotent() {
        let store = MemoryStore::new();
        let gate = AuthGate::new(&store);
        gate.sign_up(&sign_up_request("ada", "ada@example.com", "analytical"))
            .unwrap();
        gate.sign_in(&sign_in_request("ada", "ada@example.com", "analytical"))
            .unwrap();

        gate.sign_out().unwrap();
        gate.sign_out().unwrap();
        assert_eq!(gate.state().unwrap(), AuthState::Anonymous);
        assert!(matches!(gate.require_session(), Err(AuthError::NotAuthenticated)));
    }

    #[test]
    fn test_reads_sessions_and_users_written_by_older_clients() {
        let store = MemoryStore::with_entries([
            (
                "users",
                r#"[{"username":"ada","email":"ada@example.com","password":"analytical"}]"#,
            ),
            ("currentUser", r#"{"username":"ada","email":"ada@example.com"}"#),
        ]);
        let gate = AuthGate::new(&store);
        assert_eq!(gate.require_session().unwrap().username, "ada");
        assert!(gate
            .sign_in(&sign_in_request("ada", "ada@example.com", "analytical"))
            .is_ok());
    }
}
