//! Accounts and the signed-in session.

use serde::{Deserialize, Serialize};

use crate::types::{Email, Password};

/// A registered account.
///
/// Created at sign-up and never changed afterwards. Usernames and
/// (case-folded) emails are unique across all users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique username, as entered (trimmed).
    pub username: String,
    /// Unique, case-folded email address.
    pub email: Email,
    /// Account password.
    pub password: Password,
}

impl User {
    /// Returns true if this user holds `username` or the email `raw_email`
    /// folds to.
    #[must_use]
    pub fn collides_with(&self, username: &str, raw_email: &str) -> bool {
        self.username == username || self.email.matches(raw_email)
    }

    /// Returns true if all three credentials match this user.
    #[must_use]
    pub fn has_credentials(&self, username: &str, raw_email: &str, password: &str) -> bool {
        self.username == username && self.email.matches(raw_email) && self.password.verify(password)
    }
}

/// Identity snapshot of the signed-in user.
///
/// A denormalized copy rather than a reference into the user list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Session {
    /// Username of the signed-in user.
    pub username: String,
    /// Email of the signed-in user.
    pub email: Email,
}

impl From<&User> for Session {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}
