//! Stored password type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A stored account password.
///
/// Passwords are persisted as entered so existing `users` data keeps
/// working; see DESIGN.md for the hashing decision. `Debug` is redacted so
/// a password never ends up in a log line.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    /// Minimum accepted password length, in UTF-16 code units.
    pub const MIN_LENGTH: usize = 6;

    /// Wrap a password exactly as entered (no trimming).
    #[must_use]
    pub const fn new(password: String) -> Self {
        Self(password)
    }

    /// Returns true if the password meets the minimum length.
    ///
    /// Length is measured in UTF-16 code units, so a character outside the
    /// Basic Multilingual Plane (most emoji) counts twice. Accounts created
    /// by earlier clients were checked the same way.
    #[must_use]
    pub fn is_strong_enough(candidate: &str) -> bool {
        candidate.encode_utf16().count() >= Self::MIN_LENGTH
    }

    /// Returns true if `candidate` is exactly this password.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

impl From<String> for Password {
    fn from(password: String) -> Self {
        Self(password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let password = Password::new("hunter22".to_owned());
        let debug = format!("{password:?}");
        assert!(!debug.contains("hunter22"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_minimum_length_counts_utf16_units() {
        assert!(!Password::is_strong_enough("abc"));
        assert!(!Password::is_strong_enough("abcde"));
        assert!(Password::is_strong_enough("abcdef"));
        assert!(Password::is_strong_enough("äöüßéè"));
        // Three emoji are six UTF-16 units.
        assert!(Password::is_strong_enough("😀🎉🔑"));
        assert!(!Password::is_strong_enough("😀🎉"));
    }

    #[test]
    fn test_verify_is_exact() {
        let password = Password::new("Secret1".to_owned());
        assert!(password.verify("Secret1"));
        assert!(!password.verify("secret1"));
        assert!(!password.verify("Secret1 "));
    }
}
