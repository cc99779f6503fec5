//! Account email addresses.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why an address was rejected at sign-up.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email is required")]
    Blank,

    #[error("email is longer than {limit} characters")]
    Oversized { limit: usize },

    /// No `@` at all, or nothing on one side of the last one.
    #[error("'{0}' is not an email address")]
    Malformed(String),
}

/// A case-folded email address.
///
/// Accounts are looked up by email without regard to case, so the address
/// is trimmed and lowercased once when parsed and kept that way. Stored as
/// a bare JSON string.
///
/// ```
/// use member_ledger_core::Email;
///
/// let email = Email::parse("  Ada@Example.COM ").unwrap();
/// assert_eq!(email.as_str(), "ada@example.com");
/// assert!(email.matches("ADA@example.com"));
///
/// assert!(Email::parse("ada.example.com").is_err());
/// assert!(Email::parse("ada@").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Upper bound on the folded address length (RFC 5321).
    pub const LIMIT: usize = 254;

    /// Fold and validate sign-up input.
    ///
    /// Only the shape `<something>@<something>` is checked, split at the
    /// last `@`.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError`] for blank, oversized or malformed input.
    pub fn parse(raw: &str) -> Result<Self, EmailError> {
        let folded = Self::fold(raw);
        if folded.is_empty() {
            return Err(EmailError::Blank);
        }
        if folded.len() > Self::LIMIT {
            return Err(EmailError::Oversized { limit: Self::LIMIT });
        }

        match folded.rsplit_once('@') {
            Some((mailbox, host)) if !mailbox.is_empty() && !host.is_empty() => Ok(Self(folded)),
            _ => Err(EmailError::Malformed(raw.trim().to_owned())),
        }
    }

    /// Trim and lowercase without validating.
    ///
    /// Sign-in compares folded input against stored addresses; malformed
    /// input just fails to match.
    #[must_use]
    pub fn fold(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    /// Returns true if `raw` folds to this address.
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        self.0 == Self::fold(raw)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_ordinary_addresses() {
        for raw in [
            "ada@example.com",
            "grace.hopper+navy@mail.example.org",
            "x@y",
        ] {
            assert_eq!(Email::parse(raw).unwrap().as_str(), raw);
        }
    }

    #[test]
    fn test_folds_case_and_whitespace() {
        let email = Email::parse("  Grace.Hopper@Navy.MIL\t").unwrap();
        assert_eq!(email.as_str(), "grace.hopper@navy.mil");
        assert_eq!(email.to_string(), "grace.hopper@navy.mil");
    }

    #[test]
    fn test_rejects_blank_and_oversized() {
        assert_eq!(Email::parse(" \n"), Err(EmailError::Blank));

        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(
            Email::parse(&long),
            Err(EmailError::Oversized { limit: 254 })
        );
    }

    #[test]
    fn test_rejects_malformed() {
        for raw in ["ada.example.com", "@example.com", "ada@"] {
            assert!(matches!(Email::parse(raw), Err(EmailError::Malformed(_))), "{raw}");
        }
    }

    #[test]
    fn test_matches_ignores_case() {
        let email = Email::parse("ada@example.com").unwrap();
        assert!(email.matches(" ADA@example.com"));
        assert!(!email.matches("ada@example.org"));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let email = Email::parse("Ada@Example.com").unwrap();
        assert_eq!(serde_json::to_string(&email).unwrap(), "\"ada@example.com\"");
    }
}
