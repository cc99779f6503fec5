//! Stored records and the forms that create them.
//!
//! Each persisted list holds one of these record types. Members and
//! payments are built from a draft (raw, untrusted form input) through a
//! validating constructor, so an invalid record never reaches a collection.

pub mod member;
pub mod payment;
pub mod user;

pub use member::{Member, MemberDraft, MemberSortKey};
pub use payment::{Payment, PaymentDraft, PaymentSortKey};
pub use user::{Session, User};

use crate::error::RecordError;

/// Trim `value` and require it to be non-empty.
fn required(field: &str, value: &str) -> Result<String, RecordError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RecordError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_owned())
}
