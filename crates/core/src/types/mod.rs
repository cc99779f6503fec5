//! Core types for Member Ledger.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod amount;
pub mod email;
pub mod id;
pub mod password;
pub mod payment_method;
pub mod theme;

pub use amount::{Amount, AmountError};
pub use email::{Email, EmailError};
pub use id::*;
pub use password::Password;
pub use payment_method::PaymentMethod;
pub use theme::Theme;
