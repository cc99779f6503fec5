//! Ledger services.
//!
//! Each service borrows a [`KeyValueStore`](crate::store::KeyValueStore)
//! and owns whatever working state it needs; nothing is shared through
//! globals. Member and payment services load their list once and write it
//! back after every successful mutation.

pub mod auth;
pub mod dashboard;
pub mod members;
pub mod payments;
pub mod preferences;
pub mod records;

pub use auth::{AuthError, AuthGate, AuthState, SignInRequest, SignUpRequest};
pub use dashboard::DashboardSummary;
pub use members::MemberRegistry;
pub use payments::PaymentLedger;
pub use preferences::Preferences;
pub use records::{RecordList, RecordServiceError};
