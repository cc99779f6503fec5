//! Dashboard summary for the signed-in user.

use member_ledger_core::{Amount, Session, Theme};

use super::auth::AuthGate;
use super::members::MemberRegistry;
use super::payments::PaymentLedger;
use super::preferences::Preferences;
use crate::error::LedgerError;
use crate::store::KeyValueStore;

/// What the dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub session: Session,
    pub member_count: usize,
    pub payment_count: usize,
    pub total_paid: Amount,
    pub theme: Theme,
}

impl DashboardSummary {
    /// Build the summary. Requires a signed-in session.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Auth` with `AuthError::NotAuthenticated` when
    /// nobody is signed in, or a store error.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self, LedgerError> {
        let session = AuthGate::new(store).require_session()?;
        let members = MemberRegistry::load(store)?;
        let payments = PaymentLedger::load(store)?;

        Ok(Self {
            session,
            member_count: members.members().len(),
            payment_count: payments.payments().len(),
            total_paid: payments.total(),
            theme: Preferences::new(store).theme()?,
        })
    }

    /// Greeting line, e.g. `Welcome, ada!`.
    #[must_use]
    pub fn greeting(&self) -> String {
        format!("Welcome, {}!", self.session.username)
    }
}
