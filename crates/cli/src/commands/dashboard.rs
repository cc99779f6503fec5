//! Dashboard command.

use std::io::Write;

use member_ledger::KeyValueStore;
use member_ledger::services::DashboardSummary;

use super::CommandError;

/// Print the greeting and record counts for the signed-in user.
pub fn show<S: KeyValueStore + ?Sized>(store: &S) -> Result<(), CommandError> {
    let summary = DashboardSummary::load(store)?;

    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", summary.greeting())?;
    writeln!(out, "Signed in as {}", summary.session.email)?;
    writeln!(out, "Members:  {}", summary.member_count)?;
    writeln!(
        out,
        "Payments: {} (total {})",
        summary.payment_count,
        summary.total_paid.display()
    )?;
    writeln!(out, "Theme:    {}", summary.theme)?;
    Ok(())
}
