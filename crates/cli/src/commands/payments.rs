//! Payment commands.
//!
//! # Usage
//!
//! ```bash
//! member-ledger payments add -n "March dues" -a 25 -m "Mobile Money"
//! member-ledger payments list --sort amount-desc
//! member-ledger payments edit 1 -a 30
//! member-ledger payments remove --id 6f1c...
//! ```

use std::io::Write;

use clap::Args;

use member_ledger::KeyValueStore;
use member_ledger::services::PaymentLedger;
use member_ledger_core::{Payment, PaymentDraft, PaymentSortKey, RecordError, SortSpec};

use super::{CommandError, Target, require_session};

/// `payments add` arguments.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Payer or purpose
    #[arg(short, long)]
    pub name: String,

    /// Amount, zero or more
    #[arg(short, long, allow_hyphen_values = true)]
    pub amount: String,

    /// Credit Card, Bank Transfer, Mobile Money or Other
    #[arg(short, long)]
    pub method: String,

    /// Optional note
    #[arg(long, default_value = "")]
    pub description: String,
}

/// `payments edit` arguments. Omitted fields keep their current value.
#[derive(Debug, Args)]
pub struct EditArgs {
    #[command(flatten)]
    pub target: Target,

    /// New payer or purpose
    #[arg(short, long)]
    pub name: Option<String>,

    /// New amount
    #[arg(short, long, allow_hyphen_values = true)]
    pub amount: Option<String>,

    /// New payment method
    #[arg(short, long)]
    pub method: Option<String>,

    /// New note (pass "" to clear)
    #[arg(long)]
    pub description: Option<String>,
}

/// Print payments matching `search`, in `sort` order, with their positions.
pub fn list<S: KeyValueStore + ?Sized>(
    store: &S,
    search: &str,
    sort: SortSpec<PaymentSortKey>,
) -> Result<(), CommandError> {
    require_session(store)?;
    let ledger = PaymentLedger::load(store)?;
    let view = ledger.list(search, sort);

    let mut out = std::io::stdout().lock();
    if view.is_empty() {
        writeln!(out, "No payments found.")?;
    } else {
        for entry in &view {
            writeln!(out, "{}", row(entry.position, entry.record))?;
        }
        writeln!(out, "{} of {} payments", view.len(), ledger.payments().len())?;
    }
    writeln!(out, "Total recorded: {}", ledger.total().display())?;
    Ok(())
}

/// Record a payment.
pub fn add<S: KeyValueStore + ?Sized>(store: &S, args: AddArgs) -> Result<(), CommandError> {
    require_session(store)?;
    let mut ledger = PaymentLedger::load(store)?;
    let draft = PaymentDraft {
        name: args.name,
        amount: args.amount,
        method: args.method,
        description: args.description,
    };
    let payment = ledger.save(None, &draft)?;

    writeln!(
        std::io::stdout().lock(),
        "Recorded {} of {} ({})",
        payment.name,
        payment.amount.display(),
        payment.id
    )?;
    Ok(())
}

/// Edit a payment in place.
pub fn edit<S: KeyValueStore + ?Sized>(store: &S, args: EditArgs) -> Result<(), CommandError> {
    require_session(store)?;
    let mut ledger = PaymentLedger::load(store)?;
    let position = args.target.resolve(ledger.payments())?;

    let mut draft = ledger
        .payments()
        .get(position)
        .map(PaymentDraft::from)
        .ok_or(RecordError::InvalidIndex {
            position,
            len: ledger.payments().len(),
        })?;
    if let Some(name) = args.name {
        draft.name = name;
    }
    if let Some(amount) = args.amount {
        draft.amount = amount;
    }
    if let Some(method) = args.method {
        draft.method = method;
    }
    if let Some(description) = args.description {
        draft.description = description;
    }

    let payment = ledger.save(Some(position), &draft)?;
    writeln!(
        std::io::stdout().lock(),
        "Updated {} ({})",
        payment.name,
        payment.id
    )?;
    Ok(())
}

/// Remove a payment.
pub fn remove<S: KeyValueStore + ?Sized>(store: &S, target: &Target) -> Result<(), CommandError> {
    require_session(store)?;
    let mut ledger = PaymentLedger::load(store)?;
    let position = target.resolve(ledger.payments())?;
    let removed = ledger.remove(position)?;

    writeln!(std::io::stdout().lock(), "Removed {}", removed.name)?;
    Ok(())
}

fn row(position: usize, payment: &Payment) -> String {
    let mut line = format!(
        "[{position}] {} {} | {} | {}",
        payment.method.icon(),
        payment.name,
        payment.amount.display(),
        payment.method
    );
    if !payment.description.is_empty() {
        line.push_str(" | ");
        line.push_str(&payment.description);
    }
    line
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use member_ledger::{LedgerError, MemoryStore};
    use member_ledger_core::{Amount, PaymentId, PaymentMethod};

    use super::*;

    #[test]
    fn test_edit_past_end_reports_position() {
        let store = MemoryStore::with_entries([
            ("currentUser", r#"{"username":"ada","email":"ada@example.com"}"#),
            (
                "payments",
                r#"[{"name":"Dues","amount":25,"method":"Other"}]"#,
            ),
        ]);
        let original = PaymentLedger::load(&store).unwrap().payments().get(0).cloned();

        let args = EditArgs {
            target: Target {
                position: Some(5),
                id: None,
            },
            name: Some("Rent".to_owned()),
            amount: None,
            method: None,
            description: None,
        };
        assert!(matches!(
            edit(&store, args),
            Err(CommandError::Ledger(LedgerError::Record(RecordError::InvalidIndex {
                position: 5,
                len: 1
            })))
        ));
        let after = PaymentLedger::load(&store).unwrap();
        assert_eq!(after.payments().get(0).cloned(), original);
    }

    fn payment(description: &str) -> Payment {
        Payment {
            id: PaymentId::generate(),
            name: "Rent".to_owned(),
            amount: Amount::parse("1200").unwrap(),
            method: PaymentMethod::BankTransfer,
            description: description.to_owned(),
        }
    }

    #[test]
    fn test_row_formats_amount_and_method() {
        assert_eq!(
            row(2, &payment("")),
            "[2] 🏦 Rent | 1,200.00 | Bank Transfer"
        );
    }

    #[test]
    fn test_row_appends_description() {
        assert_eq!(
            row(0, &payment("March")),
            "[0] 🏦 Rent | 1,200.00 | Bank Transfer | March"
        );
    }
}
