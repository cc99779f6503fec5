//! Integration tests for the payment ledger over the file store.
//!
//! Run with: cargo test -p member-ledger-integration-tests --test payment_ledger

use member_ledger::services::{DashboardSummary, PaymentLedger, RecordServiceError};
use member_ledger_core::{
    PaymentDraft, PaymentMethod, PaymentSortKey, RecordError, SortDirection, SortSpec,
};
use member_ledger_integration_tests::TestContext;

fn draft(name: &str, amount: &str, method: &str) -> PaymentDraft {
    PaymentDraft {
        name: name.to_owned(),
        amount: amount.to_owned(),
        method: method.to_owned(),
        description: String::new(),
    }
}

#[test]
fn test_negative_rent_is_rejected_and_nothing_is_written() {
    let ctx = TestContext::new();
    let mut ledger = PaymentLedger::load(&ctx.store).expect("load");

    let result = ledger.save(None, &draft("Rent", "-5", "Bank Transfer"));
    assert!(matches!(
        result,
        Err(RecordServiceError::Record(RecordError::ValidationFailed(_)))
    ));
    assert!(!ctx.file_for("payments").exists());
}

#[test]
fn test_amounts_are_stored_as_numbers() {
    let ctx = TestContext::new();
    let mut ledger = PaymentLedger::load(&ctx.store).expect("load");
    let payment = ledger
        .save(None, &draft("Dues", "25.50", "Mobile Money"))
        .expect("save")
        .clone();

    let stored: serde_json::Value =
        serde_json::from_str(&ctx.raw("payments").expect("payments stored")).expect("valid JSON");
    assert_eq!(
        stored,
        serde_json::json!([{
            "id": payment.id.to_string(),
            "name": "Dues",
            "amount": 25.5,
            "method": "Mobile Money",
            "description": ""
        }])
    );
}

#[test]
fn test_legacy_payments_load() {
    let ctx = TestContext::new();
    ctx.seed(
        "payments",
        r#"[{"name":"Rent","amount":1200,"method":"Bank Transfer","description":null},
            {"name":"Coffee","amount":4.5,"method":"Credit Card"}]"#,
    );

    let ledger = PaymentLedger::load(&ctx.store).expect("load");
    assert_eq!(ledger.payments().len(), 2);
    let rent = ledger.payments().get(0).expect("rent");
    assert_eq!(rent.method, PaymentMethod::BankTransfer);
    assert_eq!(rent.description, "");
    assert_eq!(ledger.total().display(), "1,204.50");
}

#[test]
fn test_sort_by_amount_reverses_cleanly() {
    let ctx = TestContext::new();
    let mut ledger = PaymentLedger::load(&ctx.store).expect("load");
    ledger.save(None, &draft("Dues", "25", "Other")).expect("save");
    ledger.save(None, &draft("Rent", "1200", "Other")).expect("save");
    ledger.save(None, &draft("Coffee", "4.5", "Other")).expect("save");

    let asc = ledger
        .list("", SortSpec::new(PaymentSortKey::Amount, SortDirection::Asc))
        .positions();
    let mut desc = ledger
        .list("", SortSpec::new(PaymentSortKey::Amount, SortDirection::Desc))
        .positions();
    desc.reverse();
    assert_eq!(asc, vec![2, 0, 1]);
    assert_eq!(asc, desc);
}

#[test]
fn test_remove_by_id_and_dashboard_totals() {
    let ctx = TestContext::new();
    ctx.signed_in("treasurer");
    let mut ledger = PaymentLedger::load(&ctx.store).expect("load");
    let dues = ledger
        .save(None, &draft("Dues", "25", "Mobile Money"))
        .expect("save")
        .id;
    ledger.save(None, &draft("Rent", "1200", "Bank Transfer")).expect("save");

    ledger.remove_by_id(dues).expect("remove by id");
    assert!(matches!(
        ledger.remove_by_id(dues),
        Err(RecordServiceError::Record(RecordError::UnknownId(_)))
    ));

    let summary = DashboardSummary::load(&ctx.reopen()).expect("dashboard");
    assert_eq!(summary.payment_count, 1);
    assert_eq!(summary.total_paid.display(), "1,200.00");
}
