//! Payment ledger.

use member_ledger_core::{
    Amount, Payment, PaymentDraft, PaymentId, PaymentSortKey, RecordCollection, RecordError,
    SortSpec, View,
};

use super::records::{RecordList, RecordServiceError};
use crate::store::{KeyValueStore, StoreError, StoreKey};

/// Owner of the stored payment list.
pub struct PaymentLedger<'a, S: ?Sized> {
    list: RecordList<'a, S, Payment>,
}

impl<'a, S: KeyValueStore + ?Sized> PaymentLedger<'a, S> {
    /// Load the payment list from `store`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn load(store: &'a S) -> Result<Self, StoreError> {
        Ok(Self {
            list: RecordList::load(store, StoreKey::Payments)?,
        })
    }

    /// All payments in stored order.
    #[must_use]
    pub const fn payments(&self) -> &RecordCollection<Payment> {
        self.list.records()
    }

    /// Record a payment (`position` is `None`) or replace the payment at
    /// `position`. An edited payment keeps its id.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::ValidationFailed` if the name or method is
    /// missing or the amount is not a number of at least zero, and
    /// `RecordError::InvalidIndex` for an out-of-bounds position. Nothing is
    /// written in either case.
    pub fn save(
        &mut self,
        position: Option<usize>,
        draft: &PaymentDraft,
    ) -> Result<&Payment, RecordServiceError> {
        let id = match position {
            Some(position) => self.stored(position)?.id,
            None => PaymentId::generate(),
        };
        let payment = draft.build(id)?;

        let position = self.list.upsert(position, payment)?;
        tracing::debug!(position, %id, "Saved payment");
        self.stored(position)
    }

    /// Replace the payment with `id`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::UnknownId` if no payment has `id`, otherwise as
    /// [`Self::save`].
    pub fn save_by_id(
        &mut self,
        id: PaymentId,
        draft: &PaymentDraft,
    ) -> Result<&Payment, RecordServiceError> {
        let position = self.payments().require_position(id)?;
        self.save(Some(position), draft)
    }

    /// Delete the payment at `position`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::InvalidIndex` for an out-of-bounds position.
    pub fn remove(&mut self, position: usize) -> Result<Payment, RecordServiceError> {
        let removed = self.list.remove_at(position)?;
        tracing::debug!(position, id = %removed.id, "Removed payment");
        Ok(removed)
    }

    /// Delete the payment with `id`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::UnknownId` if no payment has `id`.
    pub fn remove_by_id(&mut self, id: PaymentId) -> Result<Payment, RecordServiceError> {
        let position = self.payments().require_position(id)?;
        self.remove(position)
    }

    /// Payments matching `query` (name or description), ordered by `sort`.
    #[must_use]
    pub fn list(&self, query: &str, sort: SortSpec<PaymentSortKey>) -> View<'_, Payment> {
        self.payments()
            .filter(query)
            .sort(&sort.key, sort.direction)
    }

    /// Sum of all payment amounts.
    #[must_use]
    pub fn total(&self) -> Amount {
        self.payments()
            .iter()
            .fold(Amount::ZERO, |total, payment| total.saturating_add(payment.amount))
    }

    fn stored(&self, position: usize) -> Result<&Payment, RecordServiceError> {
        let len = self.payments().len();
        self.payments()
            .get(position)
            .ok_or_else(|| RecordError::InvalidIndex { position, len }.into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use member_ledger_core::{PaymentMethod, SortDirection};

    use super::*;
    use crate::store::MemoryStore;

    fn draft(name: &str, amount: &str, method: &str) -> PaymentDraft {
        PaymentDraft {
            name: name.to_owned(),
            amount: amount.to_owned(),
            method: method.to_owned(),
            description: String::new(),
        }
    }

    #[test]
    fn test_negative_amount_is_rejected_and_store_unchanged() {
        let store = MemoryStore::new();
        let mut ledger = PaymentLedger::load(&store).unwrap();

        let result = ledger.save(None, &draft("Rent", "-5", "Bank Transfer"));
        assert!(matches!(
            result,
            Err(RecordServiceError::Record(RecordError::ValidationFailed(_)))
        ));
        assert!(store.snapshot().is_empty());
        assert!(ledger.payments().is_empty());
    }

    #[test]
    fn test_record_edit_and_remove() {
        let store = MemoryStore::new();
        let mut ledger = PaymentLedger::load(&store).unwrap();

        let rent = ledger
            .save(None, &draft("Rent", "1200", "Bank Transfer"))
            .unwrap()
            .clone();
        assert_eq!(rent.method, PaymentMethod::BankTransfer);

        let edited = ledger
            .save(Some(0), &draft("Rent (March)", "1250", "bank-transfer"))
            .unwrap();
        assert_eq!(edited.id, rent.id);
        assert_eq!(edited.amount.display(), "1,250.00");

        let reloaded = PaymentLedger::load(&store).unwrap();
        assert_eq!(reloaded.payments().get(0).unwrap().name, "Rent (March)");

        ledger.remove(0).unwrap();
        assert!(ledger.payments().is_empty());
    }

    #[test]
    fn test_list_sorts_by_amount_and_name() {
        let store = MemoryStore::new();
        let mut ledger = PaymentLedger::load(&store).unwrap();
        ledger.save(None, &draft("Dues", "25", "Mobile Money")).unwrap();
        ledger.save(None, &draft("Rent", "1200", "Bank Transfer")).unwrap();
        ledger.save(None, &draft("coffee", "4.5", "Credit Card")).unwrap();

        let by_amount = ledger.list("", SortSpec::new(PaymentSortKey::Amount, SortDirection::Desc));
        assert_eq!(by_amount.positions(), vec![1, 0, 2]);

        let by_name = ledger.list("", SortSpec::new(PaymentSortKey::Name, SortDirection::Asc));
        assert_eq!(by_name.positions(), vec![2, 0, 1]);

        let searched = ledger.list("RE", SortSpec::default());
        assert_eq!(searched.positions(), vec![1]);
    }

    #[test]
    fn test_total() {
        let store = MemoryStore::new();
        let mut ledger = PaymentLedger::load(&store).unwrap();
        assert_eq!(ledger.total(), Amount::ZERO);

        ledger.save(None, &draft("Dues", "25.25", "Other")).unwrap();
        ledger.save(None, &draft("Rent", "1200", "Other")).unwrap();
        assert_eq!(ledger.total().display(), "1,225.25");
    }

    #[test]
    fn test_out_of_bounds_edit_is_rejected_before_validation() {
        let store = MemoryStore::new();
        let mut ledger = PaymentLedger::load(&store).unwrap();
        ledger.save(None, &draft("Dues", "25", "Other")).unwrap();
        let before = store.snapshot();

        assert!(matches!(
            ledger.save(Some(5), &draft("Dues", "-1", "")),
            Err(RecordServiceError::Record(RecordError::InvalidIndex { position: 5, len: 1 }))
        ));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_stored_negative_amount_loads_empty() {
        let store = MemoryStore::with_entries([(
            "payments",
            r#"[{"name":"Refund","amount":-5,"method":"Other"}]"#,
        )]);
        let ledger = PaymentLedger::load(&store).unwrap();
        assert!(ledger.payments().is_empty());
        assert_eq!(ledger.total(), Amount::ZERO);
    }
}
