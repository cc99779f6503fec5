//! Payments.

use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize};

use super::required;
use crate::collection::{Record, SortKey, collate};
use crate::error::RecordError;
use crate::types::{Amount, AmountError, PaymentId, PaymentMethod};

/// A recorded payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(default = "PaymentId::generate")]
    pub id: PaymentId,
    pub name: String,
    pub amount: Amount,
    pub method: PaymentMethod,
    /// Optional free text; empty when not given.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Record for Payment {
    type Id = PaymentId;

    fn id(&self) -> PaymentId {
        self.id
    }

    fn search_text(&self) -> impl Iterator<Item = &str> {
        [self.name.as_str(), self.description.as_str()].into_iter()
    }
}

/// Raw payment form input.
///
/// `amount` and `method` are kept as entered so that parsing is part of
/// validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentDraft {
    pub name: String,
    pub amount: String,
    pub method: String,
    pub description: String,
}

impl PaymentDraft {
    /// Validate the form and build a payment carrying `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::ValidationFailed`] if the name or method is
    /// missing, the method is unknown, or the amount is not a finite
    /// number of at least zero.
    pub fn build(&self, id: PaymentId) -> Result<Payment, RecordError> {
        let name = required("name", &self.name)?;
        let method = required("method", &self.method)?
            .parse::<PaymentMethod>()
            .map_err(RecordError::ValidationFailed)?;
        let amount = Amount::parse(&self.amount).map_err(|err| match err {
            AmountError::Negative => RecordError::validation("amount cannot be negative"),
            other => RecordError::validation(other.to_string()),
        })?;

        Ok(Payment {
            id,
            name,
            amount,
            method,
            description: self.description.trim().to_owned(),
        })
    }
}

impl From<&Payment> for PaymentDraft {
    fn from(payment: &Payment) -> Self {
        Self {
            name: payment.name.clone(),
            amount: payment.amount.to_string(),
            method: payment.method.label().to_owned(),
            description: payment.description.clone(),
        }
    }
}

/// Fields payments can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaymentSortKey {
    #[default]
    Name,
    Amount,
}

impl SortKey<Payment> for PaymentSortKey {
    fn compare(&self, a: &Payment, b: &Payment) -> Ordering {
        match self {
            Self::Name => collate(&a.name, &b.name),
            Self::Amount => a.amount.cmp(&b.amount),
        }
    }
}

impl std::fmt::Display for PaymentSortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Amount => write!(f, "amount"),
        }
    }
}

impl std::str::FromStr for PaymentSortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(Self::Name),
            "amount" => Ok(Self::Amount),
            other => Err(format!("invalid payment sort field: {other}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::collection::{RecordCollection, SortDirection};

    fn draft(name: &str, amount: &str, method: &str) -> PaymentDraft {
        PaymentDraft {
            name: name.to_owned(),
            amount: amount.to_owned(),
            method: method.to_owned(),
            description: String::new(),
        }
    }

    #[test]
    fn test_build_valid_payment() {
        let payment = draft(" Rent ", "1200.50", "Bank Transfer")
            .build(PaymentId::generate())
            .unwrap();
        assert_eq!(payment.name, "Rent");
        assert_eq!(payment.method, PaymentMethod::BankTransfer);
        assert_eq!(payment.amount.display(), "1,200.50");
        assert_eq!(payment.description, "");
    }

    #[test]
    fn test_build_rejects_negative_amount() {
        let err = draft("Rent", "-5", "Bank Transfer")
            .build(PaymentId::generate())
            .unwrap_err();
        assert_eq!(
            err,
            RecordError::ValidationFailed("amount cannot be negative".to_owned())
        );
    }

    #[test]
    fn test_build_rejects_missing_or_invalid_fields() {
        for form in [
            draft("", "10", "Other"),
            draft("Dues", "", "Other"),
            draft("Dues", "ten", "Other"),
            draft("Dues", "10", ""),
            draft("Dues", "10", "Cheque"),
        ] {
            assert!(matches!(
                form.build(PaymentId::generate()),
                Err(RecordError::ValidationFailed(_))
            ));
        }
    }

    #[test]
    fn test_zero_amount_is_valid() {
        assert!(draft("Waived fee", "0", "Other")
            .build(PaymentId::generate())
            .is_ok());
    }

    #[test]
    fn test_loads_legacy_record_with_null_description() {
        let json = r#"{"name":"Dues","amount":25,"method":"Mobile Money","description":null}"#;
        let payment: Payment = serde_json::from_str(json).unwrap();
        assert_eq!(payment.description, "");
        assert_eq!(payment.method, PaymentMethod::MobileMoney);

        let json = r#"{"name":"Dues","amount":25,"method":"Other"}"#;
        let payment: Payment = serde_json::from_str(json).unwrap();
        assert_eq!(payment.description, "");
    }

    #[test]
    fn test_sort_by_amount_is_numeric() {
        let collection = RecordCollection::from(vec![
            draft("A", "100", "Other").build(PaymentId::generate()).unwrap(),
            draft("B", "9", "Other").build(PaymentId::generate()).unwrap(),
            draft("C", "25.5", "Other").build(PaymentId::generate()).unwrap(),
        ]);

        let asc = collection.sort(&PaymentSortKey::Amount, SortDirection::Asc);
        assert_eq!(asc.positions(), vec![1, 2, 0]);

        let desc = collection.sort(&PaymentSortKey::Amount, SortDirection::Desc);
        assert_eq!(desc.positions(), vec![0, 2, 1]);
    }

    #[test]
    fn test_draft_from_payment_round_trips_through_build() {
        let payment = draft("Dues", "25.5", "credit-card")
            .build(PaymentId::generate())
            .unwrap();
        let rebuilt = PaymentDraft::from(&payment).build(payment.id).unwrap();
        assert_eq!(rebuilt, payment);
    }
}
