//! Payment method enum.

use serde::{Deserialize, Serialize};

/// How a payment was made.
///
/// Stored using the display labels (`"Credit Card"`, `"Bank Transfer"`, ...)
/// so persisted payments read the same as the form they came from. The
/// method only selects a display category; it never changes behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    #[serde(rename = "Mobile Money")]
    MobileMoney,
    Other,
}

impl PaymentMethod {
    /// All methods, in form order.
    pub const ALL: [Self; 4] = [
        Self::CreditCard,
        Self::BankTransfer,
        Self::MobileMoney,
        Self::Other,
    ];

    /// Human-readable label, identical to the stored form.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CreditCard => "Credit Card",
            Self::BankTransfer => "Bank Transfer",
            Self::MobileMoney => "Mobile Money",
            Self::Other => "Other",
        }
    }

    /// Icon shown next to payments of this method.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::CreditCard => "💳",
            Self::BankTransfer => "🏦",
            Self::MobileMoney => "📱",
            Self::Other => "💰",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    /// Accepts the label (`Bank Transfer`) or its kebab form
    /// (`bank-transfer`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        Self::ALL
            .into_iter()
            .find(|method| method.label().to_lowercase() == normalized)
            .ok_or_else(|| format!("invalid payment method: {}", s.trim()))
    }
}
