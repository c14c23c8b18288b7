//! Receipt payload types.
//!
//! `ReceiptData` is the structured payload of one completed point-of-sale
//! transaction. It is a fixed struct rather than a free-form map so the
//! canonical encoder (arkiv-ledger) has an explicit field order to walk;
//! hash determinism must never depend on map iteration order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identifier for the merchant (repairer) that owns a hash chain.
///
/// Every record belongs to exactly one merchant's chain; this is the chain
/// partition key used across records, audit entries, and compliance reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MerchantId(pub String);

impl MerchantId {
    /// Construct a merchant id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Identifier of the originating sale in the point-of-sale system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(pub String);

impl TransactionId {
    /// Construct a transaction id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// How the customer settled the transaction.
///
/// Serialized in kebab-case; `as_str()` is the canonical token the encoder
/// feeds into the content hash, so the two representations stay identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
    Voucher,
}

impl PaymentMethod {
    /// The canonical wire token for this payment method.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Voucher => "voucher",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the receipt: an article or service sold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Human-readable article/service description. Must be non-empty.
    pub description: String,
    /// Units sold.
    pub quantity: u32,
    /// Price per unit, gross.
    pub unit_price: f64,
    /// `quantity × unit_price` as charged at the register.
    pub line_total: f64,
}

/// The canonical receipt payload archived for one transaction.
///
/// Immutable once handed to the archiver. Any single-bit change to any
/// field changes the record's content hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptData {
    /// When the sale completed at the register (UTC).
    pub issued_at: DateTime<Utc>,
    /// The sold line items. Must be non-empty.
    pub items: Vec<LineItem>,
    /// ISO 4217 currency code, e.g. "EUR".
    pub currency: String,
    /// Net of all line totals before tax.
    pub subtotal: f64,
    /// Applied tax rate in percent, e.g. 19.0.
    pub tax_rate: f64,
    /// Absolute tax amount charged.
    pub tax_amount: f64,
    /// Grand total as charged to the customer.
    pub total: f64,
    /// How the customer paid.
    pub payment_method: PaymentMethod,
    /// Identifier of the cashier who closed the sale.
    pub cashier_id: String,
    /// Identifier of the register session the sale belongs to.
    pub session_id: String,
    /// Jurisdiction-specific legal metadata (fiscal registration number,
    /// register id, …). The submission gate validates this against a JSON
    /// Schema before any outbound fiscal-authority submission.
    pub metadata: serde_json::Value,
}
