//! Compliance checklist result types.
//!
//! A `ComplianceCheck` is the outcome of one weighted checklist item; a
//! `ComplianceReport` aggregates the fixed checklist into a 0–100 score and
//! a tri-state standing. Both are ephemeral: computed on demand, never
//! persisted as entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::receipt::MerchantId;

/// Outcome of a single checklist item.
///
/// `Warning` contributes half the item's weight to the score. It is also
/// the degraded outcome when the data behind a check is unavailable;
/// missing optional signals must not be over-penalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckStatus {
    Pass,
    Warning,
    Fail,
}

/// The evaluated result of one checklist item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceCheck {
    /// Stable checklist item id, e.g. "hash-chaining".
    pub id: String,
    /// Short human-readable name.
    pub name: String,
    /// What the item asserts about the merchant's ledger.
    pub description: String,
    /// The evaluated outcome.
    pub status: CheckStatus,
    /// Evidence for the outcome (counts, configured values, failures).
    pub details: String,
    /// Relative importance. Weights sum to 100 across the fixed checklist.
    pub weight: u8,
}

/// The merchant's overall regulatory standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceStatus {
    /// Score ≥ 90.
    Compliant,
    /// 60 ≤ score < 90.
    Partial,
    /// Score < 60.
    NonCompliant,
}

/// The full result of one compliance run for one merchant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// The merchant that was scored.
    pub merchant_id: MerchantId,
    /// Every checklist item with its evaluated outcome, in checklist order.
    pub checks: Vec<ComplianceCheck>,
    /// Weighted score: full weight per pass, half weight per warning.
    pub score: f64,
    /// The tri-state standing derived from `score`.
    pub status: ComplianceStatus,
    /// When the run happened (UTC).
    pub generated_at: DateTime<Utc>,
}
