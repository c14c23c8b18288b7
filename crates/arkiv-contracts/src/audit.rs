//! Audit log types.
//!
//! Every record lifecycle event produces one append-only `AuditLogEntry`.
//! Entries are never modified or deleted; together with the hash chain they
//! form the evidence trail the compliance checker scores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::receipt::MerchantId;
use crate::record::RecordId;

/// The lifecycle event an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuditAction {
    /// A new record was archived.
    Create,
    /// An integrity verification ran against a stored record.
    Verify,
}

/// Outcome classification of the audited event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuditStatus {
    Success,
    Warning,
    Fail,
}

/// One append-only audit log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Unique id of this entry.
    pub entry_id: uuid::Uuid,
    /// The record the event concerns.
    pub record_id: RecordId,
    /// The merchant owning that record's chain.
    pub merchant_id: MerchantId,
    /// What happened.
    pub action: AuditAction,
    /// How it went.
    pub status: AuditStatus,
    /// Free-form structured payload: content hash, chain position,
    /// document byte size, discovered issues.
    pub details: serde_json::Value,
    /// When the entry was appended (UTC).
    pub logged_at: DateTime<Utc>,
}
