//! Per-record integrity verification.
//!
//! The verifier recomputes a stored record's content hash from its stored
//! payload and stored `previous_hash` and compares it to the stored
//! `content_hash`. A mismatch means the payload was altered after
//! archival; tampering is REPORTED as an issue, never masked and never
//! thrown.
//! All issues are collected before returning so auditors see the full
//! picture in one pass.
//!
//! Every call appends an audit entry, so the verification itself becomes
//! part of the evidence trail the compliance checker scores.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{debug, info, warn};

use arkiv_contracts::{
    audit::{AuditAction, AuditLogEntry, AuditStatus},
    error::{LedgerError, LedgerResult},
    record::RecordId,
};
use arkiv_core::{config::LedgerConfig, traits::LedgerStore};
use arkiv_ledger::chain::compute_hash;

/// Issue reported when the recomputed hash differs from the stored one.
pub const ISSUE_HASH_MISMATCH: &str = "hash mismatch";

/// Issue reported when the archival document is absent or suspiciously
/// small.
pub const ISSUE_DOCUMENT_TRUNCATED: &str = "rendered document missing or truncated";

/// Issue reported when the record's retention window has already passed.
pub const ISSUE_RETENTION_EXPIRED: &str = "retention window expired";

/// The result of verifying one record.
///
/// An empty issue list means the record is valid; the list is returned
/// either way.
#[derive(Debug, Clone)]
pub struct VerificationOutcome {
    /// The record that was verified.
    pub record_id: RecordId,
    /// True exactly when `issues` is empty.
    pub is_valid: bool,
    /// Every problem discovered, in check order.
    pub issues: Vec<String>,
    /// When the verification ran (UTC).
    pub verified_at: DateTime<Utc>,
}

/// Recomputes and cross-checks stored records against their own hashes.
pub struct IntegrityVerifier {
    store: Arc<dyn LedgerStore>,
    config: LedgerConfig,
}

impl IntegrityVerifier {
    /// Create a verifier over the given store.
    pub fn new(store: Arc<dyn LedgerStore>, config: LedgerConfig) -> Self {
        Self { store, config }
    }

    /// Verify one stored record.
    ///
    /// Checks, in order: hash correctness (recomputed from stored payload
    /// and stored `previous_hash`), archival document presence, and
    /// retention expiry. Appends one verify audit entry per call
    /// (status = success when clean, warning otherwise). Never mutates the
    /// record.
    ///
    /// # Errors
    ///
    /// `RecordNotFound` when the id is unknown, `Persistence` when the
    /// store is unreachable. Discovered integrity problems are NOT errors.
    pub fn verify(&self, record_id: &RecordId) -> LedgerResult<VerificationOutcome> {
        let record = self
            .store
            .get_record(record_id)?
            .ok_or_else(|| LedgerError::RecordNotFound {
                record_id: record_id.to_string(),
            })?;

        debug!(
            record_id = %record.record_id,
            merchant_id = %record.merchant_id.0,
            chain_position = record.chain_position,
            "verifying record integrity"
        );

        let mut issues: Vec<String> = Vec::new();

        match compute_hash(&record.data, &record.previous_hash) {
            Ok(recomputed) if recomputed == record.content_hash => {}
            Ok(recomputed) => {
                warn!(
                    record_id = %record.record_id,
                    stored = %record.content_hash,
                    recomputed = %recomputed,
                    "content hash mismatch, stored payload was altered"
                );
                issues.push(ISSUE_HASH_MISMATCH.to_string());
            }
            Err(e) => {
                // A stored payload that no longer encodes cannot match any
                // hash; report it rather than failing the verification.
                issues.push(format!("stored payload failed canonical encoding: {}", e));
            }
        }

        if record.rendered_document.len() < self.config.min_document_bytes {
            issues.push(ISSUE_DOCUMENT_TRUNCATED.to_string());
        }

        let verified_at = Utc::now();
        if record.expires_at <= verified_at {
            issues.push(ISSUE_RETENTION_EXPIRED.to_string());
        }

        let status = if issues.is_empty() {
            AuditStatus::Success
        } else {
            AuditStatus::Warning
        };

        self.store.append_audit_log(&AuditLogEntry {
            entry_id: uuid::Uuid::new_v4(),
            record_id: record.record_id.clone(),
            merchant_id: record.merchant_id.clone(),
            action: AuditAction::Verify,
            status,
            details: json!({
                "content_hash": record.content_hash.clone(),
                "chain_position": record.chain_position,
                "issues": issues.clone(),
            }),
            logged_at: verified_at,
        })?;

        info!(
            record_id = %record.record_id,
            is_valid = issues.is_empty(),
            issue_count = issues.len(),
            "verification complete"
        );

        Ok(VerificationOutcome {
            record_id: record.record_id,
            is_valid: issues.is_empty(),
            issues,
            verified_at,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
