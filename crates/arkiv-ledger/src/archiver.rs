//! The archiver: the ledger's single write path.
//!
//! One call to `archive()` runs the full pipeline for one receipt:
//!
//!   encode → chain-head lookup → hash → sign → render → atomic commit
//!   (record + create audit entry)
//!
//! The pipeline is encode-first so a malformed payload can never touch the
//! store, and commit-last so readers only ever observe complete records.
//! Chain appends for one merchant serialize through the store's position
//! constraint; the archiver retries a bounded number of times on conflict.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};

use arkiv_contracts::{
    audit::{AuditAction, AuditLogEntry, AuditStatus},
    error::{LedgerError, LedgerResult},
    receipt::{MerchantId, ReceiptData, TransactionId},
    record::{ReceiptRecord, RecordId},
};
use arkiv_core::{config::LedgerConfig, traits::LedgerStore};
use arkiv_render::{render_archive_document, DocumentContext};

use crate::{chain, encode, sign, sign::SigningKey};

/// Writes receipts into the archival ledger.
///
/// Construct one per deployment and share it: all state lives in the
/// store. Archive calls for different merchants proceed independently;
/// calls for the same merchant serialize through the store's
/// `(merchant_id, chain_position)` constraint.
pub struct Archiver {
    store: Arc<dyn LedgerStore>,
    signing_key: SigningKey,
    config: LedgerConfig,
}

impl Archiver {
    /// Create an archiver over the given store with the given key and
    /// configuration.
    pub fn new(store: Arc<dyn LedgerStore>, signing_key: SigningKey, config: LedgerConfig) -> Self {
        Self {
            store,
            signing_key,
            config,
        }
    }

    /// Archive one completed transaction as an immutable chained record.
    ///
    /// On success exactly one new record and exactly one create audit
    /// entry are visible; on any failure, neither is.
    ///
    /// # Errors
    ///
    /// - `Encoding` — the payload is malformed; nothing was persisted and
    ///   retrying without fixing the payload is pointless.
    /// - `Persistence` — the store rejected the write, or concurrent
    ///   appends kept winning the chain head for `max_append_attempts`
    ///   rounds. The caller decides whether to retry.
    pub fn archive(
        &self,
        transaction_id: TransactionId,
        merchant_id: MerchantId,
        data: ReceiptData,
    ) -> LedgerResult<ReceiptRecord> {
        // Fail fast: a payload that cannot be canonically encoded must
        // never reach the store.
        encode::encode_receipt(&data)?;

        debug!(
            merchant_id = %merchant_id.0,
            transaction_id = %transaction_id.0,
            total = data.total,
            "archiving receipt"
        );

        for attempt in 1..=self.config.max_append_attempts {
            let latest = self.store.get_latest_record(&merchant_id)?;
            let (previous_hash, chain_position) = match &latest {
                Some(prev) => (prev.content_hash.clone(), prev.chain_position + 1),
                None => (ReceiptRecord::GENESIS_HASH.to_string(), 1),
            };

            let content_hash = chain::compute_hash(&data, &previous_hash)?;
            let created_at = Utc::now();
            let expires_at = created_at + self.config.retention_duration();
            let signature =
                sign::sign(&self.signing_key, &content_hash, &merchant_id, created_at);
            let record_id = RecordId::new();

            let rendered_document = render_archive_document(&DocumentContext {
                record_id: &record_id,
                transaction_id: &transaction_id,
                merchant_id: &merchant_id,
                data: &data,
                content_hash: &content_hash,
                previous_hash: &previous_hash,
                chain_position,
                created_at,
                expires_at,
                signature: &signature,
            });

            let record = ReceiptRecord {
                record_id: record_id.clone(),
                transaction_id: transaction_id.clone(),
                merchant_id: merchant_id.clone(),
                data: data.clone(),
                rendered_document,
                content_hash: content_hash.clone(),
                previous_hash: previous_hash.clone(),
                chain_position,
                created_at,
                expires_at,
                signature,
            };

            let entry = AuditLogEntry {
                entry_id: uuid::Uuid::new_v4(),
                record_id,
                merchant_id: merchant_id.clone(),
                action: AuditAction::Create,
                status: AuditStatus::Success,
                details: json!({
                    "content_hash": content_hash,
                    "chain_position": chain_position,
                    "previous_hash": previous_hash,
                    "document_bytes": record.rendered_document.len(),
                }),
                logged_at: created_at,
            };

            match self.store.commit_archive(&record, &entry) {
                Ok(()) => {
                    info!(
                        merchant_id = %merchant_id.0,
                        transaction_id = %transaction_id.0,
                        chain_position,
                        content_hash = %record.content_hash,
                        "receipt archived"
                    );
                    return Ok(record);
                }
                Err(LedgerError::PositionConflict { position, .. }) => {
                    // Another writer extended the chain first. Re-read the
                    // head and rebuild against the new predecessor.
                    warn!(
                        merchant_id = %merchant_id.0,
                        attempt,
                        position,
                        "chain position conflict, re-reading chain head"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(LedgerError::Persistence {
            reason: format!(
                "chain append for merchant '{}' still conflicted after {} attempts",
                merchant_id.0, self.config.max_append_attempts
            ),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
