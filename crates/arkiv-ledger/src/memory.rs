//! In-memory implementation of `LedgerStore`.
//!
//! `InMemoryLedgerStore` is the reference implementation of the store
//! trait. All state lives behind one `Mutex`, which makes it the
//! serialization point the concurrency contract requires: every read and
//! write of a single commit happens under one guard, so two concurrent
//! archivers can never both claim the same chain position; the loser gets
//! `PositionConflict` and retries.
//!
//! Suitable for tests, demos, and single-process deployments. A durable
//! deployment implements `LedgerStore` against a row store with a unique
//! constraint on `(merchant_id, chain_position)`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use arkiv_contracts::{
    audit::AuditLogEntry,
    error::{LedgerError, LedgerResult},
    receipt::MerchantId,
    record::{ReceiptRecord, RecordId},
};
use arkiv_core::traits::LedgerStore;

// ── Internal mutable state ────────────────────────────────────────────────────

/// The mutable interior of an `InMemoryLedgerStore`.
struct StoreState {
    /// Every archived record, by record id.
    records: HashMap<uuid::Uuid, ReceiptRecord>,

    /// Per-merchant chains: record ids in chain-position order.
    chains: HashMap<MerchantId, Vec<uuid::Uuid>>,

    /// All audit entries, in append order.
    audit_log: Vec<AuditLogEntry>,
}

// ── Public store ──────────────────────────────────────────────────────────────

/// An in-memory, append-only ledger store.
///
/// Clone-cheap: clones share the same underlying state.
#[derive(Clone)]
pub struct InMemoryLedgerStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryLedgerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState {
                records: HashMap::new(),
                chains: HashMap::new(),
                audit_log: Vec::new(),
            })),
        }
    }

    fn locked(&self) -> LedgerResult<MutexGuard<'_, StoreState>> {
        self.state.lock().map_err(|e| LedgerError::Persistence {
            reason: format!("ledger state lock poisoned: {}", e),
        })
    }

    /// Append `record` to its merchant chain, enforcing the contiguity and
    /// uniqueness constraints. Must be called with the state lock held.
    fn insert_locked(state: &mut StoreState, record: &ReceiptRecord) -> LedgerResult<()> {
        let chain = state.chains.entry(record.merchant_id.clone()).or_default();
        let occupied = chain.len() as u64;

        if record.chain_position <= occupied {
            // The position is already taken; this is the conflict signal the
            // archiver's retry loop consumes.
            return Err(LedgerError::PositionConflict {
                merchant_id: record.merchant_id.0.clone(),
                position: record.chain_position,
            });
        }
        if record.chain_position != occupied + 1 {
            return Err(LedgerError::Persistence {
                reason: format!(
                    "chain position {} for merchant '{}' would leave a gap (next is {})",
                    record.chain_position,
                    record.merchant_id.0,
                    occupied + 1
                ),
            });
        }

        chain.push(record.record_id.0);
        state.records.insert(record.record_id.0, record.clone());
        Ok(())
    }
}

impl Default for InMemoryLedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

// ── LedgerStore impl ──────────────────────────────────────────────────────────

impl LedgerStore for InMemoryLedgerStore {
    fn insert_receipt_record(&self, record: &ReceiptRecord) -> LedgerResult<()> {
        let mut state = self.locked()?;
        Self::insert_locked(&mut state, record)
    }

    /// Record and audit entry become visible together: both mutations run
    /// under the same guard, and the audit push cannot fail once the
    /// insert has succeeded.
    fn commit_archive(&self, record: &ReceiptRecord, entry: &AuditLogEntry) -> LedgerResult<()> {
        let mut state = self.locked()?;
        Self::insert_locked(&mut state, record)?;
        state.audit_log.push(entry.clone());
        Ok(())
    }

    fn get_latest_record(&self, merchant_id: &MerchantId) -> LedgerResult<Option<ReceiptRecord>> {
        let state = self.locked()?;
        Ok(state
            .chains
            .get(merchant_id)
            .and_then(|chain| chain.last())
            .and_then(|id| state.records.get(id))
            .cloned())
    }

    fn get_record(&self, record_id: &RecordId) -> LedgerResult<Option<ReceiptRecord>> {
        let state = self.locked()?;
        Ok(state.records.get(&record_id.0).cloned())
    }

    fn append_audit_log(&self, entry: &AuditLogEntry) -> LedgerResult<()> {
        let mut state = self.locked()?;
        state.audit_log.push(entry.clone());
        Ok(())
    }

    fn count_records(&self, merchant_id: &MerchantId) -> LedgerResult<u64> {
        let state = self.locked()?;
        Ok(state.chains.get(merchant_id).map_or(0, |chain| chain.len() as u64))
    }

    fn list_audit_logs(&self, merchant_id: &MerchantId) -> LedgerResult<Vec<AuditLogEntry>> {
        let state = self.locked()?;
        Ok(state
            .audit_log
            .iter()
            .filter(|entry| &entry.merchant_id == merchant_id)
            .cloned()
            .collect())
    }

    fn list_recent_records(
        &self,
        merchant_id: &MerchantId,
        limit: usize,
    ) -> LedgerResult<Vec<ReceiptRecord>> {
        let state = self.locked()?;
        let Some(chain) = state.chains.get(merchant_id) else {
            return Ok(Vec::new());
        };

        // Tail of the chain, most recent first.
        Ok(chain
            .iter()
            .rev()
            .take(limit)
            .filter_map(|id| state.records.get(id))
            .cloned()
            .collect())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
