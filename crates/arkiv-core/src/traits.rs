//! Trait seams toward the persistence layer and the fiscal authority.
//!
//! The ledger core never assumes a specific storage engine or submission
//! endpoint. It talks to both exclusively through these traits:
//!
//! - `LedgerStore`     — durable row store (consumed; must be append-only
//!                       for records and audit entries)
//! - `FiscalAuthority` — external submission endpoint (consumed; wire
//!                       protocol out of scope)

use arkiv_contracts::{
    audit::AuditLogEntry,
    error::LedgerResult,
    receipt::MerchantId,
    record::{ReceiptRecord, RecordId},
};

/// The persistence interface the archival ledger is built against.
///
/// Implementations must provide at-least read-your-writes consistency and
/// treat records and audit entries as append-only: nothing written through
/// this trait is ever updated or deleted during its retention window.
///
/// # Concurrency contract
///
/// Appends to one merchant's chain serialize through the store. Both insert
/// operations MUST reject a record whose `(merchant_id, chain_position)`
/// pair already exists with `LedgerError::PositionConflict`; this is the
/// conflict-detection signal the archiver's optimistic retry loop relies
/// on. Two concurrent writers must never both append at the same position.
pub trait LedgerStore: Send + Sync {
    /// Append one receipt record.
    ///
    /// Fails with `PositionConflict` when the chain position is taken, or
    /// `Persistence` when the store rejects the write outright.
    fn insert_receipt_record(&self, record: &ReceiptRecord) -> LedgerResult<()>;

    /// Append a record together with its create audit entry as one atomic
    /// unit.
    ///
    /// Either both become visible or neither does: a partially archived
    /// record (present but unaudited, or vice versa) must never be readable.
    /// Same conflict semantics as `insert_receipt_record`.
    fn commit_archive(&self, record: &ReceiptRecord, entry: &AuditLogEntry) -> LedgerResult<()>;

    /// The most recent record of the merchant's chain, if any.
    ///
    /// "Most recent" means the highest `chain_position`.
    fn get_latest_record(&self, merchant_id: &MerchantId) -> LedgerResult<Option<ReceiptRecord>>;

    /// Fetch one record by id. `Ok(None)` when the id is unknown.
    fn get_record(&self, record_id: &RecordId) -> LedgerResult<Option<ReceiptRecord>>;

    /// Append one audit log entry.
    fn append_audit_log(&self, entry: &AuditLogEntry) -> LedgerResult<()>;

    /// Number of records in the merchant's chain.
    fn count_records(&self, merchant_id: &MerchantId) -> LedgerResult<u64>;

    /// All audit entries for the merchant, oldest first.
    fn list_audit_logs(&self, merchant_id: &MerchantId) -> LedgerResult<Vec<AuditLogEntry>>;

    /// Up to `limit` records from the tail of the merchant's chain, most
    /// recent first. Used by the compliance checker's hash sampling.
    fn list_recent_records(
        &self,
        merchant_id: &MerchantId,
        limit: usize,
    ) -> LedgerResult<Vec<ReceiptRecord>>;
}

/// The outbound fiscal-authority submission endpoint.
///
/// Consumed as an external collaborator; the wire protocol is out of scope.
/// Callers must not assume the submission settles synchronously: the
/// returned string is an opaque acknowledgement reference, not proof of
/// acceptance. The submission gate (arkiv-verify) only invokes this after
/// integrity verification and legal-metadata completeness both pass.
pub trait FiscalAuthority: Send + Sync {
    /// Hand one archived record to the authority.
    ///
    /// Returns the authority's acknowledgement reference.
    fn submit(&self, record: &ReceiptRecord) -> LedgerResult<String>;
}
