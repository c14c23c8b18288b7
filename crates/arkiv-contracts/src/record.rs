//! The archived receipt record.
//!
//! `ReceiptRecord` is the unit of the per-merchant hash chain: it wraps the
//! receipt payload with its chain position, the SHA-256 hashes that make
//! tampering detectable, the rendered archival document, and the retention
//! window. Records are created once by the archiver and never updated or
//! deleted during their retention window.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::receipt::{MerchantId, ReceiptData, TransactionId};

/// Unique identifier of one archived record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub uuid::Uuid);

impl RecordId {
    /// Create a new, unique record id.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One immutable entry in a merchant's receipt hash chain.
///
/// Modifying any field of the embedded `data` (a price, a quantity, a
/// timestamp) invalidates `content_hash` and, through `previous_hash`,
/// every subsequent record in the chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptRecord {
    /// Unique id of this archived record.
    pub record_id: RecordId,

    /// The originating sale.
    pub transaction_id: TransactionId,

    /// The merchant whose chain this record extends.
    pub merchant_id: MerchantId,

    /// The canonical receipt payload the content hash commits to.
    pub data: ReceiptData,

    /// The self-contained archival document (plain text, printable). Its
    /// byte length is recorded in the create audit entry.
    pub rendered_document: String,

    /// SHA-256 (lowercase hex) of `previous_hash` followed by the canonical
    /// encoding of `data`.
    pub content_hash: String,

    /// The `content_hash` of the immediately prior record in this
    /// merchant's chain, or `GENESIS_HASH` at position 1.
    pub previous_hash: String,

    /// 1-based, contiguous position within the merchant's chain.
    pub chain_position: u64,

    /// When the record was archived (UTC).
    pub created_at: DateTime<Utc>,

    /// `created_at + retention_duration`. Always computed, never supplied
    /// by a caller.
    pub expires_at: DateTime<Utc>,

    /// Keyed display code for human confirmation. Advisory only; the hash
    /// chain is the integrity primitive.
    pub signature: String,
}

impl ReceiptRecord {
    /// The sentinel `previous_hash` for the first record of every chain.
    ///
    /// Sixty-four hex zeros. No SHA-256 digest of real data can equal it,
    /// so genesis detection is unambiguous.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}
