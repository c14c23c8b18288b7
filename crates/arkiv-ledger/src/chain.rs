//! Hash-chain primitives: content hashing and chain integrity checking.
//!
//! Each merchant's records form an append-only SHA-256 chain. A record's
//! `content_hash` commits to the canonical encoding of its payload AND to
//! its predecessor's hash, so retroactive tampering with record N breaks
//! the link to every record after N.
//!
//! Hash input layout (bytes, in order):
//!   1. previous_hash as UTF-8 bytes (64 ASCII hex chars, or the genesis
//!      sentinel for the chain's first record)
//!   2. the canonical encoding of the payload (see `encode`)

use sha2::{Digest, Sha256};

use arkiv_contracts::{error::LedgerResult, receipt::ReceiptData, record::ReceiptRecord};

use crate::encode::encode_receipt;

/// Compute the content hash for one record.
///
/// Pure function of (`data`, `previous_hash`): identical inputs always
/// yield the identical lowercase 64-character hex digest, and any single
/// changed bit in the payload changes the output. Pass
/// `ReceiptRecord::GENESIS_HASH` as `previous_hash` for the first record
/// of a chain.
///
/// Fails only when `data` cannot be canonically encoded.
pub fn compute_hash(data: &ReceiptData, previous_hash: &str) -> LedgerResult<String> {
    let encoded = encode_receipt(data)?;

    let mut hasher = Sha256::new();
    hasher.update(previous_hash.as_bytes());
    hasher.update(&encoded);

    Ok(hex::encode(hasher.finalize()))
}

/// Verify the integrity of one merchant's chain, given its records in
/// position order.
///
/// Returns `true` when all three rules hold for every record:
///
/// 1. **Contiguity** — positions are 1, 2, 3, … with no gaps or
///    duplicates.
/// 2. **Prev-hash linkage** — each record's `previous_hash` equals the
///    `content_hash` of the preceding record (or `GENESIS_HASH` at
///    position 1).
/// 3. **Hash correctness** — each record's `content_hash` matches the
///    value recomputed from its stored payload and `previous_hash`.
///
/// Returns `false` the moment any rule is violated, including a payload
/// that no longer encodes. An empty chain is defined as valid.
pub fn verify_merchant_chain(records: &[ReceiptRecord]) -> bool {
    let mut expected_prev = ReceiptRecord::GENESIS_HASH.to_string();

    for (idx, record) in records.iter().enumerate() {
        if record.chain_position != idx as u64 + 1 {
            return false;
        }

        if record.previous_hash != expected_prev {
            return false;
        }

        let recomputed = match compute_hash(&record.data, &record.previous_hash) {
            Ok(hash) => hash,
            // A payload that fails canonical encoding cannot match any
            // stored hash.
            Err(_) => return false,
        };
        if record.content_hash != recomputed {
            return false;
        }

        expected_prev = record.content_hash.clone();
    }

    true
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;
    use serde_json::json;

    use arkiv_contracts::{
        receipt::{LineItem, MerchantId, PaymentMethod, ReceiptData, TransactionId},
        record::RecordId,
    };

    use super::*;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn make_data(total: f64) -> ReceiptData {
        ReceiptData {
            issued_at: Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap(),
            items: vec![LineItem {
                description: "Diagnostics".to_string(),
                quantity: 1,
                unit_price: total,
                line_total: total,
            }],
            currency: "EUR".to_string(),
            subtotal: total,
            tax_rate: 0.0,
            tax_amount: 0.0,
            total,
            payment_method: PaymentMethod::Card,
            cashier_id: "cashier-01".to_string(),
            session_id: "session-9".to_string(),
            metadata: json!({}),
        }
    }

    /// Build a chained record at `position` whose hashes are computed for
    /// real, linked to `previous_hash`.
    fn make_record(position: u64, previous_hash: &str, total: f64) -> ReceiptRecord {
        let data = make_data(total);
        let content_hash = compute_hash(&data, previous_hash).unwrap();
        let created_at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();

        ReceiptRecord {
            record_id: RecordId::new(),
            transaction_id: TransactionId::new(format!("tx-{position}")),
            merchant_id: MerchantId::new("merchant-7"),
            data,
            rendered_document: "archival document body".to_string(),
            content_hash,
            previous_hash: previous_hash.to_string(),
            chain_position: position,
            created_at,
            expires_at: created_at + chrono::Duration::days(3650),
            signature: "0000-0000-0000-0000".to_string(),
        }
    }

    fn make_chain(totals: &[f64]) -> Vec<ReceiptRecord> {
        let mut records = Vec::new();
        let mut prev = ReceiptRecord::GENESIS_HASH.to_string();
        for (idx, total) in totals.iter().enumerate() {
            let record = make_record(idx as u64 + 1, &prev, *total);
            prev = record.content_hash.clone();
            records.push(record);
        }
        records
    }

    // ── compute_hash ─────────────────────────────────────────────────────────

    /// Hashing the same payload with the same predecessor twice yields the
    /// same digest.
    #[test]
    fn hash_is_deterministic() {
        let data = make_data(49.90);
        let a = compute_hash(&data, ReceiptRecord::GENESIS_HASH).unwrap();
        let b = compute_hash(&data, ReceiptRecord::GENESIS_HASH).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64, "SHA-256 hex digest is 64 chars");
    }

    /// Changing any monetary amount, quantity, or timestamp changes the
    /// digest.
    #[test]
    fn hash_is_sensitive_to_payload() {
        let base = compute_hash(&make_data(99.99), ReceiptRecord::GENESIS_HASH).unwrap();

        let tampered = compute_hash(&make_data(9.99), ReceiptRecord::GENESIS_HASH).unwrap();
        assert_ne!(base, tampered);

        let mut data = make_data(99.99);
        data.items[0].quantity = 3;
        assert_ne!(base, compute_hash(&data, ReceiptRecord::GENESIS_HASH).unwrap());

        let mut data = make_data(99.99);
        data.issued_at = data.issued_at + chrono::Duration::seconds(1);
        assert_ne!(base, compute_hash(&data, ReceiptRecord::GENESIS_HASH).unwrap());
    }

    /// The predecessor's hash is part of the digest: the same payload at a
    /// different chain location hashes differently.
    #[test]
    fn hash_is_sensitive_to_previous_hash() {
        let data = make_data(49.90);
        let at_genesis = compute_hash(&data, ReceiptRecord::GENESIS_HASH).unwrap();
        let linked = compute_hash(&data, &"ab".repeat(32)).unwrap();
        assert_ne!(at_genesis, linked);
    }

    // ── verify_merchant_chain ────────────────────────────────────────────────

    /// A properly linked 3-record chain verifies.
    #[test]
    fn valid_chain_verifies() {
        let records = make_chain(&[10.00, 25.50, 99.99]);
        assert!(verify_merchant_chain(&records));
        assert_eq!(records[0].previous_hash, ReceiptRecord::GENESIS_HASH);
        assert_eq!(records[1].previous_hash, records[0].content_hash);
        assert_eq!(records[2].previous_hash, records[1].content_hash);
    }

    /// Mutating a payload after archival breaks verification, even though
    /// every stored hash field is untouched.
    #[test]
    fn tampered_payload_detected() {
        let mut records = make_chain(&[10.00, 25.50, 99.99]);
        records[1].data.total = 2.50;

        assert!(!verify_merchant_chain(&records));
    }

    /// Rewriting a record's hash to cover tampering breaks the link to its
    /// successor instead.
    #[test]
    fn rewritten_hash_breaks_successor_link() {
        let mut records = make_chain(&[10.00, 25.50, 99.99]);
        records[1].data.total = 2.50;
        records[1].content_hash =
            compute_hash(&records[1].data, &records[1].previous_hash).unwrap();

        assert!(!verify_merchant_chain(&records));
    }

    /// Position gaps and duplicates are chain violations.
    #[test]
    fn non_contiguous_positions_detected() {
        let mut records = make_chain(&[10.00, 25.50]);
        records[1].chain_position = 3;
        assert!(!verify_merchant_chain(&records));
    }

    /// An empty chain is trivially valid.
    #[test]
    fn empty_chain_is_valid() {
        assert!(verify_merchant_chain(&[]));
    }
}
