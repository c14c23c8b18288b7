//! # arkiv-ledger
//!
//! The write side of the arkiv fiscal archival ledger: canonical receipt
//! encoding, per-merchant SHA-256 hash chaining, keyed display signatures,
//! the archiver pipeline, and the in-memory reference store.
//!
//! ## Overview
//!
//! Every archived receipt is wrapped in a `ReceiptRecord` that links to
//! its predecessor via the predecessor's content hash. Tampering with any
//! stored payload, even a single bit, breaks the chain and is detected
//! by `verify_merchant_chain` or the integrity verifier (arkiv-verify).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use arkiv_core::config::LedgerConfig;
//! use arkiv_ledger::{Archiver, InMemoryLedgerStore, SigningKey};
//!
//! let store = Arc::new(InMemoryLedgerStore::new());
//! let archiver = Archiver::new(store, SigningKey::from_env()?, LedgerConfig::default());
//! let record = archiver.archive(transaction_id, merchant_id, receipt_data)?;
//! ```

pub mod archiver;
pub mod chain;
pub mod encode;
pub mod memory;
pub mod sign;

pub use archiver::Archiver;
pub use chain::{compute_hash, verify_merchant_chain};
pub use encode::{encode_receipt, ENCODING_VERSION};
pub use memory::InMemoryLedgerStore;
pub use sign::{sign, verify_signature, SigningKey};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;
    use chrono::Utc;
    use serde_json::json;

    use arkiv_contracts::{
        receipt::{LineItem, MerchantId, PaymentMethod, ReceiptData, TransactionId},
        record::ReceiptRecord,
    };
    use arkiv_core::{config::LedgerConfig, traits::LedgerStore};

    use super::{verify_merchant_chain, Archiver, InMemoryLedgerStore, SigningKey};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn make_data(total: f64) -> ReceiptData {
        ReceiptData {
            issued_at: Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap(),
            items: vec![LineItem {
                description: "Repair service".to_string(),
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
            metadata: json!({ "register_id": "r-2" }),
        }
    }

    fn make_archiver(store: Arc<InMemoryLedgerStore>) -> Archiver {
        Archiver::new(
            store,
            SigningKey::from_bytes(*b"test-secret"),
            LedgerConfig::default(),
        )
    }

    // ── Tests ─────────────────────────────────────────────────────────────────

    /// The end-to-end chain scenario: three receipts archive at positions
    /// 1, 2, 3 with each `previous_hash` matching the prior record's
    /// `content_hash`, and the whole chain verifies.
    #[test]
    fn three_receipts_form_a_valid_chain() {
        let store = Arc::new(InMemoryLedgerStore::new());
        let archiver = make_archiver(store.clone());
        let merchant = MerchantId::new("merchant-7");

        let totals = [10.00, 25.50, 99.99];
        let mut records = Vec::new();
        for (idx, total) in totals.iter().enumerate() {
            let record = archiver
                .archive(
                    TransactionId::new(format!("tx-{}", idx + 1)),
                    merchant.clone(),
                    make_data(*total),
                )
                .unwrap();
            records.push(record);
        }

        assert_eq!(records[0].chain_position, 1);
        assert_eq!(records[1].chain_position, 2);
        assert_eq!(records[2].chain_position, 3);

        assert_eq!(records[0].previous_hash, ReceiptRecord::GENESIS_HASH);
        assert_eq!(records[1].previous_hash, records[0].content_hash);
        assert_eq!(records[2].previous_hash, records[1].content_hash);

        assert!(verify_merchant_chain(&records));
    }

    /// Chains for different merchants are fully independent: both start
    /// at position 1 from the genesis sentinel.
    #[test]
    fn merchant_chains_are_independent() {
        let archiver = make_archiver(Arc::new(InMemoryLedgerStore::new()));

        let a = archiver
            .archive(
                TransactionId::new("tx-a"),
                MerchantId::new("merchant-a"),
                make_data(10.00),
            )
            .unwrap();
        let b = archiver
            .archive(
                TransactionId::new("tx-b"),
                MerchantId::new("merchant-b"),
                make_data(20.00),
            )
            .unwrap();

        assert_eq!(a.chain_position, 1);
        assert_eq!(b.chain_position, 1);
        assert_eq!(a.previous_hash, ReceiptRecord::GENESIS_HASH);
        assert_eq!(b.previous_hash, ReceiptRecord::GENESIS_HASH);
        assert_ne!(a.content_hash, b.content_hash);
    }

    /// Concurrent archivers for one merchant never produce duplicate or
    /// gapped positions; the store's conflict signal serializes them.
    #[test]
    fn concurrent_appends_keep_positions_contiguous() {
        let store = Arc::new(InMemoryLedgerStore::new());
        let merchant = MerchantId::new("merchant-7");

        // Generous retry budget: with four writers racing one chain head,
        // a single archiver can lose more rounds than the default allows.
        let config = LedgerConfig {
            max_append_attempts: 100,
            ..LedgerConfig::default()
        };

        let mut handles = Vec::new();
        for worker in 0..4 {
            let store = store.clone();
            let merchant = merchant.clone();
            let config = config.clone();
            handles.push(std::thread::spawn(move || {
                let archiver =
                    Archiver::new(store, SigningKey::from_bytes(*b"test-secret"), config);
                for call in 0..5 {
                    archiver
                        .archive(
                            TransactionId::new(format!("tx-{worker}-{call}")),
                            merchant.clone(),
                            make_data(10.00 + worker as f64),
                        )
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.count_records(&merchant).unwrap(), 20);

        let mut records = store.list_recent_records(&merchant, 20).unwrap();
        records.reverse(); // oldest first
        assert!(verify_merchant_chain(&records));
    }
}
