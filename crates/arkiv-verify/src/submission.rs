//! Outbound submission gating.
//!
//! A record may only be handed to the external fiscal authority after two
//! independent gates pass:
//!
//! 1. **Integrity** — the record verifies clean (hash, document,
//!    retention).
//! 2. **Legal-metadata completeness** — the receipt's jurisdiction
//!    metadata validates against a caller-supplied JSON Schema document
//!    (fiscal registration number, register id, whatever the jurisdiction
//!    demands).
//!
//! All blockers are collected before returning so operators see the full
//! failure set in one pass. The authority's acknowledgement is an opaque
//! reference; submission is not assumed to settle synchronously.

use std::sync::Arc;

use tracing::{debug, warn};

use arkiv_contracts::{
    error::{LedgerError, LedgerResult},
    record::RecordId,
};
use arkiv_core::traits::{FiscalAuthority, LedgerStore};

use crate::verifier::IntegrityVerifier;

/// The gate's verdict for one record.
#[derive(Debug, Clone)]
pub struct SubmissionReadiness {
    /// The record that was assessed.
    pub record_id: RecordId,
    /// True exactly when `blockers` is empty.
    pub eligible: bool,
    /// Every reason the record cannot be submitted, in check order.
    pub blockers: Vec<String>,
}

/// The result of an attempted gated submission.
#[derive(Debug)]
pub enum SubmissionResult {
    /// The record passed both gates and was handed to the authority.
    Submitted {
        /// The authority's opaque acknowledgement reference.
        acknowledgement: String,
    },
    /// The record was withheld; the authority was never contacted.
    Blocked {
        /// Why the record is not eligible.
        blockers: Vec<String>,
    },
}

/// Gates records against integrity and legal-metadata requirements before
/// any outbound submission.
pub struct SubmissionGate {
    store: Arc<dyn LedgerStore>,
    verifier: IntegrityVerifier,
    metadata_schema: serde_json::Value,
}

impl SubmissionGate {
    /// Create a gate. `metadata_schema` is the JSON Schema document the
    /// receipt's legal metadata must satisfy.
    pub fn new(
        store: Arc<dyn LedgerStore>,
        verifier: IntegrityVerifier,
        metadata_schema: serde_json::Value,
    ) -> Self {
        Self {
            store,
            verifier,
            metadata_schema,
        }
    }

    /// Assess whether a record is eligible for submission.
    ///
    /// Runs a full integrity verification (which appends its own verify
    /// audit entry) and then validates the legal metadata. Returns the
    /// collected blockers either way.
    pub fn assess(&self, record_id: &RecordId) -> LedgerResult<SubmissionReadiness> {
        let outcome = self.verifier.verify(record_id)?;

        let mut blockers: Vec<String> = outcome
            .issues
            .iter()
            .map(|issue| format!("integrity: {}", issue))
            .collect();

        let record = self
            .store
            .get_record(record_id)?
            .ok_or_else(|| LedgerError::RecordNotFound {
                record_id: record_id.to_string(),
            })?;

        match jsonschema::validator_for(&self.metadata_schema) {
            Ok(validator) => {
                for error in validator.iter_errors(&record.data.metadata) {
                    let blocker = format!(
                        "legal metadata violation at {}: {}",
                        error.instance_path, error
                    );
                    warn!(record_id = %record_id, %blocker, "metadata completeness failure");
                    blockers.push(blocker);
                }
            }
            Err(e) => {
                // A malformed schema document is a configuration problem;
                // treat it as a blocker so nothing slips out unvalidated.
                blockers.push(format!("invalid legal metadata schema: {}", e));
            }
        }

        debug!(
            record_id = %record_id,
            eligible = blockers.is_empty(),
            blocker_count = blockers.len(),
            "submission assessment complete"
        );

        Ok(SubmissionReadiness {
            record_id: record_id.clone(),
            eligible: blockers.is_empty(),
            blockers,
        })
    }

    /// Assess the record and, only if eligible, hand it to `authority`.
    ///
    /// A blocked record never reaches the authority.
    pub fn submit_if_ready(
        &self,
        authority: &dyn FiscalAuthority,
        record_id: &RecordId,
    ) -> LedgerResult<SubmissionResult> {
        let readiness = self.assess(record_id)?;
        if !readiness.eligible {
            return Ok(SubmissionResult::Blocked {
                blockers: readiness.blockers,
            });
        }

        let record = self
            .store
            .get_record(record_id)?
            .ok_or_else(|| LedgerError::RecordNotFound {
                record_id: record_id.to_string(),
            })?;

        let acknowledgement = authority.submit(&record)?;
        Ok(SubmissionResult::Submitted { acknowledgement })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::TimeZone;
    use chrono::Utc;
    use serde_json::json;

    use arkiv_contracts::{
        receipt::{LineItem, MerchantId, PaymentMethod, ReceiptData, TransactionId},
        record::ReceiptRecord,
    };
    use arkiv_core::config::LedgerConfig;
    use arkiv_ledger::{Archiver, InMemoryLedgerStore, SigningKey};

    use super::*;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn metadata_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "register_id": { "type": "string" },
                "fiscal_code": { "type": "string" }
            },
            "required": ["register_id", "fiscal_code"]
        })
    }

    fn make_data(metadata: serde_json::Value) -> ReceiptData {
        ReceiptData {
            issued_at: Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap(),
            items: vec![LineItem {
                description: "Screen replacement".to_string(),
                quantity: 1,
                unit_price: 99.99,
                line_total: 99.99,
            }],
            currency: "EUR".to_string(),
            subtotal: 99.99,
            tax_rate: 0.0,
            tax_amount: 0.0,
            total: 99.99,
            payment_method: PaymentMethod::Card,
            cashier_id: "cashier-01".to_string(),
            session_id: "session-9".to_string(),
            metadata,
        }
    }

    fn archive_with_metadata(
        store: &std::sync::Arc<InMemoryLedgerStore>,
        metadata: serde_json::Value,
    ) -> ReceiptRecord {
        let archiver = Archiver::new(
            store.clone(),
            SigningKey::from_bytes(*b"test-secret"),
            LedgerConfig::default(),
        );
        archiver
            .archive(
                TransactionId::new("tx-1"),
                MerchantId::new("merchant-7"),
                make_data(metadata),
            )
            .unwrap()
    }

    fn make_gate(store: std::sync::Arc<InMemoryLedgerStore>) -> SubmissionGate {
        let verifier = IntegrityVerifier::new(store.clone(), LedgerConfig::default());
        SubmissionGate::new(store, verifier, metadata_schema())
    }

    /// An authority stub that records what it was asked to submit.
    struct RecordingAuthority {
        submitted: Mutex<Vec<RecordId>>,
    }

    impl RecordingAuthority {
        fn new() -> Self {
            Self {
                submitted: Mutex::new(Vec::new()),
            }
        }
    }

    impl FiscalAuthority for RecordingAuthority {
        fn submit(&self, record: &ReceiptRecord) -> LedgerResult<String> {
            self.submitted.lock().unwrap().push(record.record_id.clone());
            Ok(format!("ack-{}", record.record_id))
        }
    }

    // ── Tests ─────────────────────────────────────────────────────────────────

    /// Complete legal metadata on an untampered record: eligible, no
    /// blockers.
    #[test]
    fn complete_record_is_eligible() {
        let store = std::sync::Arc::new(InMemoryLedgerStore::new());
        let record = archive_with_metadata(
            &store,
            json!({ "register_id": "r-2", "fiscal_code": "DE-001" }),
        );

        let readiness = make_gate(store).assess(&record.record_id).unwrap();

        assert!(readiness.eligible, "blockers: {:?}", readiness.blockers);
        assert!(readiness.blockers.is_empty());
    }

    /// Missing required metadata blocks submission with a violation naming
    /// the field.
    #[test]
    fn missing_metadata_blocks() {
        let store = std::sync::Arc::new(InMemoryLedgerStore::new());
        let record = archive_with_metadata(&store, json!({ "register_id": "r-2" }));

        let readiness = make_gate(store).assess(&record.record_id).unwrap();

        assert!(!readiness.eligible);
        assert!(
            readiness.blockers.iter().any(|b| b.contains("fiscal_code")),
            "blockers should name the missing field: {:?}",
            readiness.blockers
        );
    }

    /// A blocked record never reaches the authority.
    #[test]
    fn blocked_record_is_not_submitted() {
        let store = std::sync::Arc::new(InMemoryLedgerStore::new());
        let record = archive_with_metadata(&store, json!({}));
        let gate = make_gate(store);

        let authority = RecordingAuthority::new();
        let result = gate.submit_if_ready(&authority, &record.record_id).unwrap();

        assert!(matches!(result, SubmissionResult::Blocked { .. }));
        assert!(authority.submitted.lock().unwrap().is_empty());
    }

    /// An eligible record is submitted and the acknowledgement is passed
    /// through.
    #[test]
    fn eligible_record_is_submitted() {
        let store = std::sync::Arc::new(InMemoryLedgerStore::new());
        let record = archive_with_metadata(
            &store,
            json!({ "register_id": "r-2", "fiscal_code": "DE-001" }),
        );
        let gate = make_gate(store);

        let authority = RecordingAuthority::new();
        let result = gate.submit_if_ready(&authority, &record.record_id).unwrap();

        match result {
            SubmissionResult::Submitted { acknowledgement } => {
                assert_eq!(acknowledgement, format!("ack-{}", record.record_id));
            }
            other => panic!("expected Submitted, got {:?}", other),
        }
        assert_eq!(authority.submitted.lock().unwrap().len(), 1);
    }
}
