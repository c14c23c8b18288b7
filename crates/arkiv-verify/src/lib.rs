//! # arkiv-verify
//!
//! The read-side trust checks of the arkiv ledger: per-record integrity
//! verification (hash recomputation, document presence, retention expiry)
//! and the submission gate that clears records for the external fiscal
//! authority only after integrity and legal-metadata completeness both
//! pass.

pub mod submission;
pub mod verifier;

pub use submission::{SubmissionGate, SubmissionReadiness, SubmissionResult};
pub use verifier::{
    IntegrityVerifier, VerificationOutcome, ISSUE_DOCUMENT_TRUNCATED, ISSUE_HASH_MISMATCH,
    ISSUE_RETENTION_EXPIRED,
};
