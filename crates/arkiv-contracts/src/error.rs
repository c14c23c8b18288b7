//! Error types for the arkiv archival pipeline.
//!
//! All fallible operations across the arkiv crates return `LedgerResult<T>`.
//! Error variants carry enough context to produce actionable audit entries.
//!
//! Note the taxonomy boundary: a detected integrity violation is NOT an
//! error. Tampering is the verifier's expected output (an issue list), so it
//! travels in `VerificationOutcome`, never through this enum.

use thiserror::Error;

/// The unified error type for the archival ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The receipt payload could not be canonically encoded.
    ///
    /// Never retried: the payload itself is malformed and the caller must
    /// correct it before resubmitting.
    #[error("encoding error: {reason}")]
    Encoding { reason: String },

    /// The persistence layer failed a read or write, or a chain append
    /// conflict persisted after the archiver exhausted its retries.
    #[error("persistence error: {reason}")]
    Persistence { reason: String },

    /// Another writer claimed the same chain position first.
    ///
    /// This is the store's conflict-detection signal for concurrent appends
    /// to one merchant chain. The archiver treats it as retryable; anywhere
    /// else it surfaces as-is.
    #[error("chain position conflict for merchant '{merchant_id}' at position {position}")]
    PositionConflict { merchant_id: String, position: u64 },

    /// A record id did not resolve to a stored record.
    #[error("record '{record_id}' not found")]
    RecordNotFound { record_id: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    Config { reason: String },

    /// The signing key could not be loaded or applied.
    #[error("signing error: {reason}")]
    Signing { reason: String },
}

/// Convenience alias used throughout the arkiv crates.
pub type LedgerResult<T> = Result<T, LedgerError>;
