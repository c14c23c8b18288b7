//! TOML-backed ledger configuration.
//!
//! `LedgerConfig` holds the few knobs the archival pipeline exposes. The
//! retention period is a single uniform value, never per-record, and the
//! signing secret is deliberately NOT part of this file-based config; it is
//! sourced from the environment (see `arkiv_ledger::sign::SigningKey`).

use std::path::Path;

use serde::Deserialize;

use arkiv_contracts::error::{LedgerError, LedgerResult};

/// Statutory minimum retention in years. The compliance checklist fails a
/// merchant whose configured retention undercuts this floor.
pub const RETENTION_FLOOR_YEARS: u32 = 10;

/// Days per retention year. Retention is a fixed duration, not calendar
/// years, so `expires_at - created_at` is exact regardless of leap years.
const DAYS_PER_RETENTION_YEAR: i64 = 365;

/// Runtime configuration for the archival ledger.
///
/// ```toml
/// retention-years = 10
/// hash-sample-size = 10
/// max-append-attempts = 5
/// min-document-bytes = 64
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LedgerConfig {
    /// How long archived records must remain unaltered, in years.
    pub retention_years: u32,

    /// How many of the most recent records the compliance checker samples
    /// for hash presence.
    pub hash_sample_size: usize,

    /// How often the archiver retries a chain append after a position
    /// conflict before failing with `Persistence`.
    pub max_append_attempts: u32,

    /// Minimum byte length below which a rendered archival document counts
    /// as missing or truncated during verification.
    pub min_document_bytes: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            retention_years: RETENTION_FLOOR_YEARS,
            hash_sample_size: 10,
            max_append_attempts: 5,
            min_document_bytes: 64,
        }
    }
}

impl LedgerConfig {
    /// Parse `s` as TOML and validate the result.
    ///
    /// Returns `LedgerError::Config` if the TOML is malformed, does not
    /// match the expected schema, or holds an unusable value.
    pub fn from_toml_str(s: &str) -> LedgerResult<Self> {
        let config: LedgerConfig = toml::from_str(s).map_err(|e| LedgerError::Config {
            reason: format!("failed to parse ledger config TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file at `path` and parse it as TOML configuration.
    pub fn from_file(path: &Path) -> LedgerResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| LedgerError::Config {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The fixed duration one record stays in retention.
    pub fn retention_duration(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.retention_years) * DAYS_PER_RETENTION_YEAR)
    }

    fn validate(&self) -> LedgerResult<()> {
        if self.retention_years == 0 {
            return Err(LedgerError::Config {
                reason: "retention-years must be at least 1".to_string(),
            });
        }
        if self.max_append_attempts == 0 {
            return Err(LedgerError::Config {
                reason: "max-append-attempts must be at least 1".to_string(),
            });
        }
        if self.hash_sample_size == 0 {
            return Err(LedgerError::Config {
                reason: "hash-sample-size must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
