//! Display signature derivation.
//!
//! The signature is a short keyed code printed on the archival document so
//! a human can confirm a record against the merchant's ledger without
//! reading a 64-character hash. It is advisory only; the hash chain is
//! the integrity primitive.
//!
//! Two deliberate properties:
//!
//! - The secret is sourced from the environment (a managed secret store in
//!   deployment), never a literal constant in the code.
//! - The timestamp entering the MAC is the record's persisted
//!   `created_at`, truncated to millisecond precision, so
//!   `verify_signature` can recompute the code exactly at any later time.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use arkiv_contracts::{
    error::{LedgerError, LedgerResult},
    receipt::MerchantId,
    record::ReceiptRecord,
};

type HmacSha256 = Hmac<Sha256>;

/// Environment variable the signing secret is read from.
pub const SIGNING_SECRET_ENV: &str = "ARKIV_SIGNING_SECRET";

/// How many MAC bytes survive into the display code.
const SIGNATURE_BYTES: usize = 8;

/// The shared secret used to derive display signatures.
///
/// Never serialized and never printed; the `Debug` impl is redacted.
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Load the secret from `ARKIV_SIGNING_SECRET`.
    ///
    /// Fails with `LedgerError::Signing` when the variable is unset or
    /// empty.
    pub fn from_env() -> LedgerResult<Self> {
        let secret = std::env::var(SIGNING_SECRET_ENV).map_err(|_| LedgerError::Signing {
            reason: format!("environment variable {} is not set", SIGNING_SECRET_ENV),
        })?;
        if secret.is_empty() {
            return Err(LedgerError::Signing {
                reason: format!("environment variable {} is empty", SIGNING_SECRET_ENV),
            });
        }
        Ok(Self(secret.into_bytes()))
    }

    /// Build a key from raw bytes. Intended for tests and for callers that
    /// fetch the secret from their own managed store.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey(..)")
    }
}

/// Derive the display signature for a record.
///
/// HMAC-SHA256 over the content hash, the merchant id, and the record's
/// creation time (millisecond Unix timestamp, little-endian), truncated to
/// 8 bytes and rendered as four uppercase hex groups:
/// `XXXX-XXXX-XXXX-XXXX`.
pub fn sign(
    key: &SigningKey,
    content_hash: &str,
    merchant_id: &MerchantId,
    created_at: DateTime<Utc>,
) -> String {
    // HMAC-SHA256 accepts keys of any length; new_from_slice cannot fail.
    let mut mac =
        HmacSha256::new_from_slice(&key.0).expect("HMAC accepts keys of any length");
    mac.update(content_hash.as_bytes());
    mac.update(merchant_id.0.as_bytes());
    mac.update(&created_at.timestamp_millis().to_le_bytes());

    let tag = mac.finalize().into_bytes();
    let code = hex::encode_upper(&tag[..SIGNATURE_BYTES]);

    format!("{}-{}-{}-{}", &code[0..4], &code[4..8], &code[8..12], &code[12..16])
}

/// Recompute a stored record's signature and compare it to the stored one.
///
/// Possible because the MAC input timestamp is the persisted `created_at`.
pub fn verify_signature(key: &SigningKey, record: &ReceiptRecord) -> bool {
    sign(key, &record.content_hash, &record.merchant_id, record.created_at) == record.signature
}

// ── Tests ─────────────────────────────────────────────────────────────────────
