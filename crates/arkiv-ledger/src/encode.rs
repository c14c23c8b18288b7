//! Canonical receipt encoding.
//!
//! Deterministically serializes a `ReceiptData` into the byte sequence the
//! content hash commits to. Every field that contributes to the hash is
//! listed explicitly so nothing is accidentally omitted, and the layout is
//! versioned so it can evolve without silently invalidating stored hashes.
//!
//! Encoding layout (bytes, in order):
//!   1.  ENCODING_VERSION as 2-byte big-endian
//!   2.  issued_at as millisecond Unix timestamp, 8-byte big-endian
//!   3.  item count as 4-byte big-endian, then per item:
//!       description (length-prefixed UTF-8), quantity as 4-byte
//!       big-endian, unit_price and line_total as IEEE-754 bit patterns,
//!       8-byte big-endian
//!   4.  currency (length-prefixed UTF-8)
//!   5.  subtotal, tax_rate, tax_amount, total as IEEE-754 bit patterns
//!   6.  payment method canonical token (length-prefixed UTF-8)
//!   7.  cashier_id, session_id (length-prefixed UTF-8)
//!   8.  metadata as compact JSON (length-prefixed); serde_json orders
//!       object keys canonically, so source key order never leaks in
//!
//! Strings are prefixed with their byte length as 4-byte big-endian.
//! Fixed-width integers plus length prefixes eliminate ambiguity; no
//! separators are needed.

use arkiv_contracts::{
    error::{LedgerError, LedgerResult},
    receipt::ReceiptData,
};

/// Canonical layout version; increment if the field list or widths ever
/// change. External systems should record this alongside stored hashes.
pub const ENCODING_VERSION: u16 = 1;

/// Encode a receipt payload into its canonical byte sequence.
///
/// The same logical content always encodes identically, regardless of how
/// the source object was assembled. Fails with `LedgerError::Encoding` when
/// a monetary field is non-finite, the item list is empty, or a required
/// identifier string is empty.
pub fn encode_receipt(data: &ReceiptData) -> LedgerResult<Vec<u8>> {
    if data.items.is_empty() {
        return Err(LedgerError::Encoding {
            reason: "receipt has no line items".to_string(),
        });
    }
    require_non_empty("currency", &data.currency)?;
    require_non_empty("cashier_id", &data.cashier_id)?;
    require_non_empty("session_id", &data.session_id)?;

    let mut buf = Vec::with_capacity(256);

    buf.extend_from_slice(&ENCODING_VERSION.to_be_bytes());
    buf.extend_from_slice(&data.issued_at.timestamp_millis().to_be_bytes());

    buf.extend_from_slice(&(data.items.len() as u32).to_be_bytes());
    for (idx, item) in data.items.iter().enumerate() {
        if item.description.is_empty() {
            return Err(LedgerError::Encoding {
                reason: format!("line item {} has an empty description", idx + 1),
            });
        }
        put_str(&mut buf, &item.description);
        buf.extend_from_slice(&item.quantity.to_be_bytes());
        put_amount(&mut buf, &format!("items[{idx}].unit_price"), item.unit_price)?;
        put_amount(&mut buf, &format!("items[{idx}].line_total"), item.line_total)?;
    }

    put_str(&mut buf, &data.currency);
    put_amount(&mut buf, "subtotal", data.subtotal)?;
    put_amount(&mut buf, "tax_rate", data.tax_rate)?;
    put_amount(&mut buf, "tax_amount", data.tax_amount)?;
    put_amount(&mut buf, "total", data.total)?;
    put_str(&mut buf, data.payment_method.as_str());
    put_str(&mut buf, &data.cashier_id);
    put_str(&mut buf, &data.session_id);

    // serde_json keeps object keys in a BTreeMap, so this is canonical for
    // any key insertion order in the source.
    let metadata_json = serde_json::to_vec(&data.metadata).map_err(|e| LedgerError::Encoding {
        reason: format!("metadata is not serializable: {}", e),
    })?;
    buf.extend_from_slice(&(metadata_json.len() as u32).to_be_bytes());
    buf.extend_from_slice(&metadata_json);

    Ok(buf)
}

/// Append a length-prefixed UTF-8 string.
fn put_str(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u32).to_be_bytes());
    buf.extend_from_slice(s.as_bytes());
}

/// Append a monetary/percentage value as its IEEE-754 bit pattern.
///
/// NaN and infinities are rejected; a non-finite amount on a fiscal
/// receipt is always a caller bug, never data.
fn put_amount(buf: &mut Vec<u8>, field: &str, value: f64) -> LedgerResult<()> {
    if !value.is_finite() {
        return Err(LedgerError::Encoding {
            reason: format!("field '{}' is not a finite number", field),
        });
    }
    buf.extend_from_slice(&value.to_bits().to_be_bytes());
    Ok(())
}

fn require_non_empty(field: &str, value: &str) -> LedgerResult<()> {
    if value.is_empty() {
        return Err(LedgerError::Encoding {
            reason: format!("required field '{}' is empty", field),
        });
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;
    use serde_json::json;

    use arkiv_contracts::receipt::{LineItem, PaymentMethod, ReceiptData};

    use super::*;

    fn make_data() -> ReceiptData {
        ReceiptData {
            issued_at: Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap(),
            items: vec![LineItem {
                description: "Battery swap".to_string(),
                quantity: 1,
                unit_price: 49.90,
                line_total: 49.90,
            }],
            currency: "EUR".to_string(),
            subtotal: 41.93,
            tax_rate: 19.0,
            tax_amount: 7.97,
            total: 49.90,
            payment_method: PaymentMethod::Cash,
            cashier_id: "cashier-01".to_string(),
            session_id: "session-9".to_string(),
            metadata: json!({ "register_id": "r-2", "fiscal_code": "DE-001" }),
        }
    }

    /// Encoding the same payload twice yields identical bytes.
    #[test]
    fn encoding_is_deterministic() {
        let data = make_data();
        assert_eq!(encode_receipt(&data).unwrap(), encode_receipt(&data).unwrap());
    }

    /// Metadata key order in the source JSON never affects the encoding;
    /// the canonical form sorts object keys.
    #[test]
    fn metadata_key_order_is_canonical() {
        let mut a = make_data();
        let mut b = make_data();
        a.metadata = serde_json::from_str(r#"{"register_id":"r-2","fiscal_code":"DE-001"}"#).unwrap();
        b.metadata = serde_json::from_str(r#"{"fiscal_code":"DE-001","register_id":"r-2"}"#).unwrap();

        assert_eq!(encode_receipt(&a).unwrap(), encode_receipt(&b).unwrap());
    }

    /// Any changed field changes the encoding.
    #[test]
    fn encoding_is_field_sensitive() {
        let base = encode_receipt(&make_data()).unwrap();

        let mut changed = make_data();
        changed.total = 49.91;
        assert_ne!(base, encode_receipt(&changed).unwrap());

        let mut changed = make_data();
        changed.items[0].quantity = 2;
        assert_ne!(base, encode_receipt(&changed).unwrap());

        let mut changed = make_data();
        changed.issued_at = changed.issued_at + chrono::Duration::milliseconds(1);
        assert_ne!(base, encode_receipt(&changed).unwrap());
    }

    /// A receipt without line items cannot be archived.
    #[test]
    fn empty_items_rejected() {
        let mut data = make_data();
        data.items.clear();

        let err = encode_receipt(&data).unwrap_err();
        assert!(matches!(err, LedgerError::Encoding { .. }));
        assert!(err.to_string().contains("no line items"));
    }

    /// Non-finite monetary values are rejected with the offending field
    /// named in the error.
    #[test]
    fn non_finite_amount_rejected() {
        let mut data = make_data();
        data.total = f64::NAN;
        let err = encode_receipt(&data).unwrap_err();
        assert!(err.to_string().contains("total"));

        let mut data = make_data();
        data.items[0].unit_price = f64::INFINITY;
        let err = encode_receipt(&data).unwrap_err();
        assert!(err.to_string().contains("unit_price"));
    }

    /// Required identifier strings must be present.
    #[test]
    fn empty_cashier_rejected() {
        let mut data = make_data();
        data.cashier_id.clear();

        let err = encode_receipt(&data).unwrap_err();
        assert!(err.to_string().contains("cashier_id"));
    }
}
