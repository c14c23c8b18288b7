//! Archival document rendering.
//!
//! The rendered document is the externally durable artifact subject to
//! regulatory retention: a self-contained, fixed-width plain-text page
//! embedding the transaction identifiers, line items, tax breakdown,
//! payment method, the full content hash, and the chain position. It must
//! be printable and legible decades after the software that produced it is
//! gone, which is why it is plain text and not markup.
//!
//! Rendering is a pure function of its context: no clock reads, no
//! storage access.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use arkiv_contracts::{
    receipt::{MerchantId, ReceiptData, TransactionId},
    record::RecordId,
};

/// Total column width of the rendered page.
const PAGE_WIDTH: usize = 46;

/// Everything the document renderer needs, borrowed from the record under
/// construction.
pub struct DocumentContext<'a> {
    pub record_id: &'a RecordId,
    pub transaction_id: &'a TransactionId,
    pub merchant_id: &'a MerchantId,
    pub data: &'a ReceiptData,
    pub content_hash: &'a str,
    pub previous_hash: &'a str,
    pub chain_position: u64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub signature: &'a str,
}

/// Render the self-contained archival document for one receipt record.
pub fn render_archive_document(ctx: &DocumentContext<'_>) -> String {
    let mut doc = String::new();
    let rule = "=".repeat(PAGE_WIDTH);
    let thin = "-".repeat(PAGE_WIDTH);

    let _ = writeln!(doc, "{rule}");
    let _ = writeln!(doc, "{:^PAGE_WIDTH$}", "FISCAL RECEIPT ARCHIVE");
    let _ = writeln!(doc, "{rule}");
    let _ = writeln!(doc, "Record      : {}", ctx.record_id);
    let _ = writeln!(doc, "Transaction : {}", ctx.transaction_id.0);
    let _ = writeln!(doc, "Merchant    : {}", ctx.merchant_id.0);
    let _ = writeln!(doc, "Issued      : {}", format_ts(ctx.data.issued_at));
    let _ = writeln!(doc, "Archived    : {}", format_ts(ctx.created_at));
    let _ = writeln!(doc, "Retained to : {}", format_ts(ctx.expires_at));
    let _ = writeln!(doc, "{thin}");

    let _ = writeln!(doc, "{:>4}  {:<28} {:>10}", "QTY", "DESCRIPTION", "TOTAL");
    for item in &ctx.data.items {
        let _ = writeln!(
            doc,
            "{:>4}  {:<28} {:>10.2}",
            item.quantity,
            truncate(&item.description, 28),
            item.line_total,
        );
    }
    let _ = writeln!(doc, "{thin}");

    let _ = writeln!(doc, "{:<32} {:>12.2}", "Subtotal", ctx.data.subtotal);
    let _ = writeln!(
        doc,
        "{:<32} {:>12.2}",
        format!("Tax ({:.1}%)", ctx.data.tax_rate),
        ctx.data.tax_amount,
    );
    let _ = writeln!(
        doc,
        "{:<28} {:>3} {:>12.2}",
        "TOTAL", ctx.data.currency, ctx.data.total,
    );
    let _ = writeln!(doc, "Paid by     : {}", ctx.data.payment_method);
    let _ = writeln!(
        doc,
        "Cashier     : {} (session {})",
        ctx.data.cashier_id, ctx.data.session_id,
    );
    let _ = writeln!(doc, "{thin}");

    let _ = writeln!(doc, "Chain position : {}", ctx.chain_position);
    let _ = writeln!(doc, "Previous hash  :");
    let _ = writeln!(doc, "  {}", ctx.previous_hash);
    let _ = writeln!(doc, "Content hash   :");
    let _ = writeln!(doc, "  {}", ctx.content_hash);
    let _ = writeln!(doc, "Verification   : {}", ctx.signature);
    let _ = writeln!(doc, "{rule}");

    doc
}

fn format_ts(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max.saturating_sub(1)).chain(std::iter::once('…')).collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
