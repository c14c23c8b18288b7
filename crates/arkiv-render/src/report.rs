//! Compliance report rendering.
//!
//! Turns a `ComplianceReport` into a shareable plain-text document. Pure
//! function of its input: no side effects, no persistence, no clock.

use std::fmt::Write as _;

use arkiv_contracts::compliance::{CheckStatus, ComplianceReport, ComplianceStatus};

const PAGE_WIDTH: usize = 62;

/// Render the compliance-check results into a shareable document.
pub fn render_compliance_report(report: &ComplianceReport) -> String {
    let mut doc = String::new();
    let rule = "=".repeat(PAGE_WIDTH);
    let thin = "-".repeat(PAGE_WIDTH);

    let _ = writeln!(doc, "{rule}");
    let _ = writeln!(doc, "{:^PAGE_WIDTH$}", "LEDGER COMPLIANCE REPORT");
    let _ = writeln!(doc, "{rule}");
    let _ = writeln!(doc, "Merchant  : {}", report.merchant_id.0);
    let _ = writeln!(
        doc,
        "Generated : {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
    );
    let _ = writeln!(doc, "{thin}");

    for check in &report.checks {
        let _ = writeln!(
            doc,
            "[{}] {:<22} (weight {:>3})  {}",
            status_token(check.status),
            check.id,
            check.weight,
            check.name,
        );
        let _ = writeln!(doc, "       {}", check.details);
    }

    let _ = writeln!(doc, "{thin}");
    let _ = writeln!(doc, "Score     : {:.1} / 100", report.score);
    let _ = writeln!(doc, "Standing  : {}", standing_label(report.status));
    let _ = writeln!(doc, "{rule}");

    doc
}

fn status_token(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "PASS",
        CheckStatus::Warning => "WARN",
        CheckStatus::Fail => "FAIL",
    }
}

fn standing_label(status: ComplianceStatus) -> &'static str {
    match status {
        ComplianceStatus::Compliant => "COMPLIANT",
        ComplianceStatus::Partial => "PARTIALLY COMPLIANT",
        ComplianceStatus::NonCompliant => "NON-COMPLIANT",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
