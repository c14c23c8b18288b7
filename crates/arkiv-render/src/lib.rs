//! # arkiv-render
//!
//! Human/legally-readable rendering for the arkiv ledger: the archival
//! receipt document (the durable artifact subject to retention) and the
//! compliance report. Both renderers are pure functions: they read only
//! their arguments and touch no storage or clock.

pub mod document;
pub mod report;

pub use document::{render_archive_document, DocumentContext};
pub use report::render_compliance_report;
