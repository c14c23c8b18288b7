//! # arkiv-compliance
//!
//! The weighted compliance checklist for the arkiv ledger, represented as
//! data, plus the checker that evaluates it into a scored
//! `ComplianceReport`. Read-only and deterministic: running it twice over
//! an unchanged ledger yields identical output.

pub mod checker;
pub mod checklist;

pub use checker::ComplianceChecker;
pub use checklist::{CheckDef, CheckKind, CHECKLIST};
