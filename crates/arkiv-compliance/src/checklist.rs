//! The fixed compliance checklist, represented as data.
//!
//! Each item is a `CheckDef` pairing a stable id and weight with a
//! `CheckKind` the checker knows how to evaluate. New checks are added
//! here; the scoring logic in `checker` never changes. Weights are fixed
//! at design time and sum to exactly 100.

/// The evaluation strategy behind one checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    /// The merchant's ledger holds at least one archived record.
    LedgerNonEmpty,
    /// The hash-chaining mechanism is wired into the write path.
    /// Structural: the archiver is the only write path and it always
    /// chains, so this passes by construction.
    ChainingImplemented,
    /// The configured retention period meets the statutory floor.
    RetentionConfigured,
    /// The most recent sampled records all carry well-formed content
    /// hashes.
    RecentHashesPresent,
    /// At least one audit log entry exists for the merchant.
    AuditTrailPresent,
}

/// One checklist item: identity, weight, and evaluation strategy.
#[derive(Debug, Clone, Copy)]
pub struct CheckDef {
    /// Stable id used in reports, e.g. "hash-chaining".
    pub id: &'static str,
    /// Short human-readable name.
    pub name: &'static str,
    /// What the item asserts.
    pub description: &'static str,
    /// Relative importance; all weights sum to 100.
    pub weight: u8,
    /// How the checker evaluates it.
    pub kind: CheckKind,
}

/// The fixed checklist, in report order.
pub const CHECKLIST: [CheckDef; 5] = [
    CheckDef {
        id: "ledger-non-empty",
        name: "Ledger contains records",
        description: "At least one receipt has been archived for this merchant",
        weight: 25,
        kind: CheckKind::LedgerNonEmpty,
    },
    CheckDef {
        id: "hash-chaining",
        name: "Hash chaining active",
        description: "Records are linked through SHA-256 content hashes on the write path",
        weight: 25,
        kind: CheckKind::ChainingImplemented,
    },
    CheckDef {
        id: "retention-configured",
        name: "Retention period configured",
        description: "The configured retention meets the statutory minimum",
        weight: 20,
        kind: CheckKind::RetentionConfigured,
    },
    CheckDef {
        id: "recent-hashes",
        name: "Recent records hashed",
        description: "The most recent sampled records all carry well-formed content hashes",
        weight: 20,
        kind: CheckKind::RecentHashesPresent,
    },
    CheckDef {
        id: "audit-trail",
        name: "Audit trail present",
        description: "At least one audit log entry exists for this merchant",
        weight: 10,
        kind: CheckKind::AuditTrailPresent,
    },
];

// ── Tests ─────────────────────────────────────────────────────────────────────
