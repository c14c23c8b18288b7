//! arkiv Fiscal Archival Ledger — Demo CLI
//!
//! Runs one or all of the ledger demo scenarios. Each scenario uses real
//! arkiv components (archiver, integrity verifier, compliance checker,
//! submission gate) wired over the in-memory reference store with sample
//! repair-shop receipts.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- archive-chain
//!   cargo run -p demo -- verify
//!   cargo run -p demo -- compliance
//!   cargo run -p demo -- submission

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use arkiv_compliance::ComplianceChecker;
use arkiv_contracts::{
    error::LedgerResult,
    receipt::{LineItem, MerchantId, PaymentMethod, ReceiptData, TransactionId},
    record::ReceiptRecord,
};
use arkiv_core::{config::LedgerConfig, traits::FiscalAuthority};
use arkiv_ledger::{Archiver, InMemoryLedgerStore, SigningKey};
use arkiv_render::render_compliance_report;
use arkiv_verify::{IntegrityVerifier, SubmissionGate, SubmissionResult};

// ── CLI definition ────────────────────────────────────────────────────────────

/// arkiv — tamper-evident fiscal receipt ledger demo.
///
/// Each subcommand archives sample receipts into a fresh in-memory ledger
/// and demonstrates one part of the pipeline end to end.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "arkiv fiscal archival ledger demo",
    long_about = "Runs arkiv ledger demo scenarios showing chained archival,\n\
                  integrity verification, compliance scoring, and gated\n\
                  fiscal-authority submission."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all four scenarios in sequence.
    RunAll,
    /// Scenario 1: archive three receipts into one hash chain.
    ArchiveChain,
    /// Scenario 2: verify archived records and show the issue lists.
    Verify,
    /// Scenario 3: score a merchant's ledger against the checklist.
    Compliance,
    /// Scenario 4: gate a record and submit it to a stub authority.
    Submission,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging. Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match cli.command {
        Command::RunAll => run_all(),
        Command::ArchiveChain => run_archive_chain(),
        Command::Verify => run_verify(),
        Command::Compliance => run_compliance(),
        Command::Submission => run_submission(),
    };

    match result {
        Ok(()) => {
            println!("All selected scenarios completed successfully.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_all() -> LedgerResult<()> {
    run_archive_chain()?;
    run_verify()?;
    run_compliance()?;
    run_submission()?;
    Ok(())
}

// ── Shared fixtures ───────────────────────────────────────────────────────────

/// Use the managed secret when present; otherwise a clearly-labelled
/// demo-only key so the demo runs out of the box.
fn signing_key() -> SigningKey {
    match SigningKey::from_env() {
        Ok(key) => key,
        Err(_) => {
            warn!("ARKIV_SIGNING_SECRET is not set, using a demo-only key");
            SigningKey::from_bytes(*b"arkiv-demo-only-key")
        }
    }
}

fn sample_receipt(description: &str, total: f64) -> ReceiptData {
    let net = total / 1.19;
    ReceiptData {
        issued_at: chrono::Utc::now(),
        items: vec![LineItem {
            description: description.to_string(),
            quantity: 1,
            unit_price: total,
            line_total: total,
        }],
        currency: "EUR".to_string(),
        subtotal: (net * 100.0).round() / 100.0,
        tax_rate: 19.0,
        tax_amount: ((total - net) * 100.0).round() / 100.0,
        total,
        payment_method: PaymentMethod::Card,
        cashier_id: "cashier-01".to_string(),
        session_id: "session-9".to_string(),
        metadata: json!({ "register_id": "r-2", "fiscal_code": "DE-001" }),
    }
}

/// Archive three sample receipts for one merchant and return the records.
fn archive_samples(
    store: Arc<InMemoryLedgerStore>,
    merchant: &MerchantId,
) -> LedgerResult<Vec<ReceiptRecord>> {
    let archiver = Archiver::new(store, signing_key(), LedgerConfig::default());

    let samples = [
        ("Diagnostics", 10.00),
        ("Battery swap", 25.50),
        ("Screen replacement", 99.99),
    ];

    let mut records = Vec::new();
    for (idx, (description, total)) in samples.iter().enumerate() {
        let record = archiver.archive(
            TransactionId::new(format!("tx-{:04}", idx + 1)),
            merchant.clone(),
            sample_receipt(description, *total),
        )?;
        records.push(record);
    }
    Ok(records)
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

fn run_archive_chain() -> LedgerResult<()> {
    println!("--- Scenario 1: chained archival ---");

    let store = Arc::new(InMemoryLedgerStore::new());
    let merchant = MerchantId::new("repair-shop-7");
    let records = archive_samples(store, &merchant)?;

    for record in &records {
        println!(
            "  position {}  total {:>6.2}  hash {}…  prev {}…",
            record.chain_position,
            record.data.total,
            &record.content_hash[..12],
            &record.previous_hash[..12],
        );
    }

    println!();
    println!("Archival document for the last record:");
    println!("{}", records.last().expect("three records archived").rendered_document);
    Ok(())
}

fn run_verify() -> LedgerResult<()> {
    println!("--- Scenario 2: integrity verification ---");

    let store = Arc::new(InMemoryLedgerStore::new());
    let merchant = MerchantId::new("repair-shop-7");
    let records = archive_samples(store.clone(), &merchant)?;

    let verifier = IntegrityVerifier::new(store, LedgerConfig::default());
    for record in &records {
        let outcome = verifier.verify(&record.record_id)?;
        println!(
            "  record {}  valid: {}  issues: {:?}",
            record.record_id, outcome.is_valid, outcome.issues,
        );
    }

    println!();
    Ok(())
}

fn run_compliance() -> LedgerResult<()> {
    println!("--- Scenario 3: compliance scoring ---");

    let store = Arc::new(InMemoryLedgerStore::new());
    let merchant = MerchantId::new("repair-shop-7");
    archive_samples(store.clone(), &merchant)?;

    let checker = ComplianceChecker::new(store, LedgerConfig::default());
    let report = checker.check_compliance(&merchant);

    println!("{}", render_compliance_report(&report));
    Ok(())
}

fn run_submission() -> LedgerResult<()> {
    println!("--- Scenario 4: gated submission ---");

    let store = Arc::new(InMemoryLedgerStore::new());
    let merchant = MerchantId::new("repair-shop-7");
    let records = archive_samples(store.clone(), &merchant)?;

    let metadata_schema = json!({
        "type": "object",
        "properties": {
            "register_id": { "type": "string" },
            "fiscal_code": { "type": "string" }
        },
        "required": ["register_id", "fiscal_code"]
    });

    let verifier = IntegrityVerifier::new(store.clone(), LedgerConfig::default());
    let gate = SubmissionGate::new(store, verifier, metadata_schema);
    let authority = PrintingAuthority;

    let record = records.last().expect("three records archived");
    match gate.submit_if_ready(&authority, &record.record_id)? {
        SubmissionResult::Submitted { acknowledgement } => {
            println!("  submitted, acknowledgement: {}", acknowledgement);
        }
        SubmissionResult::Blocked { blockers } => {
            println!("  blocked:");
            for blocker in blockers {
                println!("    - {}", blocker);
            }
        }
    }

    println!();
    Ok(())
}

/// Stand-in for the external fiscal authority: prints the hand-off and
/// acknowledges with a reference derived from the record.
struct PrintingAuthority;

impl FiscalAuthority for PrintingAuthority {
    fn submit(&self, record: &ReceiptRecord) -> LedgerResult<String> {
        println!(
            "  [authority] received record {} (chain position {})",
            record.record_id, record.chain_position,
        );
        Ok(format!("ref-{}", &record.content_hash[..16]))
    }
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("arkiv — Fiscal Receipt Archival Ledger");
    println!("Demo scenarios");
    println!("======================================");
    println!();
    println!("Pipeline per archived receipt:");
    println!("  [1] Canonical encoding (explicit, versioned field order)");
    println!("  [2] SHA-256 content hash chained to the merchant's previous record");
    println!("  [3] Keyed display signature derived from the persisted timestamp");
    println!("  [4] Archival document rendered with the full hash and chain position");
    println!("  [5] Record + create audit entry committed as one atomic unit");
    println!();
}
