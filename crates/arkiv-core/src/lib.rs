//! # arkiv-core
//!
//! Trait seams and configuration for the arkiv fiscal archival ledger.
//!
//! This crate defines the boundary the rest of the workspace is written
//! against: the `LedgerStore` persistence interface, the `FiscalAuthority`
//! submission interface, and the TOML-backed `LedgerConfig`. Concrete
//! implementations live elsewhere (the reference in-memory store is in
//! arkiv-ledger).

pub mod config;
pub mod traits;

pub use config::{LedgerConfig, RETENTION_FLOOR_YEARS};
pub use traits::{FiscalAuthority, LedgerStore};
