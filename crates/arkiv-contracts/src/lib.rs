//! # arkiv-contracts
//!
//! Shared types and contracts for the arkiv fiscal archival ledger.
//!
//! Every other crate in the workspace imports from here. The crate itself
//! holds only data definitions and error types, never business logic.

pub mod audit;
pub mod compliance;
pub mod error;
pub mod receipt;
pub mod record;
