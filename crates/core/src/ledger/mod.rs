//! Chronological credit/debit ledger.
//!
//! This module implements the core ledger functionality:
//! - Ledger entries (credits and debits) and their canonical ordering
//! - Running balance calculations
//! - Business rule validation for entry creation and correction
//! - Role/retention policy checks for mutations
//! - Error types for ledger operations

pub mod balance;
pub mod entry;
pub mod error;
pub mod policy;
pub mod validation;

#[cfg(test)]
mod balance_props;

pub use balance::{balance_as_of, canonical_sort, running_balances};
pub use entry::{EntryDraft, EntryKind, InvoiceRef, InvoiceSchema, LedgerEntry};
pub use error::LedgerError;
pub use policy::{validate_can_correct, validate_can_delete};
pub use validation::{validate_correction, validate_draft};
