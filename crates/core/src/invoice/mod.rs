//! Dual-schema invoice model and payment application.
//!
//! Resolution order (enhanced first, then legacy) is a repository
//! concern; once resolved, payment application here is polymorphic.

pub mod error;
pub mod types;

#[cfg(test)]
mod reconcile_props;

pub use error::InvoiceError;
pub use types::{EnhancedInvoice, EnhancedStatus, Invoice, LegacyInvoice, LegacyStatus};
