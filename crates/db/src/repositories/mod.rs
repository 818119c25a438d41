//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. The ledger entry repository is also where entry
//! creation and invoice reconciliation share one transaction.

pub mod employee;
pub mod invoice;
pub mod ledger_entry;

pub use employee::{CreateEmployeeInput, EmployeeError, EmployeeRepository};
pub use invoice::{CreateInvoiceInput, InvoiceRepository};
pub use ledger_entry::{CreateEntryOutcome, LedgerEntryRepository};
