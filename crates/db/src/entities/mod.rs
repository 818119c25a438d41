//! `SeaORM` entity definitions.

pub mod employees;
pub mod invoices;
pub mod ledger_entries;
pub mod legacy_invoices;
pub mod sea_orm_active_enums;
