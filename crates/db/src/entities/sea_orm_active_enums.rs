//! `SeaORM` active enums mapped to Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Direction of a ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entry_kind")]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Money in.
    #[sea_orm(string_value = "credit")]
    Credit,
    /// Money out.
    #[sea_orm(string_value = "debit")]
    Debit,
}

/// Which invoice schema a reconciled entry resolved to.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "invoice_schema")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceSchema {
    /// Rupee-decimal invoice from the old system.
    #[sea_orm(string_value = "legacy")]
    Legacy,
    /// Minor-unit invoice in the current model.
    #[sea_orm(string_value = "enhanced")]
    Enhanced,
}

/// Status of an enhanced invoice.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "invoice_status")]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Nothing paid yet.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Partially paid.
    #[sea_orm(string_value = "semi_paid")]
    SemiPaid,
    /// Fully paid.
    #[sea_orm(string_value = "paid")]
    Paid,
}

/// Status of a legacy invoice.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(
    rs_type = "String",
    db_type = "Enum",
    enum_name = "legacy_invoice_status"
)]
#[serde(rename_all = "lowercase")]
pub enum LegacyInvoiceStatus {
    /// An outstanding balance remains.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Balance has reached zero.
    #[sea_orm(string_value = "paid")]
    Paid,
}
