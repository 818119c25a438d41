//! Ledger entry domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use mandap_shared::types::{InvoiceId, LedgerEntryId, Money};

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Money in: increases the running balance.
    Credit,
    /// Money out: decreases the running balance.
    Debit,
}

impl EntryKind {
    /// Applies the entry direction to a positive minor-unit amount.
    #[must_use]
    pub const fn signed(self, minor: i64) -> i64 {
        match self {
            Self::Credit => minor,
            Self::Debit => -minor,
        }
    }
}

impl std::str::FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            _ => Err(format!("Unknown entry kind: {s}")),
        }
    }
}

/// Which invoice schema a reconciled entry landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceSchema {
    /// Rupee-decimal invoices carried over from the old system.
    Legacy,
    /// Minor-unit invoices in the current model.
    Enhanced,
}

/// Reference from a reconciled entry to the invoice it paid into.
///
/// The schema tag records which variant the reference resolved to at
/// reconciliation time; resolution itself probes enhanced first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRef {
    /// The invoice's opaque ID.
    pub id: InvoiceId,
    /// The schema variant the ID resolved to.
    pub schema: InvoiceSchema,
}

/// A single entry in the account ledger.
///
/// The ledger is the single source of truth for all money movement;
/// invoice paid amounts and salary cycle totals are derived from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier for this entry.
    pub id: LedgerEntryId,
    /// Whether this is a credit or debit.
    pub kind: EntryKind,
    /// Amount moved; always positive, direction carried by `kind`.
    pub amount: Money,
    /// Why the money moved (free text, required).
    pub reason: String,
    /// Who the money moved to/from; exact-match key for salary cycles.
    pub counterparty: Option<String>,
    /// Date of the economic event.
    pub business_date: NaiveDate,
    /// Insertion timestamp; immutable, breaks same-date ordering ties.
    pub created_at: DateTime<Utc>,
    /// Set when this credit was reconciled against an invoice.
    pub invoice_ref: Option<InvoiceRef>,
}

impl LedgerEntry {
    /// Returns the signed minor-unit amount (positive credit, negative debit).
    #[must_use]
    pub const fn signed_minor(&self) -> i64 {
        self.kind.signed(self.amount.minor)
    }

    /// The canonical ordering key: business date, then insertion time.
    #[must_use]
    pub const fn canonical_key(&self) -> (NaiveDate, DateTime<Utc>) {
        (self.business_date, self.created_at)
    }
}

/// Input for creating a new ledger entry, before persistence.
#[derive(Debug, Clone)]
pub struct EntryDraft {
    /// Whether this is a credit or debit.
    pub kind: EntryKind,
    /// Amount to move (must be positive).
    pub amount: Money,
    /// Why the money moved.
    pub reason: String,
    /// Optional counterparty name.
    pub counterparty: Option<String>,
    /// Date of the economic event.
    pub business_date: NaiveDate,
    /// Invoice to reconcile against (credits only). Schema is resolved
    /// at reconciliation time, enhanced first.
    pub invoice_id: Option<InvoiceId>,
}
