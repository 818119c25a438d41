//! Ledger report data types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use mandap_shared::types::PageResponse;

use crate::ledger::entry::{EntryKind, LedgerEntry};

/// Filters accepted by the ledger report facade.
///
/// All filters are optional; an empty filter returns the whole ledger.
#[derive(Debug, Clone, Default)]
pub struct LedgerFilter {
    /// Only entries with `business_date >= date_from` are displayed.
    pub date_from: Option<NaiveDate>,
    /// Bounds both the displayed entries and the aggregate summary.
    pub date_to: Option<NaiveDate>,
    /// Only entries of this kind are displayed.
    pub kind: Option<EntryKind>,
    /// Case-insensitive substring match against the counterparty.
    pub counterparty: Option<String>,
}

/// A ledger entry annotated with its running balance.
///
/// The balance is computed over the full canonical ledger before any
/// filtering or pagination; it is the balance of the ledger at this
/// entry, not of the filtered view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryWithBalance {
    /// The underlying entry.
    #[serde(flatten)]
    pub entry: LedgerEntry,
    /// Minor-unit balance of all entries at or before this one.
    pub running_balance: i64,
}

/// Aggregate totals over the end-date-bounded ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Sum of all credit amounts, in minor units.
    pub total_credits: i64,
    /// Sum of all debit amounts, in minor units.
    pub total_debits: i64,
    /// `total_credits - total_debits`.
    pub current_balance: i64,
    /// Number of entries in the bounded set.
    pub total_entries: u64,
}

/// A full ledger report: one page of annotated entries plus totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerReport {
    /// The filtered, paginated entries with running balances.
    pub entries: PageResponse<EntryWithBalance>,
    /// Aggregates over the end-date-bounded, unpaginated set.
    pub summary: LedgerSummary,
}
