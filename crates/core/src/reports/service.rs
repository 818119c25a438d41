//! Ledger report generation.
//!
//! The one rule that must never regress: running balances come from the
//! fold over the FULL canonical ledger, and filtering/pagination only
//! slices that annotated sequence afterwards. Recomputing balances per
//! filtered page would make balances reset per page.

use mandap_shared::types::{PageRequest, PageResponse};

use super::types::{EntryWithBalance, LedgerFilter, LedgerReport, LedgerSummary};
use crate::ledger::balance::{canonical_sort, running_balances};
use crate::ledger::entry::{EntryKind, LedgerEntry};
use crate::ledger::error::LedgerError;

/// Service for generating ledger reports.
pub struct ReportService;

impl ReportService {
    /// Builds a ledger report from the complete entry set.
    ///
    /// `entries` must be the full ledger (storage order is fine; it is
    /// re-sorted canonically here). The end-date bound applies to both
    /// the displayed entries and the summary; all other filters and
    /// pagination apply to the display only, after the global balance
    /// fold.
    ///
    /// # Errors
    ///
    /// Returns an error for an inverted date range or out-of-bounds
    /// pagination; malformed filters never degrade to "no filter".
    pub fn ledger_report(
        mut entries: Vec<LedgerEntry>,
        filter: &LedgerFilter,
        page: &PageRequest,
    ) -> Result<LedgerReport, LedgerError> {
        if let (Some(from), Some(to)) = (filter.date_from, filter.date_to) {
            if from > to {
                return Err(LedgerError::InvalidDateRange { from, to });
            }
        }
        if !page.is_valid() {
            return Err(LedgerError::InvalidPagination);
        }

        // Bound by end date first: entries past it are invisible to both
        // the report and the summary.
        if let Some(to) = filter.date_to {
            entries.retain(|e| e.business_date <= to);
        }

        canonical_sort(&mut entries);
        let balances = running_balances(&entries);
        let summary = Self::summarize(&entries);

        // Global fold done; only now filter and slice for display.
        let filtered: Vec<EntryWithBalance> = entries
            .into_iter()
            .zip(balances)
            .filter(|(e, _)| Self::matches(e, filter))
            .map(|(entry, running_balance)| EntryWithBalance {
                entry,
                running_balance,
            })
            .collect();

        let total = filtered.len() as u64;
        let page_items: Vec<EntryWithBalance> = filtered
            .into_iter()
            .skip(page.offset())
            .take(page.limit())
            .collect();

        Ok(LedgerReport {
            entries: PageResponse::new(page_items, page.page, page.per_page, total),
            summary,
        })
    }

    fn matches(entry: &LedgerEntry, filter: &LedgerFilter) -> bool {
        if let Some(from) = filter.date_from {
            if entry.business_date < from {
                return false;
            }
        }
        if let Some(kind) = filter.kind {
            if entry.kind != kind {
                return false;
            }
        }
        if let Some(ref needle) = filter.counterparty {
            let Some(ref counterparty) = entry.counterparty else {
                return false;
            };
            if !counterparty
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        true
    }

    /// Aggregates the end-date-bounded set.
    #[must_use]
    pub fn summarize(entries: &[LedgerEntry]) -> LedgerSummary {
        let total_credits: i64 = entries
            .iter()
            .filter(|e| e.kind == EntryKind::Credit)
            .map(|e| e.amount.minor)
            .sum();
        let total_debits: i64 = entries
            .iter()
            .filter(|e| e.kind == EntryKind::Debit)
            .map(|e| e.amount.minor)
            .sum();

        LedgerSummary {
            total_credits,
            total_debits,
            current_balance: total_credits - total_debits,
            total_entries: entries.len() as u64,
        }
    }
}
