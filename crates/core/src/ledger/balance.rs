//! Running balance calculations over the canonically ordered ledger.
//!
//! The canonical order is `(business_date asc, created_at asc)`: two
//! entries on the same business date resolve by insertion time, never by
//! id or storage order. Every balance in the system comes from the same
//! fold over the same order, so recomputation is idempotent.

use chrono::NaiveDate;

use super::entry::LedgerEntry;

/// Sorts entries into canonical order in place.
///
/// The sort is stable, so entries with fully identical keys keep their
/// input order.
pub fn canonical_sort(entries: &mut [LedgerEntry]) {
    entries.sort_by_key(LedgerEntry::canonical_key);
}

/// Computes the running balance after each entry.
///
/// Entries must already be in canonical order. Credit adds, debit
/// subtracts. This is a pure fold: an empty slice yields an empty vec,
/// and the balance "before the first entry" is 0.
#[must_use]
pub fn running_balances(entries: &[LedgerEntry]) -> Vec<i64> {
    let mut balances = Vec::with_capacity(entries.len());
    let mut acc: i64 = 0;
    for entry in entries {
        acc += entry.signed_minor();
        balances.push(acc);
    }
    balances
}

/// Returns the balance of all entries with `business_date <= as_of`.
///
/// An empty set (or a date before every entry) yields 0.
#[must_use]
pub fn balance_as_of(entries: &[LedgerEntry], as_of: NaiveDate) -> i64 {
    entries
        .iter()
        .filter(|e| e.business_date <= as_of)
        .map(LedgerEntry::signed_minor)
        .sum()
}
