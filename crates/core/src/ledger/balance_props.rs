//! Property tests for the running balance fold and canonical ordering.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use proptest::prelude::*;

use mandap_shared::types::{Currency, LedgerEntryId, Money};

use super::balance::{balance_as_of, canonical_sort, running_balances};
use super::entry::{EntryKind, LedgerEntry};

fn base_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// Strategy for a single entry: direction, positive amount, small date
/// offset (to force same-date collisions), distinct insertion second.
fn entry_strategy() -> impl Strategy<Value = (bool, i64, i64)> {
    (any::<bool>(), 1i64..1_000_000, 0i64..10)
}

fn entries_strategy(max_len: usize) -> impl Strategy<Value = Vec<(bool, i64, i64)>> {
    prop::collection::vec(entry_strategy(), 0..=max_len)
}

fn build_entries(raw: &[(bool, i64, i64)]) -> Vec<LedgerEntry> {
    raw.iter()
        .enumerate()
        .map(|(i, &(is_credit, minor, day_offset))| LedgerEntry {
            id: LedgerEntryId::new(),
            kind: if is_credit {
                EntryKind::Credit
            } else {
                EntryKind::Debit
            },
            amount: Money::new(minor, Currency::Inr),
            reason: "prop".to_string(),
            counterparty: None,
            business_date: base_date() + Duration::days(day_offset),
            // Insertion order = index order, so created_at is unique.
            created_at: base_time() + Duration::seconds(i64::try_from(i).unwrap()),
            invoice_ref: None,
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The Nth running balance equals the signed sum of the first N
    /// entries in canonical order.
    #[test]
    fn prop_running_balance_is_prefix_sum(raw in entries_strategy(30)) {
        let mut entries = build_entries(&raw);
        canonical_sort(&mut entries);
        let balances = running_balances(&entries);

        prop_assert_eq!(balances.len(), entries.len());
        for n in 0..entries.len() {
            let expected: i64 = entries[..=n].iter().map(LedgerEntry::signed_minor).sum();
            prop_assert_eq!(balances[n], expected);
        }
    }

    /// Recomputation over the same set is idempotent.
    #[test]
    fn prop_recomputation_deterministic(raw in entries_strategy(30)) {
        let mut entries = build_entries(&raw);
        canonical_sort(&mut entries);

        let first = running_balances(&entries);
        let second = running_balances(&entries);
        prop_assert_eq!(first, second);
    }

    /// Tie-break law: shuffling storage order never changes the computed
    /// balances, because canonical order is reconstructed from
    /// (business_date, created_at) alone.
    #[test]
    fn prop_storage_order_irrelevant(raw in entries_strategy(20)) {
        let mut forward = build_entries(&raw);
        let mut reversed: Vec<LedgerEntry> = forward.clone();
        reversed.reverse();

        canonical_sort(&mut forward);
        canonical_sort(&mut reversed);

        let fwd_keys: Vec<_> = forward.iter().map(LedgerEntry::canonical_key).collect();
        let rev_keys: Vec<_> = reversed.iter().map(LedgerEntry::canonical_key).collect();
        prop_assert_eq!(fwd_keys, rev_keys);
        prop_assert_eq!(running_balances(&forward), running_balances(&reversed));
    }

    /// Conservation: the final balance equals total credits minus total
    /// debits, for any prefix bound.
    #[test]
    fn prop_conservation(raw in entries_strategy(30), bound_offset in 0i64..12) {
        let mut entries = build_entries(&raw);
        canonical_sort(&mut entries);

        let as_of = base_date() + Duration::days(bound_offset);
        let bounded: Vec<&LedgerEntry> = entries
            .iter()
            .filter(|e| e.business_date <= as_of)
            .collect();

        let credits: i64 = bounded
            .iter()
            .filter(|e| e.kind == EntryKind::Credit)
            .map(|e| e.amount.minor)
            .sum();
        let debits: i64 = bounded
            .iter()
            .filter(|e| e.kind == EntryKind::Debit)
            .map(|e| e.amount.minor)
            .sum();

        prop_assert_eq!(balance_as_of(&entries, as_of), credits - debits);
    }
}
