//! Tests for the ledger report facade.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use mandap_shared::types::{Currency, LedgerEntryId, Money, PageRequest};

use super::service::ReportService;
use super::types::LedgerFilter;
use crate::ledger::entry::{EntryKind, LedgerEntry};
use crate::ledger::error::LedgerError;

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn entry(kind: EntryKind, minor: i64, date: &str, seq: i64, counterparty: Option<&str>) -> LedgerEntry {
    LedgerEntry {
        id: LedgerEntryId::new(),
        kind,
        amount: Money::new(minor, Currency::Inr),
        reason: "test".to_string(),
        counterparty: counterparty.map(ToString::to_string),
        business_date: d(date),
        created_at: DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
            + Duration::seconds(seq),
        invoice_ref: None,
    }
}

fn page(page_no: u32, per_page: u32) -> PageRequest {
    PageRequest {
        page: page_no,
        per_page,
    }
}

/// Ten alternating entries: CREDIT 1000, DEBIT 100, CREDIT 1000, ...
fn sample_ledger() -> Vec<LedgerEntry> {
    (0..10)
        .map(|i| {
            let kind = if i % 2 == 0 {
                EntryKind::Credit
            } else {
                EntryKind::Debit
            };
            let minor = if i % 2 == 0 { 1000 } else { 100 };
            let date = format!("2024-03-{:02}", i + 1);
            entry(kind, minor, &date, i, Some(if i % 2 == 0 { "client" } else { "vendor" }))
        })
        .collect()
}

#[test]
fn test_unfiltered_report_balances_and_summary() {
    let report =
        ReportService::ledger_report(sample_ledger(), &LedgerFilter::default(), &page(1, 20))
            .unwrap();

    assert_eq!(report.entries.data.len(), 10);
    assert_eq!(report.entries.data[0].running_balance, 1000);
    assert_eq!(report.entries.data[1].running_balance, 900);
    assert_eq!(report.entries.data[9].running_balance, 4500);

    assert_eq!(report.summary.total_credits, 5000);
    assert_eq!(report.summary.total_debits, 500);
    assert_eq!(report.summary.current_balance, 4500);
    assert_eq!(report.summary.total_entries, 10);
}

#[test]
fn test_balances_do_not_reset_across_pages() {
    // Page 2 must continue the global fold, not restart at zero.
    let report =
        ReportService::ledger_report(sample_ledger(), &LedgerFilter::default(), &page(2, 4))
            .unwrap();

    assert_eq!(report.entries.data.len(), 4);
    // Entries 5..=8 of the fold: 2800, 2700, 3700, 3600.
    let balances: Vec<i64> = report
        .entries
        .data
        .iter()
        .map(|e| e.running_balance)
        .collect();
    assert_eq!(balances, vec![2800, 2700, 3700, 3600]);
    assert_eq!(report.entries.meta.total, 10);
    assert_eq!(report.entries.meta.total_pages, 3);
}

#[test]
fn test_kind_filter_keeps_global_balances() {
    // Filtering to debits only must not turn balances into debit-only sums.
    let filter = LedgerFilter {
        kind: Some(EntryKind::Debit),
        ..LedgerFilter::default()
    };
    let report = ReportService::ledger_report(sample_ledger(), &filter, &page(1, 20)).unwrap();

    assert_eq!(report.entries.data.len(), 5);
    assert_eq!(report.entries.data[0].running_balance, 900);
    assert_eq!(report.entries.data[4].running_balance, 4500);
    // Summary ignores the kind filter.
    assert_eq!(report.summary.total_entries, 10);
    assert_eq!(report.summary.current_balance, 4500);
}

#[test]
fn test_end_date_bounds_summary_and_display() {
    let filter = LedgerFilter {
        date_to: Some(d("2024-03-04")),
        ..LedgerFilter::default()
    };
    let report = ReportService::ledger_report(sample_ledger(), &filter, &page(1, 20)).unwrap();

    assert_eq!(report.entries.data.len(), 4);
    assert_eq!(report.summary.total_entries, 4);
    assert_eq!(report.summary.current_balance, 1800);
}

#[test]
fn test_start_date_filters_display_but_not_summary() {
    let filter = LedgerFilter {
        date_from: Some(d("2024-03-09")),
        ..LedgerFilter::default()
    };
    let report = ReportService::ledger_report(sample_ledger(), &filter, &page(1, 20)).unwrap();

    assert_eq!(report.entries.data.len(), 2);
    // The first displayed entry still carries the balance of everything
    // before it.
    assert_eq!(report.entries.data[0].running_balance, 3600 + 1000);
    assert_eq!(report.summary.total_entries, 10);
}

#[test]
fn test_counterparty_substring_is_case_insensitive() {
    let filter = LedgerFilter {
        counterparty: Some("VEND".to_string()),
        ..LedgerFilter::default()
    };
    let report = ReportService::ledger_report(sample_ledger(), &filter, &page(1, 20)).unwrap();

    assert_eq!(report.entries.data.len(), 5);
    assert!(
        report
            .entries
            .data
            .iter()
            .all(|e| e.entry.counterparty.as_deref() == Some("vendor"))
    );
}

#[test]
fn test_entries_without_counterparty_excluded_by_counterparty_filter() {
    let entries = vec![
        entry(EntryKind::Credit, 100, "2024-03-01", 0, None),
        entry(EntryKind::Credit, 200, "2024-03-02", 1, Some("vendor")),
    ];
    let filter = LedgerFilter {
        counterparty: Some("vendor".to_string()),
        ..LedgerFilter::default()
    };
    let report = ReportService::ledger_report(entries, &filter, &page(1, 20)).unwrap();

    assert_eq!(report.entries.data.len(), 1);
    assert_eq!(report.entries.data[0].running_balance, 300);
}

#[test]
fn test_identical_queries_yield_identical_output() {
    let filter = LedgerFilter {
        kind: Some(EntryKind::Credit),
        ..LedgerFilter::default()
    };

    let a = ReportService::ledger_report(sample_ledger(), &filter, &page(1, 3)).unwrap();
    let b = ReportService::ledger_report(sample_ledger(), &filter, &page(1, 3)).unwrap();

    // Byte-identical output, running balances included.
    let a_json = serde_json::to_string(&a.entries.data.iter().map(|e| e.running_balance).collect::<Vec<_>>()).unwrap();
    let b_json = serde_json::to_string(&b.entries.data.iter().map(|e| e.running_balance).collect::<Vec<_>>()).unwrap();
    assert_eq!(a_json, b_json);
    assert_eq!(a.summary, b.summary);
}

#[test]
fn test_inverted_date_range_rejected() {
    let filter = LedgerFilter {
        date_from: Some(d("2024-03-10")),
        date_to: Some(d("2024-03-01")),
        ..LedgerFilter::default()
    };
    assert!(matches!(
        ReportService::ledger_report(sample_ledger(), &filter, &page(1, 20)),
        Err(LedgerError::InvalidDateRange { .. })
    ));
}

#[test]
fn test_bad_pagination_rejected() {
    assert!(matches!(
        ReportService::ledger_report(sample_ledger(), &LedgerFilter::default(), &page(0, 20)),
        Err(LedgerError::InvalidPagination)
    ));
    assert!(matches!(
        ReportService::ledger_report(sample_ledger(), &LedgerFilter::default(), &page(1, 0)),
        Err(LedgerError::InvalidPagination)
    ));
    assert!(matches!(
        ReportService::ledger_report(sample_ledger(), &LedgerFilter::default(), &page(1, 101)),
        Err(LedgerError::InvalidPagination)
    ));
}

#[test]
fn test_empty_ledger_report() {
    let report =
        ReportService::ledger_report(vec![], &LedgerFilter::default(), &page(1, 20)).unwrap();

    assert!(report.entries.data.is_empty());
    assert_eq!(report.summary.current_balance, 0);
    assert_eq!(report.summary.total_entries, 0);
}
