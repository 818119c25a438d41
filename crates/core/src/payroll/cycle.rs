//! Rolling 31-day salary cycle calculations.
//!
//! Cycles are fixed-length windows rolling from the employee's joining
//! date: `[D, D+31), [D+31, D+62), ...`. This is deliberately NOT
//! calendar-month arithmetic; changing it would change what the company
//! owes people.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use mandap_shared::types::Money;

use crate::ledger::entry::{EntryKind, LedgerEntry};

/// Length of one salary cycle in days.
pub const CYCLE_LENGTH_DAYS: i64 = 31;

/// Salary status for a billing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalaryStatus {
    /// Nothing due for this cycle.
    Paid,
    /// Something paid, something still due.
    Partial,
    /// Nothing paid yet.
    Due,
}

/// A half-open salary cycle window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleWindow {
    /// First day of the cycle (inclusive).
    pub start: NaiveDate,
    /// Day after the last day of the cycle (exclusive).
    pub end: NaiveDate,
}

impl CycleWindow {
    /// Returns true if the date falls inside this window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

/// The employee fields the cycle calculator needs.
#[derive(Debug, Clone)]
pub struct EmployeeProfile {
    /// Name; exact-match key against ledger counterparties.
    pub name: String,
    /// Date the employee joined; anchors every cycle.
    pub joining_date: NaiveDate,
    /// Salary owed per cycle.
    pub monthly_salary: Money,
}

/// Computed salary state for one cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryCycle {
    /// The cycle window.
    pub window: CycleWindow,
    /// Sum of matching debits inside the window.
    pub paid: Money,
    /// Remaining amount owed, floored at zero.
    pub due: Money,
    /// Derived status.
    pub status: SalaryStatus,
}

/// Returns the cycle window containing `as_of`.
///
/// Starts at the joining date and advances in 31-day steps while the
/// window ends at or before `as_of`. For `as_of` before the joining
/// date this returns the first (not-yet-started) cycle.
#[must_use]
pub fn current_window(joining_date: NaiveDate, as_of: NaiveDate) -> CycleWindow {
    let mut start = joining_date;
    let mut end = start + Duration::days(CYCLE_LENGTH_DAYS);

    while end <= as_of {
        start = end;
        end = start + Duration::days(CYCLE_LENGTH_DAYS);
    }

    CycleWindow { start, end }
}

/// Computes the employee's salary state for the cycle containing `as_of`.
///
/// Paid is the sum of DEBIT entries whose counterparty equals the
/// employee's name exactly and whose business date falls inside the
/// window; the sum is order-independent. Due is
/// `max(0, monthly_salary - paid)`. This never errors on future-dated
/// cycles: before the joining date it reports a zeroed, not-yet-started
/// first cycle.
#[must_use]
pub fn salary_cycle(
    employee: &EmployeeProfile,
    as_of: NaiveDate,
    entries: &[LedgerEntry],
) -> SalaryCycle {
    let window = current_window(employee.joining_date, as_of);
    let currency = employee.monthly_salary.currency;

    if as_of < employee.joining_date {
        return SalaryCycle {
            window,
            paid: Money::zero(currency),
            due: Money::zero(currency),
            status: SalaryStatus::Due,
        };
    }

    let paid_minor: i64 = entries
        .iter()
        .filter(|e| {
            e.kind == EntryKind::Debit
                && e.amount.currency == currency
                && e.counterparty.as_deref() == Some(employee.name.as_str())
                && window.contains(e.business_date)
        })
        .map(|e| e.amount.minor)
        .sum();

    let due_minor = (employee.monthly_salary.minor - paid_minor).max(0);

    let status = if due_minor == 0 {
        SalaryStatus::Paid
    } else if paid_minor > 0 {
        SalaryStatus::Partial
    } else {
        SalaryStatus::Due
    };

    SalaryCycle {
        window,
        paid: Money::new(paid_minor, currency),
        due: Money::new(due_minor, currency),
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use mandap_shared::types::{Currency, LedgerEntryId};

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn debit(minor: i64, date: &str, counterparty: &str) -> LedgerEntry {
        LedgerEntry {
            id: LedgerEntryId::new(),
            kind: EntryKind::Debit,
            amount: Money::new(minor, Currency::Inr),
            reason: "salary".to_string(),
            counterparty: Some(counterparty.to_string()),
            business_date: d(date),
            created_at: DateTime::parse_from_rfc3339("2024-01-15T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            invoice_ref: None,
        }
    }

    fn employee(name: &str, joined: &str, salary: i64) -> EmployeeProfile {
        EmployeeProfile {
            name: name.to_string(),
            joining_date: d(joined),
            monthly_salary: Money::new(salary, Currency::Inr),
        }
    }

    #[test]
    fn test_first_window_is_31_days() {
        let w = current_window(d("2024-01-01"), d("2024-01-20"));
        assert_eq!(w.start, d("2024-01-01"));
        assert_eq!(w.end, d("2024-02-01"));
    }

    #[test]
    fn test_window_rolls_in_31_day_steps() {
        // Day 31 after joining starts the second cycle.
        let w = current_window(d("2024-01-01"), d("2024-02-01"));
        assert_eq!(w.start, d("2024-02-01"));
        assert_eq!(w.end, d("2024-03-03"));
    }

    #[test]
    fn test_window_before_joining_is_first_cycle() {
        let w = current_window(d("2024-06-01"), d("2024-05-01"));
        assert_eq!(w.start, d("2024-06-01"));
        assert_eq!(w.end, d("2024-07-02"));
    }

    #[test]
    fn test_scenario_d_partial_salary() {
        // Joined 2024-01-01, salary 30000, one matched DEBIT of 12000.
        let emp = employee("Ravi Kumar", "2024-01-01", 30_000);
        let entries = vec![debit(12_000, "2024-01-10", "Ravi Kumar")];

        let cycle = salary_cycle(&emp, d("2024-01-20"), &entries);
        assert_eq!(cycle.window.start, d("2024-01-01"));
        assert_eq!(cycle.window.end, d("2024-02-01"));
        assert_eq!(cycle.paid.minor, 12_000);
        assert_eq!(cycle.due.minor, 18_000);
        assert_eq!(cycle.status, SalaryStatus::Partial);
    }

    #[test]
    fn test_exact_name_match_only() {
        let emp = employee("Ravi Kumar", "2024-01-01", 30_000);
        let entries = vec![
            debit(5000, "2024-01-10", "Ravi"),
            debit(5000, "2024-01-10", "ravi kumar"),
            debit(5000, "2024-01-10", "Ravi Kumar"),
        ];

        let cycle = salary_cycle(&emp, d("2024-01-20"), &entries);
        assert_eq!(cycle.paid.minor, 5000);
    }

    #[test]
    fn test_entries_outside_window_ignored() {
        let emp = employee("Meena Shah", "2024-01-01", 10_000);
        let entries = vec![
            debit(4000, "2023-12-31", "Meena Shah"),
            debit(3000, "2024-01-15", "Meena Shah"),
            // 2024-02-01 is the second cycle's first day.
            debit(2000, "2024-02-01", "Meena Shah"),
        ];

        let cycle = salary_cycle(&emp, d("2024-01-20"), &entries);
        assert_eq!(cycle.paid.minor, 3000);
        assert_eq!(cycle.due.minor, 7000);
    }

    #[test]
    fn test_credits_never_count_as_salary() {
        let emp = employee("Meena Shah", "2024-01-01", 10_000);
        let mut credit = debit(10_000, "2024-01-10", "Meena Shah");
        credit.kind = EntryKind::Credit;

        let cycle = salary_cycle(&emp, d("2024-01-20"), &[credit]);
        assert_eq!(cycle.paid.minor, 0);
        assert_eq!(cycle.status, SalaryStatus::Due);
    }

    #[test]
    fn test_fully_paid_cycle() {
        let emp = employee("Meena Shah", "2024-01-01", 10_000);
        let entries = vec![
            debit(6000, "2024-01-05", "Meena Shah"),
            debit(4000, "2024-01-25", "Meena Shah"),
        ];

        let cycle = salary_cycle(&emp, d("2024-01-28"), &entries);
        assert_eq!(cycle.paid.minor, 10_000);
        assert_eq!(cycle.due.minor, 0);
        assert_eq!(cycle.status, SalaryStatus::Paid);
    }

    #[test]
    fn test_overpaid_cycle_floors_due_at_zero() {
        let emp = employee("Meena Shah", "2024-01-01", 10_000);
        let entries = vec![debit(12_000, "2024-01-05", "Meena Shah")];

        let cycle = salary_cycle(&emp, d("2024-01-28"), &entries);
        assert_eq!(cycle.paid.minor, 12_000);
        assert_eq!(cycle.due.minor, 0);
        assert_eq!(cycle.status, SalaryStatus::Paid);
    }

    #[test]
    fn test_as_of_before_joining_reports_zeroed_cycle() {
        let emp = employee("New Hire", "2024-06-01", 10_000);
        let entries = vec![debit(5000, "2024-06-05", "New Hire")];

        let cycle = salary_cycle(&emp, d("2024-05-01"), &entries);
        assert_eq!(cycle.window.start, d("2024-06-01"));
        assert_eq!(cycle.paid.minor, 0);
        assert_eq!(cycle.due.minor, 0);
        assert_eq!(cycle.status, SalaryStatus::Due);
    }
}
