//! Role and retention policy checks for mutating ledger operations.
//!
//! The auth boundary supplies a trusted "is privileged" signal; these
//! checks combine it with the audit-retention rules.

use chrono::{DateTime, Duration, Utc};

use super::entry::LedgerEntry;
use super::error::LedgerError;

/// Validates that an entry may be deleted.
///
/// Deletion requires a privileged actor, an entry younger than the
/// deletion window, and no invoice link (removing a reconciled credit
/// would desynchronize the invoice it paid into).
///
/// # Errors
///
/// Returns `NotPrivileged`, `ReconciledEntryImmutable`, or
/// `DeletionWindowExpired` accordingly.
pub fn validate_can_delete(
    entry: &LedgerEntry,
    now: DateTime<Utc>,
    is_privileged: bool,
    window_hours: i64,
) -> Result<(), LedgerError> {
    if !is_privileged {
        return Err(LedgerError::NotPrivileged);
    }

    if entry.invoice_ref.is_some() {
        return Err(LedgerError::ReconciledEntryImmutable);
    }

    if now - entry.created_at > Duration::hours(window_hours) {
        return Err(LedgerError::DeletionWindowExpired {
            hours: window_hours,
        });
    }

    Ok(())
}

/// Validates that an entry's reason/counterparty may be corrected.
///
/// # Errors
///
/// Returns `NotPrivileged` for non-admin callers.
pub fn validate_can_correct(is_privileged: bool) -> Result<(), LedgerError> {
    if !is_privileged {
        return Err(LedgerError::NotPrivileged);
    }
    Ok(())
}
