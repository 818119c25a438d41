//! Business rule validation for ledger entry creation and correction.

use super::entry::{EntryDraft, EntryKind};
use super::error::LedgerError;

/// Validates an entry draft before any write is attempted.
///
/// # Errors
///
/// Returns an error if the amount is not positive, the reason is blank,
/// or a non-credit entry carries an invoice reference.
pub fn validate_draft(draft: &EntryDraft) -> Result<(), LedgerError> {
    if !draft.amount.is_positive() {
        return Err(LedgerError::AmountNotPositive);
    }

    if draft.reason.trim().is_empty() {
        return Err(LedgerError::MissingReason);
    }

    if draft.invoice_id.is_some() && draft.kind != EntryKind::Credit {
        return Err(LedgerError::OnlyCreditsReconcile);
    }

    Ok(())
}

/// Validates a correction to an existing entry's reason/counterparty.
///
/// Only these two fields are correctable; amounts, dates, and kinds are
/// immutable once written.
///
/// # Errors
///
/// Returns an error if the corrected reason would be blank.
pub fn validate_correction(reason: Option<&str>) -> Result<(), LedgerError> {
    if let Some(r) = reason {
        if r.trim().is_empty() {
            return Err(LedgerError::MissingReason);
        }
    }
    Ok(())
}
