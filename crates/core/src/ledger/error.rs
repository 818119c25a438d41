//! Ledger error types for validation, policy, and reconciliation failures.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Entry amount must be positive; direction is carried by the kind.
    #[error("Entry amount must be positive")]
    AmountNotPositive,

    /// Entry reason is required.
    #[error("Entry reason is required")]
    MissingReason,

    /// Only credit entries can be applied to an invoice.
    #[error("Only credit entries can be applied to an invoice")]
    OnlyCreditsReconcile,

    /// Date range filter has start after end.
    #[error("Invalid date range: {from} is after {to}")]
    InvalidDateRange {
        /// Requested range start.
        from: chrono::NaiveDate,
        /// Requested range end.
        to: chrono::NaiveDate,
    },

    /// Page number or page size out of accepted bounds.
    #[error("Invalid pagination parameters")]
    InvalidPagination,

    /// Entries of different currencies cannot be summed together.
    #[error("Currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch {
        /// Currency the operation was started in.
        expected: String,
        /// Currency that was encountered.
        actual: String,
    },

    /// Minor-unit arithmetic overflowed.
    #[error("Amount arithmetic overflowed")]
    AmountOverflow,

    // ========== Not Found ==========
    /// Ledger entry not found.
    #[error("Ledger entry not found: {0}")]
    EntryNotFound(Uuid),

    /// Invoice reference resolved to neither schema.
    #[error("Invoice not found in either schema: {0}")]
    InvoiceNotFound(Uuid),

    // ========== Policy Errors ==========
    /// The caller's role does not permit this operation.
    #[error("Operation requires a privileged role")]
    NotPrivileged,

    /// Entries older than the retention window cannot be deleted.
    #[error("Entry is older than {hours} hours and can no longer be deleted")]
    DeletionWindowExpired {
        /// Width of the deletion window in hours.
        hours: i64,
    },

    /// Deleting a reconciled entry would desynchronize its invoice.
    #[error("Entry is reconciled against an invoice and cannot be deleted")]
    ReconciledEntryImmutable,

    // ========== Infrastructure ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AmountNotPositive => "AMOUNT_NOT_POSITIVE",
            Self::MissingReason => "MISSING_REASON",
            Self::OnlyCreditsReconcile => "ONLY_CREDITS_RECONCILE",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::InvalidPagination => "INVALID_PAGINATION",
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            Self::AmountOverflow => "AMOUNT_OVERFLOW",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::InvoiceNotFound(_) => "INVOICE_NOT_FOUND",
            Self::NotPrivileged => "NOT_PRIVILEGED",
            Self::DeletionWindowExpired { .. } => "DELETION_WINDOW_EXPIRED",
            Self::ReconciledEntryImmutable => "RECONCILED_ENTRY_IMMUTABLE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::AmountNotPositive
            | Self::MissingReason
            | Self::OnlyCreditsReconcile
            | Self::InvalidDateRange { .. }
            | Self::InvalidPagination
            | Self::CurrencyMismatch { .. }
            | Self::AmountOverflow => 400,

            // 403 Forbidden - role/age-window violations
            Self::NotPrivileged | Self::DeletionWindowExpired { .. } => 403,

            // 404 Not Found
            Self::EntryNotFound(_) | Self::InvoiceNotFound(_) => 404,

            // 409 Conflict - would desynchronize reconciled state
            Self::ReconciledEntryImmutable => 409,

            // 500 Internal Server Error
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LedgerError::AmountNotPositive.error_code(),
            "AMOUNT_NOT_POSITIVE"
        );
        assert_eq!(
            LedgerError::InvoiceNotFound(Uuid::nil()).error_code(),
            "INVOICE_NOT_FOUND"
        );
        assert_eq!(
            LedgerError::ReconciledEntryImmutable.error_code(),
            "RECONCILED_ENTRY_IMMUTABLE"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(LedgerError::MissingReason.http_status_code(), 400);
        assert_eq!(LedgerError::NotPrivileged.http_status_code(), 403);
        assert_eq!(
            LedgerError::DeletionWindowExpired { hours: 24 }.http_status_code(),
            403
        );
        assert_eq!(
            LedgerError::EntryNotFound(Uuid::nil()).http_status_code(),
            404
        );
        assert_eq!(
            LedgerError::ReconciledEntryImmutable.http_status_code(),
            409
        );
        assert_eq!(
            LedgerError::Database("boom".to_string()).http_status_code(),
            500
        );
    }

    #[test]
    fn test_error_display() {
        let err = LedgerError::InvalidDateRange {
            from: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            to: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid date range: 2024-05-01 is after 2024-04-01"
        );

        assert_eq!(
            LedgerError::DeletionWindowExpired { hours: 24 }.to_string(),
            "Entry is older than 24 hours and can no longer be deleted"
        );
    }
}
