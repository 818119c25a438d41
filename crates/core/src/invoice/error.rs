//! Invoice payment application errors.

use thiserror::Error;

/// Errors that can occur while applying a payment to an invoice.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// Payment amount must be positive.
    #[error("Payment amount must be positive")]
    AmountNotPositive,

    /// Payment currency does not match the invoice currency.
    #[error("Payment currency {payment} does not match invoice currency {invoice}")]
    CurrencyMismatch {
        /// Currency of the incoming payment.
        payment: String,
        /// Currency the invoice is denominated in.
        invoice: String,
    },

    /// Minor-unit arithmetic overflowed.
    #[error("Paid amount arithmetic overflowed")]
    AmountOverflow,
}

impl InvoiceError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AmountNotPositive => "AMOUNT_NOT_POSITIVE",
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            Self::AmountOverflow => "AMOUNT_OVERFLOW",
        }
    }
}
