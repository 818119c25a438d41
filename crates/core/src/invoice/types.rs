//! Invoice domain types across both schema variants.
//!
//! The company runs two invoice representations side by side: legacy
//! invoices carried over from the old system store rupee decimals, the
//! current model stores minor-unit integers. Both variants sit behind
//! one `Invoice` union with a single payment capability, so the
//! reconciler never branches on schema internals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mandap_shared::types::{InvoiceId, Money};

use super::error::InvoiceError;
use crate::ledger::entry::InvoiceSchema;

/// Status of an enhanced (minor-unit) invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnhancedStatus {
    /// Nothing paid yet.
    Pending,
    /// Partially paid.
    SemiPaid,
    /// Fully paid.
    Paid,
}

impl EnhancedStatus {
    /// Derives the status purely from the paid/total amounts.
    #[must_use]
    pub const fn from_amounts(paid_minor: i64, total_minor: i64) -> Self {
        if paid_minor >= total_minor {
            Self::Paid
        } else if paid_minor > 0 {
            Self::SemiPaid
        } else {
            Self::Pending
        }
    }
}

/// Status of a legacy (rupee-decimal) invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegacyStatus {
    /// An outstanding balance remains.
    Pending,
    /// Balance has reached zero.
    Paid,
}

impl LegacyStatus {
    /// Derives the status purely from the outstanding balance.
    #[must_use]
    pub fn from_balance(balance_amount: Decimal) -> Self {
        if balance_amount.is_zero() {
            Self::Paid
        } else {
            Self::Pending
        }
    }
}

/// An invoice in the current minor-unit model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancedInvoice {
    /// Unique identifier.
    pub id: InvoiceId,
    /// Customer the invoice is billed to.
    pub customer_name: String,
    /// Invoice total.
    pub total: Money,
    /// Amount paid so far; never decreases through this core.
    pub paid: Money,
    /// Status; always a pure function of paid vs total.
    pub status: EnhancedStatus,
}

/// An invoice carried over from the old system, in rupee decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyInvoice {
    /// Unique identifier.
    pub id: InvoiceId,
    /// Customer the invoice is billed to.
    pub customer_name: String,
    /// Invoice total in rupees.
    pub total: Decimal,
    /// Outstanding balance in rupees; floored at zero.
    pub balance_amount: Decimal,
    /// Cumulative advance received in rupees; never decreases.
    pub advance_amount: Decimal,
    /// Status; always a pure function of the balance.
    pub status: LegacyStatus,
}

/// An invoice in either schema, behind one payment capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "schema", rename_all = "lowercase")]
pub enum Invoice {
    /// Minor-unit invoice in the current model.
    Enhanced(EnhancedInvoice),
    /// Rupee-decimal invoice from the old system.
    Legacy(LegacyInvoice),
}

impl Invoice {
    /// Returns the invoice's ID.
    #[must_use]
    pub const fn id(&self) -> InvoiceId {
        match self {
            Self::Enhanced(inv) => inv.id,
            Self::Legacy(inv) => inv.id,
        }
    }

    /// Returns which schema variant this invoice belongs to.
    #[must_use]
    pub const fn schema(&self) -> InvoiceSchema {
        match self {
            Self::Enhanced(_) => InvoiceSchema::Enhanced,
            Self::Legacy(_) => InvoiceSchema::Legacy,
        }
    }

    /// Applies a credit's amount to this invoice and recomputes status.
    ///
    /// Enhanced: `paid += amount` in minor units. Legacy: the amount is
    /// converted to rupees (minor / 100), the outstanding balance drops
    /// by it (floored at zero) and the cumulative advance rises by it.
    /// This is the only path allowed to move paid/balance amounts from
    /// ledger activity.
    ///
    /// # Errors
    ///
    /// Returns an error on non-positive amounts, currency mismatch
    /// against an enhanced invoice, or minor-unit overflow.
    pub fn apply_payment(&mut self, amount: Money) -> Result<(), InvoiceError> {
        if !amount.is_positive() {
            return Err(InvoiceError::AmountNotPositive);
        }

        match self {
            Self::Enhanced(inv) => {
                if amount.currency != inv.total.currency {
                    return Err(InvoiceError::CurrencyMismatch {
                        payment: amount.currency.to_string(),
                        invoice: inv.total.currency.to_string(),
                    });
                }
                inv.paid = inv
                    .paid
                    .checked_add(amount)
                    .ok_or(InvoiceError::AmountOverflow)?;
                inv.status = EnhancedStatus::from_amounts(inv.paid.minor, inv.total.minor);
            }
            Self::Legacy(inv) => {
                let converted = amount.to_major_units();
                inv.balance_amount = (inv.balance_amount - converted).max(Decimal::ZERO);
                inv.advance_amount += converted;
                inv.status = LegacyStatus::from_balance(inv.balance_amount);
            }
        }

        Ok(())
    }
}
