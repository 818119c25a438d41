//! Money type with minor-unit integer amounts and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are stored as `i64` minor units (paise for INR). The only
//! decimal conversion in the system is at the legacy-invoice boundary,
//! where rupee-denominated columns live; `to_major_units` covers that.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a monetary amount with currency.
///
/// The amount is an integer count of the smallest currency unit
/// (e.g., 2_50_000 paise = ₹2,500.00).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount in minor units (e.g., paise).
    pub minor: i64,
    /// ISO 4217 currency code (e.g., "INR", "USD").
    pub currency: Currency,
}

/// ISO 4217 currency codes supported by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Indian Rupee (minor unit: paise)
    Inr,
    /// US Dollar (minor unit: cents)
    Usd,
}

impl Currency {
    /// Number of minor-unit digits for this currency.
    #[must_use]
    pub const fn exponent(self) -> u32 {
        match self {
            Self::Inr | Self::Usd => 2,
        }
    }
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(minor: i64, currency: Currency) -> Self {
        Self { minor, currency }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self { minor: 0, currency }
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.minor == 0
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.minor > 0
    }

    /// Adds two amounts of the same currency.
    ///
    /// Returns `None` on currency mismatch or integer overflow, so that
    /// cross-currency sums can never happen silently.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        if self.currency != other.currency {
            return None;
        }
        Some(Self {
            minor: self.minor.checked_add(other.minor)?,
            currency: self.currency,
        })
    }

    /// Subtracts an amount of the same currency.
    ///
    /// Returns `None` on currency mismatch or integer overflow.
    #[must_use]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        if self.currency != other.currency {
            return None;
        }
        Some(Self {
            minor: self.minor.checked_sub(other.minor)?,
            currency: self.currency,
        })
    }

    /// Converts to the major unit as an exact decimal (minor / 10^exponent).
    ///
    /// This is the one sanctioned bridge to the legacy rupee-decimal world.
    #[must_use]
    pub fn to_major_units(&self) -> Decimal {
        Decimal::new(self.minor, self.currency.exponent())
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inr => write!(f, "INR"),
            Self::Usd => write!(f, "USD"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INR" => Ok(Self::Inr),
            "USD" => Ok(Self::Usd),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}
