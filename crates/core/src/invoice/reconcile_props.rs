//! Property tests for invoice payment application.

use proptest::prelude::*;
use rust_decimal::Decimal;

use mandap_shared::types::{Currency, InvoiceId, Money};

use super::types::{
    EnhancedInvoice, EnhancedStatus, Invoice, LegacyInvoice, LegacyStatus,
};

fn enhanced_invoice(total: i64, paid: i64) -> Invoice {
    Invoice::Enhanced(EnhancedInvoice {
        id: InvoiceId::new(),
        customer_name: "Prop Customer".to_string(),
        total: Money::new(total, Currency::Inr),
        paid: Money::new(paid, Currency::Inr),
        status: EnhancedStatus::from_amounts(paid, total),
    })
}

fn legacy_invoice(total_minor: i64, balance_minor: i64) -> Invoice {
    let total = Decimal::new(total_minor, 2);
    let balance = Decimal::new(balance_minor, 2);
    Invoice::Legacy(LegacyInvoice {
        id: InvoiceId::new(),
        customer_name: "Prop Customer".to_string(),
        total,
        balance_amount: balance,
        advance_amount: total - balance,
        status: LegacyStatus::from_balance(balance),
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Status purity: after any sequence of payments, the stored status
    /// equals the status recomputed from the amounts alone.
    #[test]
    fn prop_enhanced_status_pure(
        total in 1i64..10_000_000,
        payments in prop::collection::vec(1i64..1_000_000, 0..8),
    ) {
        let mut invoice = enhanced_invoice(total, 0);
        for p in payments {
            invoice.apply_payment(Money::new(p, Currency::Inr)).unwrap();
            let Invoice::Enhanced(ref inv) = invoice else { unreachable!() };
            prop_assert_eq!(
                inv.status,
                EnhancedStatus::from_amounts(inv.paid.minor, inv.total.minor)
            );
        }
    }

    /// Paid amount is monotonically non-decreasing under payments.
    #[test]
    fn prop_enhanced_paid_monotonic(
        total in 1i64..10_000_000,
        payments in prop::collection::vec(1i64..1_000_000, 1..8),
    ) {
        let mut invoice = enhanced_invoice(total, 0);
        let mut last_paid = 0;
        for p in payments {
            invoice.apply_payment(Money::new(p, Currency::Inr)).unwrap();
            let Invoice::Enhanced(ref inv) = invoice else { unreachable!() };
            prop_assert!(inv.paid.minor >= last_paid);
            last_paid = inv.paid.minor;
        }
    }

    /// Legacy invariants: balance never goes negative, advance never
    /// decreases, and status tracks the balance exactly.
    #[test]
    fn prop_legacy_balance_floored_and_advance_monotonic(
        total in 1i64..10_000_000,
        payments in prop::collection::vec(1i64..1_000_000, 1..8),
    ) {
        let mut invoice = legacy_invoice(total, total);
        let mut last_advance = Decimal::ZERO;
        for p in payments {
            invoice.apply_payment(Money::new(p, Currency::Inr)).unwrap();
            let Invoice::Legacy(ref inv) = invoice else { unreachable!() };
            prop_assert!(inv.balance_amount >= Decimal::ZERO);
            prop_assert!(inv.advance_amount >= last_advance);
            prop_assert_eq!(inv.status, LegacyStatus::from_balance(inv.balance_amount));
            last_advance = inv.advance_amount;
        }
    }

    /// The minor-to-rupee conversion at the legacy boundary is exact:
    /// one payment of N paise moves the balance by N/100 rupees (until
    /// the floor kicks in).
    #[test]
    fn prop_legacy_conversion_exact(
        payment in 1i64..1_000_000,
    ) {
        // Balance is comfortably larger than any single payment.
        let mut invoice = legacy_invoice(200_000_000, 200_000_000);
        invoice.apply_payment(Money::new(payment, Currency::Inr)).unwrap();

        let Invoice::Legacy(inv) = invoice else { unreachable!() };
        let expected_drop = Decimal::new(payment, 2);
        prop_assert_eq!(Decimal::new(200_000_000, 2) - inv.balance_amount, expected_drop);
        prop_assert_eq!(inv.advance_amount, expected_drop);
    }
}
