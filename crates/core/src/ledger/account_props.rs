//! Property-based tests for balance adjustments.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::account::{Adjustment, MONEY_LIMIT, validate_non_negative, validate_scale};
use super::error::LedgerError;
use super::movement::Operation;

/// Strategy to generate balances (0.00 to 10,000.00).
fn balance() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate signed deltas (-10,000.00 to 10,000.00).
fn delta() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A debit followed by the matching credit restores the balance exactly.
    #[test]
    fn prop_debit_then_credit_round_trips(start in balance(), cents in 0i64..1_000_000i64) {
        let amount = Decimal::new(cents, 2);
        prop_assume!(amount <= start);

        let debit = Adjustment::new(-amount).unwrap();
        let credit = Adjustment::new(amount).unwrap();
        prop_assert!(debit.is_debit() || amount.is_zero());

        let after = start + debit.delta() + credit.delta();
        prop_assert_eq!(after, start);
    }

    /// Every two-decimal amount below the limit is accepted; the limit and beyond are not.
    #[test]
    fn prop_range_boundary(cents in 0i64..i64::MAX, extra in 0i64..1_000_000i64) {
        let amount = Decimal::new(cents, 2);
        prop_assert_eq!(validate_non_negative(amount).unwrap(), amount);

        let beyond = MONEY_LIMIT + Decimal::new(extra, 2);
        prop_assert!(matches!(validate_scale(beyond), Err(LedgerError::InvalidInput(_))));
        prop_assert!(matches!(Adjustment::new(-beyond), Err(LedgerError::InvalidInput(_))));
    }

    /// The recorded magnitude and operation describe the delta.
    #[test]
    fn prop_magnitude_and_operation_describe_delta(d in delta()) {
        let adj = Adjustment::new(d).unwrap();
        prop_assert!(adj.magnitude() >= Decimal::ZERO);
        let signed = if adj.operation() == Operation::Withdraw {
            -adj.magnitude()
        } else {
            adj.magnitude()
        };
        prop_assert_eq!(signed, d);
    }

    /// Any amount with three significant fractional digits is rejected.
    #[test]
    fn prop_over_precise_amounts_rejected(mills in 1i64..10_000_000i64) {
        prop_assume!(mills % 10 != 0);
        let amount = Decimal::new(mills, 3);
        prop_assert!(matches!(validate_scale(amount), Err(LedgerError::InvalidInput(_))));
    }
}
