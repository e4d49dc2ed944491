//! Property-based tests for the reservation state machine and report.

use balance_shared::types::{AccountId, ReservationId};
use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::report::summarize_by_service;
use super::state::ReservationStateMachine;
use super::types::{Reservation, ReservationStatus};
use crate::ledger::error::LedgerError;

fn status_strategy() -> impl Strategy<Value = ReservationStatus> {
    prop_oneof![
        Just(ReservationStatus::Reserved),
        Just(ReservationStatus::Recognized),
        Just(ReservationStatus::DeReserved),
    ]
}

/// Strategy to generate amounts (0.00 to 10,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn service() -> impl Strategy<Value = String> {
    prop_oneof![Just("audio".to_string()), Just("video".to_string()), Just("games".to_string())]
}

fn reservation_strategy() -> impl Strategy<Value = Reservation> {
    (service(), amount(), status_strategy()).prop_map(|(service_id, amount, status)| Reservation {
        id: ReservationId::new(),
        user_id: AccountId::new(),
        service_id,
        order_id: "ord".to_string(),
        amount,
        status,
        created_at: Utc::now(),
        recognized_at: None,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any successful transition leaves an open reservation in a terminal state.
    #[test]
    fn prop_transitions_only_leave_reserved(
        status in status_strategy(),
        recognize in any::<bool>(),
    ) {
        let result = if recognize {
            ReservationStateMachine::recognize(status, Utc::now())
        } else {
            ReservationStateMachine::de_reserve(status)
        };

        match result {
            Ok(transition) => {
                prop_assert_eq!(status, ReservationStatus::Reserved);
                prop_assert!(transition.new_status.is_terminal());
                prop_assert_eq!(transition.recognized_at.is_some(), recognize);
            }
            Err(err) => {
                prop_assert!(status.is_terminal());
                let expected = if status == ReservationStatus::Recognized {
                    LedgerError::AlreadyRecognized
                } else {
                    LedgerError::AlreadyDeReserved
                };
                prop_assert_eq!(err, expected);
            }
        }
    }

    /// The report total equals the sum of recognized amounts, one row per service.
    #[test]
    fn prop_summary_preserves_recognized_total(
        rows in prop::collection::vec(reservation_strategy(), 0..40),
    ) {
        let summary = summarize_by_service(&rows);

        let expected: Decimal = rows
            .iter()
            .filter(|r| r.status == ReservationStatus::Recognized)
            .map(|r| r.amount)
            .sum();
        let actual: Decimal = summary.iter().map(|s| s.total).sum();
        prop_assert_eq!(actual, expected);

        prop_assert!(summary.windows(2).all(|w| w[0].service_id < w[1].service_id));
    }
}
