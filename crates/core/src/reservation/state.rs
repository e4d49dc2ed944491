//! Reservation state machine.

use chrono::{DateTime, Utc};

use super::types::ReservationStatus;
use crate::ledger::error::LedgerError;

/// The result of a valid transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Status to persist.
    pub new_status: ReservationStatus,
    /// `recognized_at` to persist.
    pub recognized_at: Option<DateTime<Utc>>,
}

/// Stateless transition rules for reservations.
pub struct ReservationStateMachine;

impl ReservationStateMachine {
    /// Consume the held funds.
    ///
    /// # Errors
    ///
    /// Returns the terminal-state error matching `current` if the
    /// reservation is no longer open.
    pub fn recognize(
        current: ReservationStatus,
        at: DateTime<Utc>,
    ) -> Result<Transition, LedgerError> {
        Self::ensure_open(current)?;
        Ok(Transition {
            new_status: ReservationStatus::Recognized,
            recognized_at: Some(at),
        })
    }

    /// Return the held funds.
    ///
    /// # Errors
    ///
    /// Returns the terminal-state error matching `current` if the
    /// reservation is no longer open.
    pub fn de_reserve(current: ReservationStatus) -> Result<Transition, LedgerError> {
        Self::ensure_open(current)?;
        Ok(Transition {
            new_status: ReservationStatus::DeReserved,
            recognized_at: None,
        })
    }

    /// Maps a status to the error a transition out of it produces.
    ///
    /// # Errors
    ///
    /// `AlreadyRecognized` or `AlreadyDeReserved` for terminal statuses.
    pub fn ensure_open(current: ReservationStatus) -> Result<(), LedgerError> {
        match current {
            ReservationStatus::Reserved => Ok(()),
            ReservationStatus::Recognized => Err(LedgerError::AlreadyRecognized),
            ReservationStatus::DeReserved => Err(LedgerError::AlreadyDeReserved),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognize_from_reserved() {
        let now = Utc::now();
        let transition =
            ReservationStateMachine::recognize(ReservationStatus::Reserved, now).unwrap();
        assert_eq!(transition.new_status, ReservationStatus::Recognized);
        assert_eq!(transition.recognized_at, Some(now));
    }

    #[test]
    fn test_de_reserve_from_reserved() {
        let transition = ReservationStateMachine::de_reserve(ReservationStatus::Reserved).unwrap();
        assert_eq!(transition.new_status, ReservationStatus::DeReserved);
        assert_eq!(transition.recognized_at, None);
    }

    #[test]
    fn test_recognized_is_terminal_for_both_actions() {
        assert_eq!(
            ReservationStateMachine::recognize(ReservationStatus::Recognized, Utc::now())
                .unwrap_err(),
            LedgerError::AlreadyRecognized
        );
        assert_eq!(
            ReservationStateMachine::de_reserve(ReservationStatus::Recognized).unwrap_err(),
            LedgerError::AlreadyRecognized
        );
    }

    #[test]
    fn test_de_reserved_is_terminal_for_both_actions() {
        assert_eq!(
            ReservationStateMachine::recognize(ReservationStatus::DeReserved, Utc::now())
                .unwrap_err(),
            LedgerError::AlreadyDeReserved
        );
        assert_eq!(
            ReservationStateMachine::de_reserve(ReservationStatus::DeReserved).unwrap_err(),
            LedgerError::AlreadyDeReserved
        );
    }
}
