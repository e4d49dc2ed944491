//! Reservation domain types.

use std::fmt;

use balance_shared::types::{AccountId, ReservationId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::account::{parse_account_id, validate_non_negative};
use crate::ledger::error::LedgerError;

/// Lifecycle status of a reservation.
///
/// A reservation starts as `Reserved` and ends in exactly one of the two
/// terminal states:
/// - Reserved → Recognized (recognize)
/// - Reserved → DeReserved (de-reserve)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReservationStatus {
    /// Funds are held and the outcome is still open.
    Reserved,
    /// Funds were consumed by the service.
    Recognized,
    /// Funds were returned to the account.
    DeReserved,
}

impl ReservationStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reserved => "reserved",
            Self::Recognized => "recognized",
            Self::DeReserved => "de-reserved",
        }
    }

    /// Returns true if no further transition is possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Recognized | Self::DeReserved)
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The business tuple callers use to address a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationKey {
    /// Account the funds are held on.
    pub user_id: AccountId,
    /// Service the funds are held for.
    pub service_id: String,
    /// Order within the service.
    pub order_id: String,
    /// Held amount.
    pub amount: Decimal,
}

impl ReservationKey {
    /// Validates raw reservation parameters.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidInput` for a malformed user id or an
    /// over-precise amount, and `LedgerError::NegativeAmount` for a negative
    /// amount.
    pub fn new(
        user_id: &str,
        service_id: impl Into<String>,
        order_id: impl Into<String>,
        amount: Decimal,
    ) -> Result<Self, LedgerError> {
        let amount = validate_non_negative(amount)?;
        Ok(Self {
            user_id: parse_account_id(user_id)?,
            service_id: service_id.into(),
            order_id: order_id.into(),
            amount,
        })
    }
}

/// A hold of funds against a `(user, service, order)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Reservation identifier.
    pub id: ReservationId,
    /// Account the funds were taken from.
    pub user_id: AccountId,
    /// Service identifier.
    pub service_id: String,
    /// Order identifier.
    pub order_id: String,
    /// Held amount.
    pub amount: Decimal,
    /// Current lifecycle status.
    pub status: ReservationStatus,
    /// When the reservation was made.
    pub created_at: DateTime<Utc>,
    /// When the reservation was recognized, if it was.
    pub recognized_at: Option<DateTime<Utc>>,
}
