//! Translation of database failures into ledger errors.
//!
//! Classification uses the Postgres SQLSTATE and constraint name reported by
//! the driver. Message text is never inspected.

use balance_core::ledger::LedgerError;
use sea_orm::{DbErr, RuntimeErr};
use tracing::warn;

/// `check_violation`
const CHECK_VIOLATION: &str = "23514";
/// `unique_violation`
const UNIQUE_VIOLATION: &str = "23505";
/// `foreign_key_violation`
const FOREIGN_KEY_VIOLATION: &str = "23503";
/// `invalid_text_representation`
const INVALID_TEXT_REPRESENTATION: &str = "22P02";
/// `numeric_value_out_of_range`
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

const BALANCE_CHECK: &str = "accounts_balance_check";
const OPEN_RESERVATION_KEY: &str = "uq_reservations_open_key";

/// SQLSTATE and constraint name of a driver-reported database error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbFailure {
    /// Five-character SQLSTATE.
    pub code: String,
    /// Violated constraint, if the server reported one.
    pub constraint: Option<String>,
}

impl DbFailure {
    /// Extracts the structured failure from a `DbErr`, if it carries one.
    #[must_use]
    pub fn from_db_err(err: &DbErr) -> Option<Self> {
        let (DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(db)))
        | DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(db)))) = err
        else {
            return None;
        };

        Some(Self {
            code: db.code()?.into_owned(),
            constraint: db.constraint().map(str::to_owned),
        })
    }

    /// Maps the failure to a ledger error.
    #[must_use]
    pub fn classify(&self) -> Option<LedgerError> {
        let constraint = self.constraint.as_deref();
        match (self.code.as_str(), constraint) {
            (CHECK_VIOLATION, Some(BALANCE_CHECK)) => Some(LedgerError::InsufficientFunds),
            (CHECK_VIOLATION, other) => Some(LedgerError::InvalidInput(format!(
                "constraint violated: {}",
                other.unwrap_or("unknown")
            ))),
            (UNIQUE_VIOLATION, Some(OPEN_RESERVATION_KEY)) => {
                Some(LedgerError::DuplicateReservation)
            }
            (FOREIGN_KEY_VIOLATION, other) => Some(LedgerError::AccountNotFound(format!(
                "referenced by {}",
                other.unwrap_or("unknown constraint")
            ))),
            (INVALID_TEXT_REPRESENTATION, _) => {
                Some(LedgerError::InvalidInput("malformed identifier".to_string()))
            }
            (NUMERIC_VALUE_OUT_OF_RANGE, _) => {
                Some(LedgerError::InvalidInput("amount out of range".to_string()))
            }
            _ => None,
        }
    }
}

/// Converts a `DbErr` into the matching ledger error.
///
/// Anything without a recognised SQLSTATE becomes `LedgerError::Database`.
pub fn classify(err: DbErr) -> LedgerError {
    if let Some(mapped) = DbFailure::from_db_err(&err).and_then(|f| f.classify()) {
        return mapped;
    }
    warn!(error = %err, "unclassified database error");
    LedgerError::Database(err.to_string())
}
