//! Ledger error types.
//!
//! This is the closed set of outcomes a ledger operation can fail with.
//! Callers are expected to match on it exhaustively; nothing here is
//! derived from the text of a storage driver message.

use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Lookup Errors ==========
    /// The referenced account does not exist.
    #[error("account not found: {0}")]
    AccountNotFound(String),

    /// No reservation matches the given user, service, order and amount.
    #[error("reserve not found")]
    ReserveNotFound,

    // ========== Validation Errors ==========
    /// An identifier or amount is not syntactically valid.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An amount that must be non-negative was negative.
    #[error("negative amount")]
    NegativeAmount,

    /// Pagination parameters are out of range.
    #[error("invalid sort parameters")]
    InvalidSortParameters,

    // ========== Business Outcome Errors ==========
    /// The debit exceeds the spendable balance.
    #[error("not enough money")]
    InsufficientFunds,

    /// The reservation has already been recognized.
    #[error("reserve already recognized")]
    AlreadyRecognized,

    /// The reservation has already been released.
    #[error("reserve already de-reserved")]
    AlreadyDeReserved,

    /// An open reservation with the same user, service, order and amount exists.
    #[error("an open reserve already exists for this order and amount")]
    DuplicateReservation,

    // ========== Infrastructure Errors ==========
    /// Unclassified storage failure.
    #[error("database error: {0}")]
    Database(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::ReserveNotFound => "RESERVE_NOT_FOUND",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::InvalidSortParameters => "INVALID_SORT_PARAMETERS",
            Self::InsufficientFunds => "INSUFFICIENT_FUNDS",
            Self::AlreadyRecognized => "ALREADY_RECOGNIZED",
            Self::AlreadyDeReserved => "ALREADY_DE_RESERVED",
            Self::DuplicateReservation => "DUPLICATE_RESERVATION",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 200 OK - the request was fine, the business outcome was not
            Self::InsufficientFunds | Self::AlreadyRecognized | Self::AlreadyDeReserved => 200,

            // 400 Bad Request - validation errors
            Self::InvalidInput(_) | Self::NegativeAmount | Self::InvalidSortParameters => 400,

            // 404 Not Found
            Self::AccountNotFound(_) | Self::ReserveNotFound => 404,

            // 409 Conflict
            Self::DuplicateReservation => 409,

            // 500 Internal Server Error
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns true if the request was well-formed but the ledger refused it.
    #[must_use]
    pub fn is_business_failure(&self) -> bool {
        matches!(
            self,
            Self::InsufficientFunds | Self::AlreadyRecognized | Self::AlreadyDeReserved
        )
    }

    /// Returns true if the failure is an infrastructure fault rather than a
    /// property of the request.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Internal(_))
    }
}
