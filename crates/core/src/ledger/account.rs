//! Account balances and the rules for changing them.

use std::str::FromStr;

use balance_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LedgerError;
use super::movement::{Operation, Parties};

/// Number of fractional digits the ledger stores for every amount.
pub const MONEY_SCALE: u32 = 2;

/// Exclusive upper bound on any amount or balance (`NUMERIC(20, 2)`).
pub const MONEY_LIMIT: Decimal = Decimal::from_parts(0xA764_0000, 0x0DE0_B6B3, 0, false, 0);

/// An account holding a single non-negative balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account identifier.
    pub id: AccountId,
    /// Spendable balance. Never negative.
    pub balance: Decimal,
}

impl Account {
    /// Creates an account snapshot.
    #[must_use]
    pub const fn new(id: AccountId, balance: Decimal) -> Self {
        Self { id, balance }
    }
}

/// Parses a caller-supplied account identifier.
///
/// # Errors
///
/// Returns `LedgerError::InvalidInput` if the identifier is not a UUID.
pub fn parse_account_id(raw: &str) -> Result<AccountId, LedgerError> {
    AccountId::from_str(raw)
        .map_err(|_| LedgerError::InvalidInput(format!("invalid account id: {raw:?}")))
}

/// Checks that an amount fits the ledger's fixed scale and range.
///
/// # Errors
///
/// Returns `LedgerError::InvalidInput` if the amount has more than
/// [`MONEY_SCALE`] fractional digits or its magnitude reaches [`MONEY_LIMIT`].
pub fn validate_scale(amount: Decimal) -> Result<Decimal, LedgerError> {
    if amount.abs() >= MONEY_LIMIT {
        return Err(LedgerError::InvalidInput(format!(
            "amount {amount} is out of range"
        )));
    }
    if amount.normalize().scale() > MONEY_SCALE {
        return Err(LedgerError::InvalidInput(format!(
            "amount {amount} has more than {MONEY_SCALE} decimal places"
        )));
    }
    Ok(amount)
}

/// Checks that an amount is non-negative and fits the ledger's scale.
///
/// # Errors
///
/// Returns `LedgerError::NegativeAmount` for negative amounts and
/// `LedgerError::InvalidInput` for over-precise ones.
pub fn validate_non_negative(amount: Decimal) -> Result<Decimal, LedgerError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(LedgerError::NegativeAmount);
    }
    validate_scale(amount)
}

/// A signed balance change requested through `ChangeBalance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjustment {
    delta: Decimal,
}

impl Adjustment {
    /// Validates a signed delta.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidInput` if the delta is over-precise.
    pub fn new(delta: Decimal) -> Result<Self, LedgerError> {
        Ok(Self {
            delta: validate_scale(delta)?,
        })
    }

    /// The signed delta applied to the balance.
    #[must_use]
    pub const fn delta(&self) -> Decimal {
        self.delta
    }

    /// The unsigned amount recorded on the movement.
    #[must_use]
    pub fn magnitude(&self) -> Decimal {
        self.delta.abs()
    }

    /// Returns true if the adjustment takes money out of the account.
    #[must_use]
    pub fn is_debit(&self) -> bool {
        self.delta.is_sign_negative() && !self.delta.is_zero()
    }

    /// The operation tag recorded for this adjustment.
    #[must_use]
    pub fn operation(&self) -> Operation {
        if self.is_debit() {
            Operation::Withdraw
        } else {
            Operation::Add
        }
    }

    /// The movement parties recorded for this adjustment on `account`.
    #[must_use]
    pub fn parties(&self, account: AccountId) -> Parties {
        if self.is_debit() {
            Parties::Debit { from: account }
        } else {
            Parties::Credit { to: account }
        }
    }
}
