//! Movements: the immutable audit trail of balance changes.

use std::fmt;

use balance_shared::types::{AccountId, MovementId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What kind of balance change a movement records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    /// Money credited to an account.
    Add,
    /// Money debited from an account.
    Withdraw,
    /// Money moved between two accounts.
    Transfer,
    /// Money held against an order.
    Reserve,
    /// Held money returned to the account.
    ReturnReserve,
}

impl Operation {
    /// Returns the string representation of the operation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Withdraw => "withdraw",
            Self::Transfer => "transfer",
            Self::Reserve => "reserve",
            Self::ReturnReserve => "return-reserve",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The accounts a movement touches.
///
/// Every movement has at least one side; only transfers have both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parties {
    /// Money came into `to`.
    Credit {
        /// Receiving account.
        to: AccountId,
    },
    /// Money left `from`.
    Debit {
        /// Paying account.
        from: AccountId,
    },
    /// Money moved from `from` to `to`.
    Both {
        /// Paying account.
        from: AccountId,
        /// Receiving account.
        to: AccountId,
    },
}

impl Parties {
    /// Receiving account, if any.
    #[must_use]
    pub const fn to_id(&self) -> Option<AccountId> {
        match self {
            Self::Credit { to } | Self::Both { to, .. } => Some(*to),
            Self::Debit { .. } => None,
        }
    }

    /// Paying account, if any.
    #[must_use]
    pub const fn from_id(&self) -> Option<AccountId> {
        match self {
            Self::Debit { from } | Self::Both { from, .. } => Some(*from),
            Self::Credit { .. } => None,
        }
    }
}

/// A recorded balance change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    /// Movement identifier.
    pub id: MovementId,
    /// Receiving account.
    pub to_id: Option<AccountId>,
    /// Paying account.
    pub from_id: Option<AccountId>,
    /// Unsigned amount; the direction is given by the operation and parties.
    pub money: Decimal,
    /// What kind of change this was.
    pub operation: Operation,
    /// When the movement was committed.
    pub created_at: DateTime<Utc>,
}
