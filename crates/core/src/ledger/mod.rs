//! Account balances and their audit trail.
//!
//! This module implements the balance side of the ledger:
//! - Accounts and the rules for adjusting them
//! - Movements (the append-only record of every change)
//! - History query validation
//! - Error types shared by every ledger operation
//! - The `BalanceLedger` capability implemented by the storage layer

pub mod account;
pub mod error;
pub mod history;
pub mod movement;
pub mod service;

#[cfg(test)]
mod account_props;

pub use account::{
    Account, Adjustment, MONEY_LIMIT, MONEY_SCALE, parse_account_id, validate_non_negative,
    validate_scale,
};
pub use error::LedgerError;
pub use history::{HistoryQuery, SortKey};
pub use movement::{Movement, Operation, Parties};
pub use service::BalanceLedger;
