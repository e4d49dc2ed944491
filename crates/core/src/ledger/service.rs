//! The ledger capability consumed by request adapters.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::account::Account;
use super::error::LedgerError;
use super::history::SortKey;
use super::movement::Movement;
use crate::reservation::{ReportPeriod, Reservation};

/// Every ledger operation, each executed as one atomic unit by the
/// implementation.
///
/// Identifiers arrive as caller-supplied strings and are validated by the
/// implementation, so a malformed id surfaces as `LedgerError::InvalidInput`.
#[async_trait]
pub trait BalanceLedger: Send + Sync {
    /// Reads an account's balance.
    ///
    /// # Errors
    ///
    /// `AccountNotFound` if absent, `InvalidInput` if the id is malformed.
    async fn get_balance(&self, account_id: &str) -> Result<Account, LedgerError>;

    /// Applies a signed delta, creating the account on first use.
    ///
    /// # Errors
    ///
    /// `InsufficientFunds` if a debit exceeds the balance.
    async fn change_balance(
        &self,
        account_id: &str,
        amount: Decimal,
    ) -> Result<Account, LedgerError>;

    /// Moves `amount` between two existing accounts.
    ///
    /// # Errors
    ///
    /// `NegativeAmount`, `AccountNotFound` or `InsufficientFunds`; nothing is
    /// applied on failure.
    async fn transfer_balance(
        &self,
        from_id: &str,
        to_id: &str,
        amount: Decimal,
    ) -> Result<Movement, LedgerError>;

    /// Lists movements touching an account.
    ///
    /// # Errors
    ///
    /// `InvalidSortParameters` for negative pagination, `InvalidInput` for a
    /// malformed id.
    async fn list_transactions(
        &self,
        account_id: &str,
        sort: SortKey,
        limit: i64,
        page: i64,
    ) -> Result<Vec<Movement>, LedgerError>;

    /// Holds `amount` of the user's balance against an order.
    ///
    /// # Errors
    ///
    /// `NegativeAmount`, `AccountNotFound`, `InsufficientFunds` or
    /// `DuplicateReservation`.
    async fn reserve_money(
        &self,
        user_id: &str,
        service_id: &str,
        order_id: &str,
        amount: Decimal,
    ) -> Result<Reservation, LedgerError>;

    /// Consumes a held reservation.
    ///
    /// # Errors
    ///
    /// `ReserveNotFound`, `AlreadyRecognized` or `AlreadyDeReserved`.
    async fn recognize_money(
        &self,
        user_id: &str,
        service_id: &str,
        order_id: &str,
        amount: Decimal,
    ) -> Result<Reservation, LedgerError>;

    /// Releases a held reservation back to the user's balance.
    ///
    /// # Errors
    ///
    /// `ReserveNotFound`, `AlreadyRecognized` or `AlreadyDeReserved`.
    async fn de_reserve_money(
        &self,
        user_id: &str,
        service_id: &str,
        order_id: &str,
        amount: Decimal,
    ) -> Result<Reservation, LedgerError>;

    /// Recognized reservations whose recognition time falls in `period`.
    ///
    /// # Errors
    ///
    /// `Database` on storage failure.
    async fn list_reservations(
        &self,
        period: ReportPeriod,
    ) -> Result<Vec<Reservation>, LedgerError>;
}
