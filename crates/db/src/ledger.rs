//! Postgres-backed implementation of the ledger capability.

use async_trait::async_trait;
use balance_core::ledger::{
    Account, Adjustment, BalanceLedger, HistoryQuery, LedgerError, Movement, SortKey,
    parse_account_id, validate_non_negative,
};
use balance_core::reservation::{ReportPeriod, Reservation, ReservationKey};
use balance_shared::types::{AccountId, MovementId, ReservationId};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

use crate::entities::{accounts, movements, reservations};
use crate::repositories::{BalanceRepository, MovementRepository, ReservationRepository};

impl From<accounts::Model> for Account {
    fn from(model: accounts::Model) -> Self {
        Self::new(AccountId::from_uuid(model.id), model.balance)
    }
}

impl From<movements::Model> for Movement {
    fn from(model: movements::Model) -> Self {
        Self {
            id: MovementId::from_uuid(model.id),
            to_id: model.to_id.map(AccountId::from_uuid),
            from_id: model.from_id.map(AccountId::from_uuid),
            money: model.money,
            operation: model.operation.into(),
            created_at: model.created_at.into(),
        }
    }
}

impl From<reservations::Model> for Reservation {
    fn from(model: reservations::Model) -> Self {
        Self {
            id: ReservationId::from_uuid(model.id),
            user_id: AccountId::from_uuid(model.user_id),
            service_id: model.service_id,
            order_id: model.order_id,
            amount: model.amount,
            status: model.status.into(),
            created_at: model.created_at.into(),
            recognized_at: model.recognized_at.map(Into::into),
        }
    }
}

/// The ledger, backed by one Postgres connection pool.
pub struct PgLedger {
    balances: BalanceRepository,
    movements: MovementRepository,
    reservations: ReservationRepository,
}

impl PgLedger {
    /// Creates a ledger over the given pool.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            balances: BalanceRepository::new(db.clone()),
            movements: MovementRepository::new(db.clone()),
            reservations: ReservationRepository::new(db),
        }
    }
}

#[async_trait]
impl BalanceLedger for PgLedger {
    async fn get_balance(&self, account_id: &str) -> Result<Account, LedgerError> {
        let id = parse_account_id(account_id)?;
        self.balances.find(id).await.map(Into::into)
    }

    async fn change_balance(
        &self,
        account_id: &str,
        amount: Decimal,
    ) -> Result<Account, LedgerError> {
        let id = parse_account_id(account_id)?;
        let adjustment = Adjustment::new(amount)?;
        self.balances
            .change_balance(id, adjustment)
            .await
            .map(Into::into)
    }

    async fn transfer_balance(
        &self,
        from_id: &str,
        to_id: &str,
        amount: Decimal,
    ) -> Result<Movement, LedgerError> {
        let amount = validate_non_negative(amount)?;
        let from = parse_account_id(from_id)?;
        let to = parse_account_id(to_id)?;
        self.balances.transfer(from, to, amount).await.map(Into::into)
    }

    async fn list_transactions(
        &self,
        account_id: &str,
        sort: SortKey,
        limit: i64,
        page: i64,
    ) -> Result<Vec<Movement>, LedgerError> {
        let query = HistoryQuery::new(account_id, sort, limit, page)?;
        let rows = self.movements.list(&query).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn reserve_money(
        &self,
        user_id: &str,
        service_id: &str,
        order_id: &str,
        amount: Decimal,
    ) -> Result<Reservation, LedgerError> {
        let key = ReservationKey::new(user_id, service_id, order_id, amount)?;
        self.reservations.reserve(&key).await.map(Into::into)
    }

    async fn recognize_money(
        &self,
        user_id: &str,
        service_id: &str,
        order_id: &str,
        amount: Decimal,
    ) -> Result<Reservation, LedgerError> {
        let key = ReservationKey::new(user_id, service_id, order_id, amount)?;
        self.reservations.recognize(&key).await.map(Into::into)
    }

    async fn de_reserve_money(
        &self,
        user_id: &str,
        service_id: &str,
        order_id: &str,
        amount: Decimal,
    ) -> Result<Reservation, LedgerError> {
        let key = ReservationKey::new(user_id, service_id, order_id, amount)?;
        self.reservations.de_reserve(&key).await.map(Into::into)
    }

    async fn list_reservations(
        &self,
        period: ReportPeriod,
    ) -> Result<Vec<Reservation>, LedgerError> {
        let rows = self.reservations.list_recognized(period).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
