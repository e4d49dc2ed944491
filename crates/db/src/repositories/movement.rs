//! Movement repository: the append-only audit trail and history reads.

use balance_core::ledger::{HistoryQuery, LedgerError, Operation, Parties, SortKey};
use balance_shared::types::MovementId;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use tracing::debug;

use crate::entities::movements::{self, Column};
use crate::error::classify;

/// Appends one movement inside the caller's transaction.
///
/// `money` is the unsigned amount; the direction is carried by `parties`
/// and `operation`.
///
/// # Errors
///
/// Returns `LedgerError::Database` if the insert fails.
pub async fn record_movement<C: ConnectionTrait>(
    conn: &C,
    parties: Parties,
    money: Decimal,
    operation: Operation,
) -> Result<movements::Model, LedgerError> {
    movements::ActiveModel {
        id: Set(MovementId::new().into_inner()),
        to_id: Set(parties.to_id().map(|id| id.into_inner())),
        from_id: Set(parties.from_id().map(|id| id.into_inner())),
        money: Set(money),
        operation: Set(operation.into()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(classify)
}

/// Repository for reading movement history.
pub struct MovementRepository {
    db: DatabaseConnection,
}

impl MovementRepository {
    /// Creates a new movement repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists one page of movements where the account is on either side.
    ///
    /// An unknown account yields an empty page.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Database` if the query fails.
    pub async fn list(
        &self,
        query: &HistoryQuery,
    ) -> Result<Vec<movements::Model>, LedgerError> {
        let account = query.account.into_inner();
        let mut select = movements::Entity::find().filter(
            Condition::any()
                .add(Column::ToId.eq(account))
                .add(Column::FromId.eq(account)),
        );

        select = match query.sort {
            SortKey::DateAsc => select
                .order_by_asc(Column::CreatedAt)
                .order_by_asc(Column::Id),
            SortKey::DateDesc => select
                .order_by_desc(Column::CreatedAt)
                .order_by_desc(Column::Id),
            SortKey::MoneyAsc => select.order_by_asc(Column::Money).order_by_asc(Column::Id),
            SortKey::MoneyDesc => select.order_by_desc(Column::Money).order_by_asc(Column::Id),
            SortKey::Natural => select,
        };

        let rows = select
            .limit(query.page.limit())
            .offset(query.page.offset())
            .all(&self.db)
            .await
            .map_err(classify)?;

        debug!(
            account_id = %query.account,
            sort = query.sort.as_str(),
            limit = query.page.limit(),
            offset = query.page.offset(),
            rows = rows.len(),
            "movement history read"
        );
        Ok(rows)
    }
}
