//! Balance repository: credits, debits and transfers.
//!
//! Every public method runs in its own database transaction. The
//! transaction is committed only on the success path; any early return drops
//! it, which rolls everything back.

use balance_core::ledger::{Adjustment, LedgerError, Operation, Parties};
use balance_shared::types::AccountId;
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Statement, TransactionTrait,
};
use tracing::debug;

use crate::entities::{accounts, movements};
use crate::error::classify;
use crate::repositories::movement::record_movement;

/// Applies a signed delta only if the result stays non-negative.
const APPLY_DELTA_SQL: &str = r"
UPDATE accounts
SET balance = balance + $2, updated_at = now()
WHERE id = $1 AND balance + $2 >= 0
RETURNING id, balance, created_at, updated_at
";

/// Creates the account with a zero balance if it does not exist yet.
///
/// Only meaningful inside the caller's transaction.
///
/// # Errors
///
/// Returns `LedgerError::Database` if the insert fails.
pub async fn ensure_account<C: ConnectionTrait>(
    conn: &C,
    id: AccountId,
) -> Result<(), LedgerError> {
    let account = accounts::ActiveModel {
        id: Set(id.into_inner()),
        balance: Set(Decimal::ZERO),
        ..Default::default()
    };

    accounts::Entity::insert(account)
        .on_conflict(
            OnConflict::column(accounts::Column::Id)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .map_err(classify)?;

    Ok(())
}

/// Takes the row lock on an account for the rest of the caller's
/// transaction. Returns `None` if the account does not exist.
///
/// # Errors
///
/// Returns `LedgerError::Database` if the query fails.
pub async fn lock_account<C: ConnectionTrait>(
    conn: &C,
    id: AccountId,
) -> Result<Option<accounts::Model>, LedgerError> {
    accounts::Entity::find_by_id(id.into_inner())
        .lock_exclusive()
        .one(conn)
        .await
        .map_err(classify)
}

/// Adds `delta` to the account's balance in a single guarded statement.
///
/// # Errors
///
/// Returns `LedgerError::AccountNotFound` if the account does not exist and
/// `LedgerError::InsufficientFunds` if the balance would go negative.
pub async fn apply_delta<C: ConnectionTrait>(
    conn: &C,
    id: AccountId,
    delta: Decimal,
) -> Result<accounts::Model, LedgerError> {
    let updated = accounts::Entity::find()
        .from_raw_sql(Statement::from_sql_and_values(
            DbBackend::Postgres,
            APPLY_DELTA_SQL,
            [id.into_inner().into(), delta.into()],
        ))
        .one(conn)
        .await
        .map_err(classify)?;

    if let Some(account) = updated {
        return Ok(account);
    }

    let exists = accounts::Entity::find_by_id(id.into_inner())
        .one(conn)
        .await
        .map_err(classify)?
        .is_some();

    if exists {
        Err(LedgerError::InsufficientFunds)
    } else {
        Err(LedgerError::AccountNotFound(id.to_string()))
    }
}

/// Repository for balance mutations.
pub struct BalanceRepository {
    db: DatabaseConnection,
}

impl BalanceRepository {
    /// Creates a new balance repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Reads an account.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AccountNotFound` if the account does not exist.
    pub async fn find(&self, id: AccountId) -> Result<accounts::Model, LedgerError> {
        accounts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(classify)?
            .ok_or_else(|| LedgerError::AccountNotFound(id.to_string()))
    }

    /// Credits or debits an account, creating it on first use, and records
    /// an `add` or `withdraw` movement.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InsufficientFunds` if a debit exceeds the
    /// balance. Nothing is persisted on failure.
    pub async fn change_balance(
        &self,
        id: AccountId,
        adjustment: Adjustment,
    ) -> Result<accounts::Model, LedgerError> {
        let txn = self.db.begin().await.map_err(classify)?;

        ensure_account(&txn, id).await?;
        let account = apply_delta(&txn, id, adjustment.delta()).await?;
        record_movement(
            &txn,
            adjustment.parties(id),
            adjustment.magnitude(),
            adjustment.operation(),
        )
        .await?;

        txn.commit().await.map_err(classify)?;

        debug!(
            account_id = %id,
            delta = %adjustment.delta(),
            balance = %account.balance,
            operation = %adjustment.operation(),
            "balance changed"
        );
        Ok(account)
    }

    /// Moves `amount` from one existing account to another and records one
    /// `transfer` movement.
    ///
    /// Both rows are locked in id order before either is touched, so two
    /// opposing transfers cannot deadlock.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AccountNotFound` if either account is missing and
    /// `LedgerError::InsufficientFunds` if the source cannot cover `amount`.
    /// Nothing is persisted on failure.
    pub async fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<movements::Model, LedgerError> {
        let txn = self.db.begin().await.map_err(classify)?;

        let locked = accounts::Entity::find()
            .filter(accounts::Column::Id.is_in([from.into_inner(), to.into_inner()]))
            .order_by_asc(accounts::Column::Id)
            .lock_exclusive()
            .all(&txn)
            .await
            .map_err(classify)?;
        for id in [to, from] {
            if !locked.iter().any(|a| a.id == id.into_inner()) {
                return Err(LedgerError::AccountNotFound(id.to_string()));
            }
        }

        apply_delta(&txn, to, amount).await?;
        apply_delta(&txn, from, -amount).await?;
        let movement =
            record_movement(&txn, Parties::Both { from, to }, amount, Operation::Transfer).await?;

        txn.commit().await.map_err(classify)?;

        debug!(
            from_id = %from,
            to_id = %to,
            amount = %amount,
            movement_id = %movement.id,
            "balance transferred"
        );
        Ok(movement)
    }
}
