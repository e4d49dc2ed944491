//! Reservation repository: reserve, recognize, de-reserve and the report read.
//!
//! Transitions follow a lock-then-compare-and-swap sequence:
//! 1. Lock the matching row (`SELECT ... FOR UPDATE`), preferring the open one
//! 2. Validate the transition in the pure state machine
//! 3. Update with `WHERE status = 'reserved'`
//!
//! Whenever an operation touches both tables, the account row is locked
//! before any reservation row.
//!
//! A racing transition on the same reservation either blocks on the lock and
//! then sees the terminal row, or loses the conditional update.

use balance_core::ledger::{LedgerError, Operation, Parties};
use balance_core::reservation::{
    ReportPeriod, ReservationKey, ReservationStateMachine, Transition,
};
use balance_shared::types::{AccountId, ReservationId};
use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, TransactionTrait,
};
use tracing::debug;

use crate::entities::reservations::{self, Column};
use crate::entities::sea_orm_active_enums::ReservationStatus;
use crate::error::classify;
use crate::repositories::balance::{apply_delta, lock_account};
use crate::repositories::movement::record_movement;

/// Repository for reservation lifecycle operations.
pub struct ReservationRepository {
    db: DatabaseConnection,
}

impl ReservationRepository {
    /// Creates a new reservation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Debits the user's balance, opens a reservation and records a
    /// `reserve` movement.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AccountNotFound`, `LedgerError::InsufficientFunds`
    /// or `LedgerError::DuplicateReservation` if an open reservation already
    /// has the same key. Nothing is persisted on failure.
    pub async fn reserve(
        &self,
        key: &ReservationKey,
    ) -> Result<reservations::Model, LedgerError> {
        let txn = self.db.begin().await.map_err(classify)?;

        apply_delta(&txn, key.user_id, -key.amount).await?;

        let reservation = reservations::Entity::insert(reservations::ActiveModel {
            id: Set(ReservationId::new().into_inner()),
            user_id: Set(key.user_id.into_inner()),
            service_id: Set(key.service_id.clone()),
            order_id: Set(key.order_id.clone()),
            amount: Set(key.amount),
            status: Set(ReservationStatus::Reserved),
            recognized_at: Set(None),
            ..Default::default()
        })
        .exec_with_returning(&txn)
        .await
        .map_err(|err| match classify(err) {
            LedgerError::AccountNotFound(_) => {
                LedgerError::AccountNotFound(key.user_id.to_string())
            }
            other => other,
        })?;

        record_movement(
            &txn,
            Parties::Debit { from: key.user_id },
            key.amount,
            Operation::Reserve,
        )
        .await?;

        txn.commit().await.map_err(classify)?;

        debug!(
            reservation_id = %reservation.id,
            user_id = %key.user_id,
            service_id = %key.service_id,
            order_id = %key.order_id,
            amount = %key.amount,
            "funds reserved"
        );
        Ok(reservation)
    }

    /// Marks the matching reservation as recognized. The balance is not
    /// touched; the funds left it when they were reserved.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::ReserveNotFound`, `LedgerError::AlreadyRecognized`
    /// or `LedgerError::AlreadyDeReserved`.
    pub async fn recognize(
        &self,
        key: &ReservationKey,
    ) -> Result<reservations::Model, LedgerError> {
        let txn = self.db.begin().await.map_err(classify)?;

        let current = lock_matching(&txn, key).await?;
        let transition = ReservationStateMachine::recognize(current.status.into(), Utc::now())?;
        let updated = apply_transition(&txn, current, transition).await?;

        txn.commit().await.map_err(classify)?;

        debug!(
            reservation_id = %updated.id,
            service_id = %updated.service_id,
            amount = %updated.amount,
            "reservation recognized"
        );
        Ok(updated)
    }

    /// Marks the matching reservation as de-reserved, returns the held amount
    /// to the user and records a `return-reserve` movement.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::ReserveNotFound`, `LedgerError::AlreadyRecognized`
    /// or `LedgerError::AlreadyDeReserved`.
    pub async fn de_reserve(
        &self,
        key: &ReservationKey,
    ) -> Result<reservations::Model, LedgerError> {
        let txn = self.db.begin().await.map_err(classify)?;

        lock_account(&txn, key.user_id).await?;
        let current = lock_matching(&txn, key).await?;
        let transition = ReservationStateMachine::de_reserve(current.status.into())?;
        let updated = apply_transition(&txn, current, transition).await?;

        let user_id = AccountId::from_uuid(updated.user_id);
        apply_delta(&txn, user_id, updated.amount).await?;
        record_movement(
            &txn,
            Parties::Credit { to: user_id },
            updated.amount,
            Operation::ReturnReserve,
        )
        .await?;

        txn.commit().await.map_err(classify)?;

        debug!(
            reservation_id = %updated.id,
            user_id = %user_id,
            amount = %updated.amount,
            "reservation released"
        );
        Ok(updated)
    }

    /// Recognized reservations whose `recognized_at` falls in `period`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Database` if the query fails.
    pub async fn list_recognized(
        &self,
        period: ReportPeriod,
    ) -> Result<Vec<reservations::Model>, LedgerError> {
        reservations::Entity::find()
            .filter(Column::Status.eq(ReservationStatus::Recognized))
            .filter(Column::RecognizedAt.gte(period.start()))
            .filter(Column::RecognizedAt.lt(period.end()))
            .order_by_asc(Column::ServiceId)
            .order_by_asc(Column::RecognizedAt)
            .all(&self.db)
            .await
            .map_err(classify)
    }
}

fn by_key(key: &ReservationKey) -> Select<reservations::Entity> {
    reservations::Entity::find()
        .filter(Column::UserId.eq(key.user_id.into_inner()))
        .filter(Column::ServiceId.eq(key.service_id.as_str()))
        .filter(Column::OrderId.eq(key.order_id.as_str()))
        .filter(Column::Amount.eq(key.amount))
}

/// Locks the reservation a transition applies to: the open one if there is
/// one, otherwise the most recently created terminal one.
async fn lock_matching(
    txn: &DatabaseTransaction,
    key: &ReservationKey,
) -> Result<reservations::Model, LedgerError> {
    let open = by_key(key)
        .filter(Column::Status.eq(ReservationStatus::Reserved))
        .lock_exclusive()
        .one(txn)
        .await
        .map_err(classify)?;
    if let Some(open) = open {
        return Ok(open);
    }

    by_key(key)
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .lock_exclusive()
        .one(txn)
        .await
        .map_err(classify)?
        .ok_or(LedgerError::ReserveNotFound)
}

/// Persists a transition only if the row is still open.
async fn apply_transition(
    txn: &DatabaseTransaction,
    current: reservations::Model,
    transition: Transition,
) -> Result<reservations::Model, LedgerError> {
    let id = current.id;
    let mut active: reservations::ActiveModel = current.into();
    active.status = Set(transition.new_status.into());
    active.recognized_at = Set(transition.recognized_at.map(Into::into));

    match reservations::Entity::update(active)
        .filter(Column::Status.eq(ReservationStatus::Reserved))
        .exec(txn)
        .await
    {
        Ok(updated) => Ok(updated),
        Err(DbErr::RecordNotUpdated) => {
            let latest = reservations::Entity::find_by_id(id)
                .one(txn)
                .await
                .map_err(classify)?
                .ok_or(LedgerError::ReserveNotFound)?;
            ReservationStateMachine::ensure_open(latest.status.into())?;
            Err(LedgerError::Internal(format!(
                "reservation {id} is open but could not be updated"
            )))
        }
        Err(err) => Err(classify(err)),
    }
}
