//! Postgres enum types.

use balance_core::ledger::Operation;
use balance_core::reservation::ReservationStatus as CoreReservationStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "movement_operation")]
pub enum MovementOperation {
    #[sea_orm(string_value = "add")]
    Add,
    #[sea_orm(string_value = "withdraw")]
    Withdraw,
    #[sea_orm(string_value = "transfer")]
    Transfer,
    #[sea_orm(string_value = "reserve")]
    Reserve,
    #[sea_orm(string_value = "return-reserve")]
    ReturnReserve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "reservation_status")]
pub enum ReservationStatus {
    #[sea_orm(string_value = "reserved")]
    Reserved,
    #[sea_orm(string_value = "recognized")]
    Recognized,
    #[sea_orm(string_value = "de-reserved")]
    DeReserved,
}

impl From<Operation> for MovementOperation {
    fn from(op: Operation) -> Self {
        match op {
            Operation::Add => Self::Add,
            Operation::Withdraw => Self::Withdraw,
            Operation::Transfer => Self::Transfer,
            Operation::Reserve => Self::Reserve,
            Operation::ReturnReserve => Self::ReturnReserve,
        }
    }
}

impl From<MovementOperation> for Operation {
    fn from(op: MovementOperation) -> Self {
        match op {
            MovementOperation::Add => Self::Add,
            MovementOperation::Withdraw => Self::Withdraw,
            MovementOperation::Transfer => Self::Transfer,
            MovementOperation::Reserve => Self::Reserve,
            MovementOperation::ReturnReserve => Self::ReturnReserve,
        }
    }
}

impl From<CoreReservationStatus> for ReservationStatus {
    fn from(status: CoreReservationStatus) -> Self {
        match status {
            CoreReservationStatus::Reserved => Self::Reserved,
            CoreReservationStatus::Recognized => Self::Recognized,
            CoreReservationStatus::DeReserved => Self::DeReserved,
        }
    }
}

impl From<ReservationStatus> for CoreReservationStatus {
    fn from(status: ReservationStatus) -> Self {
        match status {
            ReservationStatus::Reserved => Self::Reserved,
            ReservationStatus::Recognized => Self::Recognized,
            ReservationStatus::DeReserved => Self::DeReserved,
        }
    }
}
