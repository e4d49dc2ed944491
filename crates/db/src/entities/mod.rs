//! `SeaORM` entities for the balance schema.

pub mod prelude;

pub mod accounts;
pub mod movements;
pub mod reservations;
pub mod sea_orm_active_enums;
