//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repositories that run each ledger operation as one database transaction
//! - `PgLedger`, the Postgres implementation of `BalanceLedger`
//! - Database migrations

pub mod entities;
pub mod error;
pub mod ledger;
pub mod migration;
pub mod repositories;

pub use ledger::PgLedger;
pub use repositories::{BalanceRepository, MovementRepository, ReservationRepository};

use std::time::Duration;

use balance_shared::config::DatabaseConfig;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

/// Establishes a connection pool to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .sqlx_logging(false);

    Database::connect(options).await
}

/// Applies all pending migrations.
///
/// # Errors
///
/// Returns an error if a migration fails.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(db, None).await?;
    info!("database migrations applied");
    Ok(())
}
