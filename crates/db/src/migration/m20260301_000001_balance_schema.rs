//! Initial balance schema.
//!
//! Creates the operation and status enums, the accounts, movements and
//! reservations tables, their constraints and the indexes used by history
//! lookups, reservation matching and the monthly report.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(MOVEMENTS_SQL).await?;
        db.execute_unprepared(RESERVATIONS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE movement_operation AS ENUM ('add', 'withdraw', 'transfer', 'reserve', 'return-reserve');
CREATE TYPE reservation_status AS ENUM ('reserved', 'recognized', 'de-reserved');
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id          UUID PRIMARY KEY,
    balance     NUMERIC(20, 2) NOT NULL DEFAULT 0,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT accounts_balance_check CHECK (balance >= 0)
);
";

const MOVEMENTS_SQL: &str = r"
CREATE TABLE movements (
    id          UUID PRIMARY KEY,
    to_id       UUID REFERENCES accounts(id),
    from_id     UUID REFERENCES accounts(id),
    money       NUMERIC(20, 2) NOT NULL,
    operation   movement_operation NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT movements_money_check CHECK (money >= 0),
    CONSTRAINT movements_party_check CHECK (to_id IS NOT NULL OR from_id IS NOT NULL)
);

CREATE INDEX idx_movements_to_id ON movements(to_id);
CREATE INDEX idx_movements_from_id ON movements(from_id);
";

const RESERVATIONS_SQL: &str = r"
CREATE TABLE reservations (
    id             UUID PRIMARY KEY,
    user_id        UUID NOT NULL REFERENCES accounts(id),
    service_id     TEXT NOT NULL,
    order_id       TEXT NOT NULL,
    amount         NUMERIC(20, 2) NOT NULL,
    status         reservation_status NOT NULL DEFAULT 'reserved',
    created_at     TIMESTAMPTZ NOT NULL DEFAULT now(),
    recognized_at  TIMESTAMPTZ,
    CONSTRAINT reservations_amount_check CHECK (amount >= 0),
    CONSTRAINT reservations_recognized_at_check
        CHECK ((status = 'recognized') = (recognized_at IS NOT NULL))
);

CREATE INDEX idx_reservations_key ON reservations(user_id, service_id, order_id, amount);
CREATE UNIQUE INDEX uq_reservations_open_key ON reservations(user_id, service_id, order_id, amount)
    WHERE status = 'reserved';
CREATE INDEX idx_reservations_recognized_at ON reservations(recognized_at)
    WHERE status = 'recognized';
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS reservations;
DROP TABLE IF EXISTS movements;
DROP TABLE IF EXISTS accounts;
DROP TYPE IF EXISTS reservation_status;
DROP TYPE IF EXISTS movement_operation;
";
