//! `SeaORM` Entity for movements table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::MovementOperation;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "movements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub to_id: Option<Uuid>,
    pub from_id: Option<Uuid>,
    #[sea_orm(column_type = "Decimal(Some((20, 2)))")]
    pub money: Decimal,
    pub operation: MovementOperation,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::ToId",
        to = "super::accounts::Column::Id"
    )]
    ToAccount,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::FromId",
        to = "super::accounts::Column::Id"
    )]
    FromAccount,
}

impl ActiveModelBehavior for ActiveModel {}
