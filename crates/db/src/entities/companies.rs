//! `SeaORM` Entity for companies table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub parent_group: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::balance_sheets::Entity")]
    BalanceSheets,
    #[sea_orm(has_many = "super::users::Entity")]
    Users,
}

impl Related<super::balance_sheets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BalanceSheets.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for sheetwise_core::records::Company {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            parent_group: model.parent_group,
        }
    }
}
