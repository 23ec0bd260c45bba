use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One catalogued book lent to one reader.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub reader_id: i32,
    pub catalogue_id: i32,
    pub order_id: Option<i32>,
    pub reception_date: Option<String>,
    pub sent_to_reader_date: Option<String>,
    pub returned_to_eca_date: Option<String>,
    pub status_id: i32,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReaderId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Reader,
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::CatalogueId",
        to = "super::book::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Catalogue,
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Order,
    #[sea_orm(
        belongs_to = "super::status::Entity",
        from = "Column::StatusId",
        to = "super::status::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Status,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reader.def()
    }
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Catalogue.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Status.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
