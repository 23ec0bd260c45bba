use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "coups_de_coeur_books")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub coup_de_coeur_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub book_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::coup_de_coeur::Entity",
        from = "Column::CoupDeCoeurId",
        to = "super::coup_de_coeur::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    CoupDeCoeur,
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Book,
}

impl Related<super::coup_de_coeur::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CoupDeCoeur.def()
    }
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
