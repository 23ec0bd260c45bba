use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "coups_de_coeur")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub audio_path: Option<String>,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::coup_de_coeur_book::Entity")]
    CoupDeCoeurBook,
}

impl Related<super::coup_de_coeur_book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CoupDeCoeurBook.def()
    }
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        super::coup_de_coeur_book::Relation::Book.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::coup_de_coeur_book::Relation::CoupDeCoeur.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
