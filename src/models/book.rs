use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub author: String,
    pub narrator: Option<String>,
    pub summary: Option<String>,
    pub isbn: Option<String>,
    pub duration_minutes: Option<i32>,
    pub cover_path: Option<String>,
    pub audio_path: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::assignment::Entity")]
    Assignments,
}

impl Related<super::assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl Related<super::genre::Entity> for Entity {
    fn to() -> RelationDef {
        super::book_genre::Relation::Genre.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::book_genre::Relation::Book.def().rev())
    }
}

impl Related<super::coup_de_coeur::Entity> for Entity {
    fn to() -> RelationDef {
        super::coup_de_coeur_book::Relation::CoupDeCoeur.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::coup_de_coeur_book::Relation::Book.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Model> for crate::domain::BookSummary {
    fn from(model: &Model) -> Self {
        Self {
            id: model.id,
            title: model.title.clone(),
            author: model.author.clone(),
        }
    }
}
