use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only history of the readers attached to an assignment.
///
/// `assignment_id` deliberately has no foreign key: the history outlives
/// the assignment it describes.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "assignment_readers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub assignment_id: i32,
    pub reader_id: i32,
    pub assigned_date: String,
    pub notes: Option<String>,
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
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reader.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
