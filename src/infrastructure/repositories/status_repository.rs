//! SeaORM implementation of StatusRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{DomainError, Status, StatusRepository};
use crate::models::status::{ActiveModel, Column, Entity as StatusEntity};

pub struct SeaOrmStatusRepository {
    db: DatabaseConnection,
}

impl SeaOrmStatusRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StatusRepository for SeaOrmStatusRepository {
    async fn find_all(&self) -> Result<Vec<Status>, DomainError> {
        let statuses = StatusEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(statuses.into_iter().map(Status::from).collect())
    }

    async fn create(&self, name: String) -> Result<Status, DomainError> {
        let taken = StatusEntity::find()
            .filter(Column::Name.eq(name.as_str()))
            .one(&self.db)
            .await?
            .is_some();
        if taken {
            return Err(DomainError::Conflict(format!(
                "Status '{}' already exists",
                name
            )));
        }

        let model = ActiveModel {
            name: Set(name),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!(status_id = model.id, name = %model.name, "Status created");
        Ok(Status::from(model))
    }
}
