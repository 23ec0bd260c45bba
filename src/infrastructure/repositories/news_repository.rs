//! SeaORM implementation of NewsRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{CreateNewsInput, DomainError, News, NewsRepository, UpdateNewsInput};
use crate::models::news::{ActiveModel, Column, Entity as NewsEntity};
use crate::utils::time::now_rfc3339;

/// SeaORM-based implementation of NewsRepository
pub struct SeaOrmNewsRepository {
    db: DatabaseConnection,
}

impl SeaOrmNewsRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NewsRepository for SeaOrmNewsRepository {
    async fn find_all(&self, published_only: bool) -> Result<Vec<News>, DomainError> {
        let mut query = NewsEntity::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);
        if published_only {
            query = query.filter(Column::Published.eq(true));
        }

        Ok(query
            .all(&self.db)
            .await?
            .into_iter()
            .map(News::from)
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<News>, DomainError> {
        Ok(NewsEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(News::from))
    }

    async fn create(&self, input: CreateNewsInput) -> Result<News, DomainError> {
        let now = now_rfc3339();
        let item = ActiveModel {
            title: Set(input.title),
            content: Set(input.content),
            published: Set(input.published),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = item.insert(&self.db).await?;
        tracing::info!(news_id = model.id, published = model.published, "News created");
        Ok(News::from(model))
    }

    async fn update(&self, id: i32, input: UpdateNewsInput) -> Result<News, DomainError> {
        let existing = NewsEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("News", id))?;

        let mut active: ActiveModel = existing.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(content) = input.content {
            active.content = Set(content);
        }
        if let Some(published) = input.published {
            active.published = Set(published);
        }
        active.updated_at = Set(now_rfc3339());

        Ok(News::from(active.update(&self.db).await?))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = NewsEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("News", id));
        }

        tracing::info!(news_id = id, "News deleted");
        Ok(())
    }
}
