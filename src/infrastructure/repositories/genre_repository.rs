//! SeaORM implementation of GenreRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{DomainError, Genre, GenreRepository};
use crate::models::genre::{ActiveModel, Column, Entity as GenreEntity};
use crate::utils::time::now_rfc3339;

/// SeaORM-based implementation of GenreRepository
pub struct SeaOrmGenreRepository {
    db: DatabaseConnection,
}

impl SeaOrmGenreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn ensure_name_free(&self, name: &str, except: Option<i32>) -> Result<(), DomainError> {
        let mut query = GenreEntity::find().filter(Column::Name.eq(name));
        if let Some(id) = except {
            query = query.filter(Column::Id.ne(id));
        }
        if query.one(&self.db).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "Genre '{}' already exists",
                name
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl GenreRepository for SeaOrmGenreRepository {
    async fn find_all(&self) -> Result<Vec<Genre>, DomainError> {
        let genres = GenreEntity::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await?;

        Ok(genres.into_iter().map(Genre::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>, DomainError> {
        Ok(GenreEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Genre::from))
    }

    async fn create(&self, name: String) -> Result<Genre, DomainError> {
        self.ensure_name_free(&name, None).await?;

        let now = now_rfc3339();
        let genre = ActiveModel {
            name: Set(name),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = genre.insert(&self.db).await?;
        tracing::info!(genre_id = model.id, "Genre created");
        Ok(Genre::from(model))
    }

    async fn update(&self, id: i32, name: String) -> Result<Genre, DomainError> {
        let existing = GenreEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("Genre", id))?;

        self.ensure_name_free(&name, Some(id)).await?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(name);
        active.updated_at = Set(now_rfc3339());

        let model = active.update(&self.db).await?;
        Ok(Genre::from(model))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = GenreEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Genre", id));
        }

        tracing::info!(genre_id = id, "Genre deleted");
        Ok(())
    }
}
