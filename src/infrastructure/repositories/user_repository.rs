//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{CreateUserInput, DomainError, UpdateUserInput, User, UserRepository};
use crate::models::user::{ActiveModel, Column, Entity as UserEntity};
use crate::utils::time::now_rfc3339;

use super::{Referent, ensure_unreferenced, still_referenced};

/// SeaORM-based implementation of UserRepository
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn ensure_email_free(&self, email: &str, except: Option<i32>) -> Result<(), DomainError> {
        let mut query = UserEntity::find().filter(Column::Email.eq(email));
        if let Some(id) = except {
            query = query.filter(Column::Id.ne(id));
        }
        if query.one(&self.db).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "A user with email '{}' already exists",
                email
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let users = UserEntity::find()
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await?;

        Ok(users.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        Ok(UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(User::from))
    }

    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<(User, String)>, DomainError> {
        let user = UserEntity::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(user.map(|u| {
            let hash = u.password_hash.clone();
            (User::from(u), hash)
        }))
    }

    async fn create(&self, input: CreateUserInput) -> Result<User, DomainError> {
        self.ensure_email_free(&input.email, None).await?;

        let now = now_rfc3339();
        let new_user = ActiveModel {
            email: Set(input.email),
            name: Set(input.name),
            first_name: Set(input.first_name),
            password_hash: Set(input.password_hash),
            role: Set(input.role.as_str().to_string()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = new_user.insert(&self.db).await?;
        tracing::info!(user_id = model.id, role = %model.role, "User created");
        Ok(User::from(model))
    }

    async fn update(&self, id: i32, input: UpdateUserInput) -> Result<User, DomainError> {
        let existing = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))?;

        if let Some(email) = &input.email {
            self.ensure_email_free(email, Some(id)).await?;
        }

        let mut active: ActiveModel = existing.into();

        if let Some(email) = input.email {
            active.email = Set(email);
        }
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(first_name) = input.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(hash) = input.password_hash {
            active.password_hash = Set(hash);
        }
        if let Some(role) = input.role {
            active.role = Set(role.as_str().to_string());
        }
        active.updated_at = Set(now_rfc3339());

        let model = active.update(&self.db).await?;
        tracing::info!(user_id = model.id, "User updated");
        Ok(User::from(model))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        ensure_unreferenced(&self.db, Referent::Reader, "User", id).await?;

        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| still_referenced(e, "User", id))?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("User", id));
        }

        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }
}
