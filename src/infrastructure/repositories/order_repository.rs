//! SeaORM implementation of OrderRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{
    BookSummary, CreateOrderInput, DomainError, Order, OrderRepository, ReaderSummary,
};
use crate::models::order::{ActiveModel, Column, Entity as OrderEntity, Model};
use crate::models::{book, user};
use crate::services::validation::{self, EntityKind};
use crate::utils::time::now_rfc3339;

/// SeaORM-based implementation of OrderRepository
pub struct SeaOrmOrderRepository {
    db: DatabaseConnection,
}

impl SeaOrmOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

async fn hydrate<C: ConnectionTrait>(
    conn: &C,
    models: Vec<Model>,
) -> Result<Vec<Order>, DomainError> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let reader_ids: Vec<i32> = models.iter().map(|m| m.reader_id).collect();
    let book_ids: Vec<i32> = models.iter().map(|m| m.book_id).collect();

    let readers: HashMap<i32, user::Model> = user::Entity::find()
        .filter(user::Column::Id.is_in(reader_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();
    let books: HashMap<i32, book::Model> = book::Entity::find()
        .filter(book::Column::Id.is_in(book_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|b| (b.id, b))
        .collect();

    models
        .into_iter()
        .map(|m| {
            let reader = readers.get(&m.reader_id).ok_or_else(|| {
                DomainError::Internal(format!("Order {} has no reader {}", m.id, m.reader_id))
            })?;
            let book = books.get(&m.book_id).ok_or_else(|| {
                DomainError::Internal(format!("Order {} has no book {}", m.id, m.book_id))
            })?;

            Ok(Order {
                id: m.id,
                reader: ReaderSummary::from(reader),
                book: BookSummary::from(book),
                order_date: m.order_date,
                notes: m.notes,
                created_at: m.created_at,
            })
        })
        .collect()
}

#[async_trait]
impl OrderRepository for SeaOrmOrderRepository {
    async fn find_all(&self) -> Result<Vec<Order>, DomainError> {
        let models = OrderEntity::find()
            .order_by_desc(Column::OrderDate)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await?;

        hydrate(&self.db, models).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, DomainError> {
        match OrderEntity::find_by_id(id).one(&self.db).await? {
            Some(model) => Ok(hydrate(&self.db, vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn create(&self, input: CreateOrderInput) -> Result<Order, DomainError> {
        validation::ensure_related(&self.db, EntityKind::Reader, input.reader_id).await?;
        validation::ensure_related(&self.db, EntityKind::Book, input.book_id).await?;

        let model = ActiveModel {
            reader_id: Set(input.reader_id),
            book_id: Set(input.book_id),
            order_date: Set(input.order_date),
            notes: Set(input.notes),
            created_at: Set(now_rfc3339()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!(
            order_id = model.id,
            reader_id = model.reader_id,
            book_id = model.book_id,
            "Order created"
        );

        hydrate(&self.db, vec![model])
            .await?
            .pop()
            .ok_or_else(|| DomainError::Internal("Order could not be loaded".to_string()))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = OrderEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Order", id));
        }

        tracing::info!(order_id = id, "Order deleted");
        Ok(())
    }
}
