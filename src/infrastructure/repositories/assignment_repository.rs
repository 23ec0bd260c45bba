//! SeaORM implementation of AssignmentRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{
    Assignment, AssignmentRepository, BookSummary, CreateAssignmentInput, DomainError,
    OrderSummary, ReaderSummary, Status, UpdateAssignmentInput,
};
use crate::models::assignment::{ActiveModel, Column, Entity as AssignmentEntity, Model};
use crate::models::{book, order, status, user};
use crate::services::validation::{self, EntityKind};
use crate::utils::time::now_rfc3339;

/// SeaORM-based implementation of AssignmentRepository
pub struct SeaOrmAssignmentRepository {
    db: DatabaseConnection,
}

impl SeaOrmAssignmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load_one(&self, model: Model) -> Result<Assignment, DomainError> {
        let id = model.id;
        hydrate(&self.db, vec![model])
            .await?
            .pop()
            .ok_or_else(|| DomainError::Internal(format!("Assignment {} could not be loaded", id)))
    }
}

/// Join assignments with their reader, catalogue item, order and status.
///
/// Related rows are fetched in one query per table rather than per assignment.
async fn hydrate<C: ConnectionTrait>(
    conn: &C,
    models: Vec<Model>,
) -> Result<Vec<Assignment>, DomainError> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let reader_ids: Vec<i32> = models.iter().map(|m| m.reader_id).collect();
    let book_ids: Vec<i32> = models.iter().map(|m| m.catalogue_id).collect();
    let status_ids: Vec<i32> = models.iter().map(|m| m.status_id).collect();
    let order_ids: Vec<i32> = models.iter().filter_map(|m| m.order_id).collect();

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

    let statuses: HashMap<i32, status::Model> = status::Entity::find()
        .filter(status::Column::Id.is_in(status_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    let orders: HashMap<i32, order::Model> = if order_ids.is_empty() {
        HashMap::new()
    } else {
        order::Entity::find()
            .filter(order::Column::Id.is_in(order_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|o| (o.id, o))
            .collect()
    };

    models
        .into_iter()
        .map(|m| {
            let reader = readers
                .get(&m.reader_id)
                .map(ReaderSummary::from)
                .ok_or_else(|| dangling(m.id, "reader", m.reader_id))?;
            let catalogue = books
                .get(&m.catalogue_id)
                .map(BookSummary::from)
                .ok_or_else(|| dangling(m.id, "catalogue", m.catalogue_id))?;
            let status = statuses
                .get(&m.status_id)
                .cloned()
                .map(Status::from)
                .ok_or_else(|| dangling(m.id, "status", m.status_id))?;
            let order = m
                .order_id
                .and_then(|order_id| orders.get(&order_id))
                .map(OrderSummary::from);

            Ok(Assignment {
                id: m.id,
                reader,
                catalogue,
                order,
                status,
                reception_date: m.reception_date,
                sent_to_reader_date: m.sent_to_reader_date,
                returned_to_eca_date: m.returned_to_eca_date,
                notes: m.notes,
                created_at: m.created_at,
                updated_at: m.updated_at,
            })
        })
        .collect()
}

fn dangling(assignment_id: i32, what: &str, id: i32) -> DomainError {
    DomainError::Internal(format!(
        "Assignment {} references missing {} {}",
        assignment_id, what, id
    ))
}

#[async_trait]
impl AssignmentRepository for SeaOrmAssignmentRepository {
    async fn find_all(&self) -> Result<Vec<Assignment>, DomainError> {
        let models = AssignmentEntity::find()
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await?;

        hydrate(&self.db, models).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Assignment>, DomainError> {
        match AssignmentEntity::find_by_id(id).one(&self.db).await? {
            Some(model) => Ok(Some(self.load_one(model).await?)),
            None => Ok(None),
        }
    }

    async fn create(&self, input: CreateAssignmentInput) -> Result<Assignment, DomainError> {
        validation::ensure_related(&self.db, EntityKind::Reader, input.reader_id).await?;
        validation::ensure_related(&self.db, EntityKind::Book, input.catalogue_id).await?;
        if let Some(order_id) = input.order_id {
            validation::ensure_related(&self.db, EntityKind::Order, order_id).await?;
        }
        validation::ensure_related(&self.db, EntityKind::Status, input.status_id).await?;

        let now = now_rfc3339();
        let new_assignment = ActiveModel {
            reader_id: Set(input.reader_id),
            catalogue_id: Set(input.catalogue_id),
            order_id: Set(input.order_id),
            reception_date: Set(input.reception_date),
            sent_to_reader_date: Set(input.sent_to_reader_date),
            returned_to_eca_date: Set(input.returned_to_eca_date),
            status_id: Set(input.status_id),
            notes: Set(input.notes),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = new_assignment.insert(&self.db).await?;
        tracing::info!(
            assignment_id = model.id,
            reader_id = model.reader_id,
            catalogue_id = model.catalogue_id,
            "Assignment created"
        );

        self.load_one(model).await
    }

    async fn update(
        &self,
        id: i32,
        input: UpdateAssignmentInput,
    ) -> Result<Assignment, DomainError> {
        let existing = AssignmentEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("Assignment", id))?;

        if let Some(reader_id) = input.reader_id {
            validation::ensure_related(&self.db, EntityKind::Reader, reader_id).await?;
        }
        if let Some(catalogue_id) = input.catalogue_id {
            validation::ensure_related(&self.db, EntityKind::Book, catalogue_id).await?;
        }
        if let Some(Some(order_id)) = input.order_id {
            validation::ensure_related(&self.db, EntityKind::Order, order_id).await?;
        }
        if let Some(status_id) = input.status_id {
            validation::ensure_related(&self.db, EntityKind::Status, status_id).await?;
        }

        let mut active: ActiveModel = existing.into();

        if let Some(reader_id) = input.reader_id {
            active.reader_id = Set(reader_id);
        }
        if let Some(catalogue_id) = input.catalogue_id {
            active.catalogue_id = Set(catalogue_id);
        }
        if let Some(order_id) = input.order_id {
            active.order_id = Set(order_id);
        }
        if let Some(date) = input.reception_date {
            active.reception_date = Set(date);
        }
        if let Some(date) = input.sent_to_reader_date {
            active.sent_to_reader_date = Set(date);
        }
        if let Some(date) = input.returned_to_eca_date {
            active.returned_to_eca_date = Set(date);
        }
        if let Some(status_id) = input.status_id {
            active.status_id = Set(status_id);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(notes);
        }
        active.updated_at = Set(now_rfc3339());

        let model = active.update(&self.db).await?;
        tracing::info!(assignment_id = model.id, "Assignment updated");

        self.load_one(model).await
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = AssignmentEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Assignment", id));
        }

        tracing::info!(assignment_id = id, "Assignment deleted");
        Ok(())
    }
}
