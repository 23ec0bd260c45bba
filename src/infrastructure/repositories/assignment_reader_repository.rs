//! SeaORM implementation of AssignmentReaderRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{
    AssignmentReaderEntry, AssignmentReaderRepository, DomainError, ReaderSummary,
    RecordReaderInput,
};
use crate::models::assignment_reader::{self, ActiveModel, Column, Entity as HistoryEntity};
use crate::models::user;
use crate::services::validation::{self, EntityKind};
use crate::utils::time::now_rfc3339;

/// SeaORM-based implementation of AssignmentReaderRepository
pub struct SeaOrmAssignmentReaderRepository {
    db: DatabaseConnection,
}

impl SeaOrmAssignmentReaderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_entry(entry: assignment_reader::Model, reader: &user::Model) -> AssignmentReaderEntry {
    AssignmentReaderEntry {
        id: entry.id,
        assignment_id: entry.assignment_id,
        assigned_date: entry.assigned_date,
        notes: entry.notes,
        reader: ReaderSummary::from(reader),
    }
}

#[async_trait]
impl AssignmentReaderRepository for SeaOrmAssignmentReaderRepository {
    async fn list_for_assignment(
        &self,
        assignment_id: i32,
    ) -> Result<Vec<AssignmentReaderEntry>, DomainError> {
        validation::ensure_exists(&self.db, EntityKind::Assignment, assignment_id).await?;

        // Same-instant entries fall back to insertion order
        let rows = HistoryEntity::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_desc(Column::AssignedDate)
            .order_by_desc(Column::Id)
            .find_also_related(user::Entity)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(entry, reader)| match reader {
                Some(reader) => Ok(to_entry(entry, &reader)),
                None => Err(DomainError::Internal(format!(
                    "History entry {} references missing reader {}",
                    entry.id, entry.reader_id
                ))),
            })
            .collect()
    }

    async fn record(
        &self,
        assignment_id: i32,
        input: RecordReaderInput,
    ) -> Result<AssignmentReaderEntry, DomainError> {
        validation::ensure_exists(&self.db, EntityKind::Assignment, assignment_id).await?;
        validation::ensure_related(&self.db, EntityKind::Reader, input.reader_id).await?;

        let new_entry = ActiveModel {
            assignment_id: Set(assignment_id),
            reader_id: Set(input.reader_id),
            assigned_date: Set(now_rfc3339()),
            notes: Set(input.notes),
            ..Default::default()
        };

        let entry = new_entry.insert(&self.db).await?;
        tracing::info!(
            assignment_id,
            reader_id = entry.reader_id,
            entry_id = entry.id,
            "Reader recorded in assignment history"
        );

        let reader = user::Entity::find_by_id(entry.reader_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                DomainError::RelatedMissing(format!("Reader {} not found", entry.reader_id))
            })?;

        Ok(to_entry(entry, &reader))
    }
}
