//! SeaORM implementation of CoupDeCoeurRepository
//!
//! Membership is replaced wholesale inside a single transaction: the old
//! links are deleted, the scalar fields updated and the new links inserted.
//! Any failure rolls the three steps back together. Concurrent replaces are
//! not serialized; the last transaction to commit wins.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::domain::{
    BookSummary, CoupDeCoeur, CoupDeCoeurInput, CoupDeCoeurRepository, DomainError,
    MembershipCheck,
};
use crate::models::book;
use crate::models::coup_de_coeur::{ActiveModel, Column, Entity as CoupDeCoeurEntity, Model};
use crate::models::coup_de_coeur_book::{
    self, ActiveModel as LinkActiveModel, Entity as LinkEntity,
};
use crate::services::validation::{self, EntityKind};
use crate::utils::time::now_rfc3339;

/// SeaORM-based implementation of CoupDeCoeurRepository
pub struct SeaOrmCoupDeCoeurRepository {
    db: DatabaseConnection,
}

impl SeaOrmCoupDeCoeurRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

async fn with_books<C: ConnectionTrait>(
    conn: &C,
    model: Model,
) -> Result<CoupDeCoeur, DomainError> {
    let books = model
        .find_related(book::Entity)
        .order_by_asc(book::Column::Id)
        .all(conn)
        .await?;

    Ok(CoupDeCoeur {
        id: model.id,
        title: model.title,
        description: model.description,
        audio_path: model.audio_path,
        active: model.active,
        created_at: model.created_at,
        updated_at: model.updated_at,
        books: books.iter().map(BookSummary::from).collect(),
    })
}

/// Insert one link per book id. Ids must already be de-duplicated.
async fn insert_links(
    txn: &DatabaseTransaction,
    coup_de_coeur_id: i32,
    book_ids: &[i32],
) -> Result<(), DomainError> {
    if book_ids.is_empty() {
        return Ok(());
    }

    validation::ensure_related_all(txn, EntityKind::Book, book_ids).await?;

    let links = book_ids.iter().map(|book_id| LinkActiveModel {
        coup_de_coeur_id: Set(coup_de_coeur_id),
        book_id: Set(*book_id),
    });
    LinkEntity::insert_many(links)
        .exec_without_returning(txn)
        .await?;

    Ok(())
}

async fn create_in(
    txn: &DatabaseTransaction,
    input: CoupDeCoeurInput,
) -> Result<CoupDeCoeur, DomainError> {
    let now = now_rfc3339();
    let model = ActiveModel {
        title: Set(input.title),
        description: Set(input.description),
        audio_path: Set(input.audio_path),
        active: Set(input.active),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    insert_links(txn, model.id, &input.book_ids).await?;
    with_books(txn, model).await
}

async fn replace_in(
    txn: &DatabaseTransaction,
    id: i32,
    input: CoupDeCoeurInput,
) -> Result<CoupDeCoeur, DomainError> {
    let existing = CoupDeCoeurEntity::find_by_id(id)
        .one(txn)
        .await?
        .ok_or_else(|| DomainError::not_found("Coup de coeur", id))?;

    // 1. Drop the previous membership
    LinkEntity::delete_many()
        .filter(coup_de_coeur_book::Column::CoupDeCoeurId.eq(id))
        .exec(txn)
        .await?;

    // 2. Scalar fields
    let mut active: ActiveModel = existing.into();
    active.title = Set(input.title);
    active.description = Set(input.description);
    active.audio_path = Set(input.audio_path);
    active.active = Set(input.active);
    active.updated_at = Set(now_rfc3339());
    let model = active.update(txn).await?;

    // 3. New membership
    insert_links(txn, id, &input.book_ids).await?;

    with_books(txn, model).await
}

async fn find_link<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    book_id: i32,
) -> Result<Option<coup_de_coeur_book::Model>, DomainError> {
    Ok(LinkEntity::find()
        .filter(coup_de_coeur_book::Column::CoupDeCoeurId.eq(id))
        .filter(coup_de_coeur_book::Column::BookId.eq(book_id))
        .one(conn)
        .await?)
}

#[async_trait]
impl CoupDeCoeurRepository for SeaOrmCoupDeCoeurRepository {
    async fn find_all(&self, active_only: bool) -> Result<Vec<CoupDeCoeur>, DomainError> {
        let mut query = CoupDeCoeurEntity::find().order_by_desc(Column::Id);
        if active_only {
            query = query.filter(Column::Active.eq(true));
        }

        let models = query.all(&self.db).await?;

        let mut result = Vec::with_capacity(models.len());
        for model in models {
            result.push(with_books(&self.db, model).await?);
        }
        Ok(result)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<CoupDeCoeur>, DomainError> {
        match CoupDeCoeurEntity::find_by_id(id).one(&self.db).await? {
            Some(model) => Ok(Some(with_books(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    async fn create(&self, input: CoupDeCoeurInput) -> Result<CoupDeCoeur, DomainError> {
        let txn = self.db.begin().await?;

        match create_in(&txn, input).await {
            Ok(created) => {
                txn.commit().await?;
                tracing::info!(
                    coup_de_coeur_id = created.id,
                    books = created.books.len(),
                    "Coup de coeur created"
                );
                Ok(created)
            }
            Err(e) => {
                txn.rollback().await?;
                Err(e)
            }
        }
    }

    async fn replace(&self, id: i32, input: CoupDeCoeurInput) -> Result<CoupDeCoeur, DomainError> {
        let txn = self.db.begin().await?;

        match replace_in(&txn, id, input).await {
            Ok(updated) => {
                txn.commit().await?;
                tracing::info!(
                    coup_de_coeur_id = id,
                    books = updated.books.len(),
                    "Coup de coeur contents replaced"
                );
                Ok(updated)
            }
            Err(e) => {
                txn.rollback().await?;
                tracing::warn!(coup_de_coeur_id = id, error = %e, "Replace rolled back");
                Err(e)
            }
        }
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = CoupDeCoeurEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Coup de coeur", id));
        }

        tracing::info!(coup_de_coeur_id = id, "Coup de coeur deleted");
        Ok(())
    }

    async fn has_book(&self, id: i32, book_id: i32) -> Result<MembershipCheck, DomainError> {
        validation::ensure_exists(&self.db, EntityKind::CoupDeCoeur, id).await?;

        let exists = find_link(&self.db, id, book_id).await?.is_some();
        Ok(MembershipCheck {
            coup_de_coeur_id: id,
            book_id,
            exists,
        })
    }

    async fn add_book(&self, id: i32, book_id: i32) -> Result<(), DomainError> {
        validation::ensure_exists(&self.db, EntityKind::CoupDeCoeur, id).await?;
        validation::ensure_related(&self.db, EntityKind::Book, book_id).await?;

        if find_link(&self.db, id, book_id).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "Book {} is already in coup de coeur {}",
                book_id, id
            )));
        }

        LinkEntity::insert(LinkActiveModel {
            coup_de_coeur_id: Set(id),
            book_id: Set(book_id),
        })
        .exec_without_returning(&self.db)
        .await?;

        tracing::info!(coup_de_coeur_id = id, book_id, "Book added to coup de coeur");
        Ok(())
    }

    async fn remove_book(&self, id: i32, book_id: i32) -> Result<(), DomainError> {
        validation::ensure_exists(&self.db, EntityKind::CoupDeCoeur, id).await?;

        let result = LinkEntity::delete_many()
            .filter(coup_de_coeur_book::Column::CoupDeCoeurId.eq(id))
            .filter(coup_de_coeur_book::Column::BookId.eq(book_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!(
                "Book {} is not in coup de coeur {}",
                book_id, id
            )));
        }

        tracing::info!(coup_de_coeur_id = id, book_id, "Book removed from coup de coeur");
        Ok(())
    }
}
