//! SeaORM implementation of BookRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
    TransactionTrait,
};

use crate::domain::{
    Book, BookFilter, BookRepository, CreateBookInput, DomainError, GenreSummary, UpdateBookInput,
};
use crate::models::book::{ActiveModel, Column, Entity as BookEntity, Model};
use crate::models::book_genre::{self, ActiveModel as BookGenreActiveModel};
use crate::models::genre;
use crate::services::validation::{self, EntityKind};
use crate::utils::time::now_rfc3339;

use super::{Referent, ensure_unreferenced, still_referenced};

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Attach genres to each book, one query for links and one for genres.
async fn with_genres<C: ConnectionTrait>(
    conn: &C,
    books: Vec<Model>,
) -> Result<Vec<Book>, DomainError> {
    if books.is_empty() {
        return Ok(Vec::new());
    }

    let book_ids: Vec<i32> = books.iter().map(|b| b.id).collect();
    let links = book_genre::Entity::find()
        .filter(book_genre::Column::BookId.is_in(book_ids))
        .all(conn)
        .await?;

    let genre_ids: Vec<i32> = links.iter().map(|l| l.genre_id).collect();
    let genres: HashMap<i32, genre::Model> = if genre_ids.is_empty() {
        HashMap::new()
    } else {
        genre::Entity::find()
            .filter(genre::Column::Id.is_in(genre_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|g| (g.id, g))
            .collect()
    };

    let mut by_book: HashMap<i32, Vec<GenreSummary>> = HashMap::new();
    for link in links {
        if let Some(g) = genres.get(&link.genre_id) {
            by_book
                .entry(link.book_id)
                .or_default()
                .push(GenreSummary::from(g.clone()));
        }
    }

    Ok(books
        .into_iter()
        .map(|b| {
            let mut genres = by_book.remove(&b.id).unwrap_or_default();
            genres.sort_by(|a, z| a.name.cmp(&z.name));
            Book {
                id: b.id,
                title: b.title,
                author: b.author,
                narrator: b.narrator,
                summary: b.summary,
                isbn: b.isbn,
                duration_minutes: b.duration_minutes,
                cover_path: b.cover_path,
                audio_path: b.audio_path,
                genres,
                created_at: b.created_at,
                updated_at: b.updated_at,
            }
        })
        .collect())
}

async fn load_one<C: ConnectionTrait>(conn: &C, model: Model) -> Result<Book, DomainError> {
    let id = model.id;
    with_genres(conn, vec![model])
        .await?
        .pop()
        .ok_or_else(|| DomainError::Internal(format!("Book {} could not be loaded", id)))
}

/// Swap the genre links of a book for exactly `genre_ids`.
async fn set_genres(
    txn: &DatabaseTransaction,
    book_id: i32,
    genre_ids: &[i32],
) -> Result<(), DomainError> {
    book_genre::Entity::delete_many()
        .filter(book_genre::Column::BookId.eq(book_id))
        .exec(txn)
        .await?;

    if genre_ids.is_empty() {
        return Ok(());
    }

    validation::ensure_related_all(txn, EntityKind::Genre, genre_ids).await?;

    let links = genre_ids.iter().map(|genre_id| BookGenreActiveModel {
        book_id: Set(book_id),
        genre_id: Set(*genre_id),
    });
    book_genre::Entity::insert_many(links)
        .exec_without_returning(txn)
        .await?;

    Ok(())
}

async fn create_in(txn: &DatabaseTransaction, input: CreateBookInput) -> Result<Book, DomainError> {
    let now = now_rfc3339();
    let model = ActiveModel {
        title: Set(input.title),
        author: Set(input.author),
        narrator: Set(input.narrator),
        summary: Set(input.summary),
        isbn: Set(input.isbn),
        duration_minutes: Set(input.duration_minutes),
        cover_path: Set(input.cover_path),
        audio_path: Set(input.audio_path),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    set_genres(txn, model.id, &input.genre_ids).await?;
    load_one(txn, model).await
}

async fn update_in(
    txn: &DatabaseTransaction,
    id: i32,
    input: UpdateBookInput,
) -> Result<Book, DomainError> {
    let existing = BookEntity::find_by_id(id)
        .one(txn)
        .await?
        .ok_or_else(|| DomainError::not_found("Book", id))?;

    let mut active: ActiveModel = existing.into();

    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(author) = input.author {
        active.author = Set(author);
    }
    if let Some(narrator) = input.narrator {
        active.narrator = Set(narrator);
    }
    if let Some(summary) = input.summary {
        active.summary = Set(summary);
    }
    if let Some(isbn) = input.isbn {
        active.isbn = Set(isbn);
    }
    if let Some(duration) = input.duration_minutes {
        active.duration_minutes = Set(duration);
    }
    if let Some(path) = input.cover_path {
        active.cover_path = Set(path);
    }
    if let Some(path) = input.audio_path {
        active.audio_path = Set(path);
    }
    active.updated_at = Set(now_rfc3339());

    let model = active.update(txn).await?;

    if let Some(genre_ids) = input.genre_ids {
        set_genres(txn, id, &genre_ids).await?;
    }

    load_one(txn, model).await
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_all(&self, filter: BookFilter) -> Result<Vec<Book>, DomainError> {
        let mut query = BookEntity::find();

        if let Some(genre_id) = filter.genre_id {
            query = query
                .join(JoinType::InnerJoin, book_genre::Relation::Book.def().rev())
                .filter(book_genre::Column::GenreId.eq(genre_id));
        }

        let books = query.order_by_asc(Column::Title).all(&self.db).await?;
        with_genres(&self.db, books).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError> {
        match BookEntity::find_by_id(id).one(&self.db).await? {
            Some(model) => Ok(Some(load_one(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    async fn create(&self, input: CreateBookInput) -> Result<Book, DomainError> {
        let txn = self.db.begin().await?;

        match create_in(&txn, input).await {
            Ok(book) => {
                txn.commit().await?;
                tracing::info!(book_id = book.id, title = %book.title, "Book created");
                Ok(book)
            }
            Err(e) => {
                txn.rollback().await?;
                Err(e)
            }
        }
    }

    async fn update(&self, id: i32, input: UpdateBookInput) -> Result<Book, DomainError> {
        let txn = self.db.begin().await?;

        match update_in(&txn, id, input).await {
            Ok(book) => {
                txn.commit().await?;
                tracing::info!(book_id = id, "Book updated");
                Ok(book)
            }
            Err(e) => {
                txn.rollback().await?;
                Err(e)
            }
        }
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        ensure_unreferenced(&self.db, Referent::Book, "Book", id).await?;

        let result = BookEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| still_referenced(e, "Book", id))?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Book", id));
        }

        tracing::info!(book_id = id, "Book deleted");
        Ok(())
    }
}
