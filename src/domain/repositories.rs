//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::types::{
    Assignment, AssignmentReaderEntry, Book, CoupDeCoeur, Genre, MembershipCheck, News, Order,
    Role, Status, User,
};
use super::DomainError;

/// Input for creating an assignment. Dates are already normalized to RFC 3339.
#[derive(Debug, Clone)]
pub struct CreateAssignmentInput {
    pub reader_id: i32,
    pub catalogue_id: i32,
    pub order_id: Option<i32>,
    pub reception_date: Option<String>,
    pub sent_to_reader_date: Option<String>,
    pub returned_to_eca_date: Option<String>,
    pub status_id: i32,
    pub notes: Option<String>,
}

/// Partial assignment update. The outer `Option` is "field supplied",
/// the inner one (where present) is "set or clear".
#[derive(Debug, Clone, Default)]
pub struct UpdateAssignmentInput {
    pub reader_id: Option<i32>,
    pub catalogue_id: Option<i32>,
    pub order_id: Option<Option<i32>>,
    pub reception_date: Option<Option<String>>,
    pub sent_to_reader_date: Option<Option<String>>,
    pub returned_to_eca_date: Option<Option<String>>,
    pub status_id: Option<i32>,
    pub notes: Option<Option<String>>,
}

/// Repository trait for Assignment entity
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// All assignments, newest id first
    async fn find_all(&self) -> Result<Vec<Assignment>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Assignment>, DomainError>;

    async fn create(&self, input: CreateAssignmentInput) -> Result<Assignment, DomainError>;

    async fn update(&self, id: i32, input: UpdateAssignmentInput)
    -> Result<Assignment, DomainError>;

    /// Removes the assignment only; its reader history is kept.
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

#[derive(Debug, Clone)]
pub struct RecordReaderInput {
    pub reader_id: i32,
    pub notes: Option<String>,
}

/// Append-only reader history of assignments
#[async_trait]
pub trait AssignmentReaderRepository: Send + Sync {
    /// History of an assignment, most recent first
    async fn list_for_assignment(
        &self,
        assignment_id: i32,
    ) -> Result<Vec<AssignmentReaderEntry>, DomainError>;

    /// Append a new entry stamped with the current time. Does not touch the
    /// assignment's own reader.
    async fn record(
        &self,
        assignment_id: i32,
        input: RecordReaderInput,
    ) -> Result<AssignmentReaderEntry, DomainError>;
}

/// Scalar fields plus the complete desired book membership of a collection.
#[derive(Debug, Clone)]
pub struct CoupDeCoeurInput {
    pub title: String,
    pub description: Option<String>,
    pub audio_path: Option<String>,
    pub active: bool,
    pub book_ids: Vec<i32>,
}

/// Repository trait for curated collections and their book membership
#[async_trait]
pub trait CoupDeCoeurRepository: Send + Sync {
    async fn find_all(&self, active_only: bool) -> Result<Vec<CoupDeCoeur>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<CoupDeCoeur>, DomainError>;

    async fn create(&self, input: CoupDeCoeurInput) -> Result<CoupDeCoeur, DomainError>;

    /// Replace scalar fields and the whole membership atomically.
    async fn replace(&self, id: i32, input: CoupDeCoeurInput) -> Result<CoupDeCoeur, DomainError>;

    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    async fn has_book(&self, id: i32, book_id: i32) -> Result<MembershipCheck, DomainError>;

    async fn add_book(&self, id: i32, book_id: i32) -> Result<(), DomainError>;

    async fn remove_book(&self, id: i32, book_id: i32) -> Result<(), DomainError>;
}

#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub email: String,
    pub name: String,
    pub first_name: Option<String>,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    pub email: Option<String>,
    pub name: Option<String>,
    pub first_name: Option<Option<String>>,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
}

/// Repository trait for User entity
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError>;

    /// User plus stored password hash, for login
    async fn find_credentials(&self, email: &str)
    -> Result<Option<(User, String)>, DomainError>;

    async fn create(&self, input: CreateUserInput) -> Result<User, DomainError>;

    async fn update(&self, id: i32, input: UpdateUserInput) -> Result<User, DomainError>;

    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Repository trait for Genre entity
#[async_trait]
pub trait GenreRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Genre>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>, DomainError>;

    async fn create(&self, name: String) -> Result<Genre, DomainError>;

    async fn update(&self, id: i32, name: String) -> Result<Genre, DomainError>;

    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Filter criteria for book queries
#[derive(Debug, Default, Clone)]
pub struct BookFilter {
    pub genre_id: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct CreateBookInput {
    pub title: String,
    pub author: String,
    pub narrator: Option<String>,
    pub summary: Option<String>,
    pub isbn: Option<String>,
    pub duration_minutes: Option<i32>,
    pub cover_path: Option<String>,
    pub audio_path: Option<String>,
    pub genre_ids: Vec<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateBookInput {
    pub title: Option<String>,
    pub author: Option<String>,
    pub narrator: Option<Option<String>>,
    pub summary: Option<Option<String>>,
    pub isbn: Option<Option<String>>,
    pub duration_minutes: Option<Option<i32>>,
    pub cover_path: Option<Option<String>>,
    pub audio_path: Option<Option<String>>,
    /// When present, replaces the book's genres entirely
    pub genre_ids: Option<Vec<i32>>,
}

/// Repository trait for Book entity
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn find_all(&self, filter: BookFilter) -> Result<Vec<Book>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError>;

    async fn create(&self, input: CreateBookInput) -> Result<Book, DomainError>;

    async fn update(&self, id: i32, input: UpdateBookInput) -> Result<Book, DomainError>;

    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

#[derive(Debug, Clone)]
pub struct CreateNewsInput {
    pub title: String,
    pub content: String,
    pub published: bool,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateNewsInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
}

/// Repository trait for News entity
#[async_trait]
pub trait NewsRepository: Send + Sync {
    async fn find_all(&self, published_only: bool) -> Result<Vec<News>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<News>, DomainError>;

    async fn create(&self, input: CreateNewsInput) -> Result<News, DomainError>;

    async fn update(&self, id: i32, input: UpdateNewsInput) -> Result<News, DomainError>;

    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Repository trait for Status entity
#[async_trait]
pub trait StatusRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Status>, DomainError>;

    async fn create(&self, name: String) -> Result<Status, DomainError>;
}

#[derive(Debug, Clone)]
pub struct CreateOrderInput {
    pub reader_id: i32,
    pub book_id: i32,
    pub order_date: String,
    pub notes: Option<String>,
}

/// Repository trait for Order entity
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Order>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, DomainError>;

    async fn create(&self, input: CreateOrderInput) -> Result<Order, DomainError>;

    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}
