//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.
//! The HTTP layer maps each variant onto a status code.

use sea_orm::{DbErr, SqlErr};

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),
    /// The addressed resource does not exist
    #[error("{0}")]
    NotFound(String),
    /// A referenced record (reader, book, status...) does not exist
    #[error("{0}")]
    RelatedMissing(String),
    /// Uniqueness violation
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    /// Database/persistence error
    #[error("Database error: {0}")]
    Database(String),
    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    pub fn not_found(entity: &str, id: i32) -> Self {
        DomainError::NotFound(format!("{} {} not found", entity, id))
    }
}

// Storage errors are classified by the SQL error discriminator so that
// constraint violations surface as conflicts or missing relations rather
// than opaque 500s.
impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                DomainError::Conflict(format!("Duplicate value: {}", detail))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                DomainError::RelatedMissing("Related record missing".to_string())
            }
            _ => match e {
                DbErr::RecordNotFound(msg) => DomainError::NotFound(msg),
                other => DomainError::Database(other.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_not_found_maps_to_not_found() {
        let err = DomainError::from(DbErr::RecordNotFound("Book 3".to_string()));
        assert!(matches!(err, DomainError::NotFound(msg) if msg == "Book 3"));
    }

    #[test]
    fn other_errors_stay_database_errors() {
        let err = DomainError::from(DbErr::Custom("boom".to_string()));
        assert!(matches!(err, DomainError::Database(_)));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn not_found_helper_names_entity_and_id() {
        assert_eq!(
            DomainError::not_found("Assignment", 42).to_string(),
            "Assignment 42 not found"
        );
    }
}
