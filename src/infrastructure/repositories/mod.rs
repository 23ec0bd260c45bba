//! Repository implementations using SeaORM

pub mod assignment_reader_repository;
pub mod assignment_repository;
pub mod book_repository;
pub mod coup_de_coeur_repository;
pub mod genre_repository;
pub mod news_repository;
pub mod order_repository;
pub mod status_repository;
pub mod user_repository;

pub use assignment_reader_repository::SeaOrmAssignmentReaderRepository;
pub use assignment_repository::SeaOrmAssignmentRepository;
pub use book_repository::SeaOrmBookRepository;
pub use coup_de_coeur_repository::SeaOrmCoupDeCoeurRepository;
pub use genre_repository::SeaOrmGenreRepository;
pub use news_repository::SeaOrmNewsRepository;
pub use order_repository::SeaOrmOrderRepository;
pub use status_repository::SeaOrmStatusRepository;
pub use user_repository::SeaOrmUserRepository;

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, SqlErr};

use crate::domain::DomainError;
use crate::models::{assignment, assignment_reader};

/// Rows that keep a user or book from being deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Referent {
    Reader,
    Book,
}

/// Refuse the delete up front when assignments or reader history still
/// point at the row.
pub(crate) async fn ensure_unreferenced<C: ConnectionTrait>(
    conn: &C,
    referent: Referent,
    entity: &str,
    id: i32,
) -> Result<(), DomainError> {
    let assignments = match referent {
        Referent::Reader => assignment::Column::ReaderId,
        Referent::Book => assignment::Column::CatalogueId,
    };
    let mut references = assignment::Entity::find()
        .filter(assignments.eq(id))
        .count(conn)
        .await?;

    if referent == Referent::Reader {
        references += assignment_reader::Entity::find()
            .filter(assignment_reader::Column::ReaderId.eq(id))
            .count(conn)
            .await?;
    }

    if references > 0 {
        tracing::warn!(entity, id, references, "Delete refused, row still referenced");
        return Err(conflict(entity, id));
    }
    Ok(())
}

fn conflict(entity: &str, id: i32) -> DomainError {
    DomainError::Conflict(format!("{} {} is still referenced", entity, id))
}

/// Map a delete refused by a RESTRICT foreign key to a conflict.
///
/// SQLite reports RESTRICT as a trigger constraint (extended code 1811),
/// which `sql_err()` does not classify, so the message is matched too.
pub(crate) fn still_referenced(err: DbErr, entity: &str, id: i32) -> DomainError {
    let restricted = matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
        || err.to_string().contains("FOREIGN KEY constraint failed");

    if restricted {
        conflict(entity, id)
    } else {
        DomainError::from(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restrict_failure_becomes_conflict() {
        let err = DbErr::Custom("FOREIGN KEY constraint failed".to_string());
        let mapped = still_referenced(err, "User", 4);
        assert!(matches!(&mapped, DomainError::Conflict(msg) if msg == "User 4 is still referenced"));
    }

    #[test]
    fn unrelated_failure_is_left_alone() {
        let err = DbErr::Custom("disk I/O error".to_string());
        assert!(matches!(
            still_referenced(err, "Book", 2),
            DomainError::Database(_)
        ));
    }
}
