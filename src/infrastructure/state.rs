//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{
    AssignmentReaderRepository, AssignmentRepository, BookRepository, CoupDeCoeurRepository,
    GenreRepository, NewsRepository, OrderRepository, StatusRepository, UserRepository,
};
use crate::infrastructure::{
    SeaOrmAssignmentReaderRepository, SeaOrmAssignmentRepository, SeaOrmBookRepository,
    SeaOrmCoupDeCoeurRepository, SeaOrmGenreRepository, SeaOrmNewsRepository,
    SeaOrmOrderRepository, SeaOrmStatusRepository, SeaOrmUserRepository,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub assignment_repo: Arc<dyn AssignmentRepository>,
    /// Reader history of assignments
    pub history_repo: Arc<dyn AssignmentReaderRepository>,
    pub coup_de_coeur_repo: Arc<dyn CoupDeCoeurRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub genre_repo: Arc<dyn GenreRepository>,
    pub book_repo: Arc<dyn BookRepository>,
    pub news_repo: Arc<dyn NewsRepository>,
    pub status_repo: Arc<dyn StatusRepository>,
    pub order_repo: Arc<dyn OrderRepository>,
}

impl AppState {
    /// Create a new AppState with all repositories sharing one connection pool
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            assignment_repo: Arc::new(SeaOrmAssignmentRepository::new(db.clone())),
            history_repo: Arc::new(SeaOrmAssignmentReaderRepository::new(db.clone())),
            coup_de_coeur_repo: Arc::new(SeaOrmCoupDeCoeurRepository::new(db.clone())),
            user_repo: Arc::new(SeaOrmUserRepository::new(db.clone())),
            genre_repo: Arc::new(SeaOrmGenreRepository::new(db.clone())),
            book_repo: Arc::new(SeaOrmBookRepository::new(db.clone())),
            news_repo: Arc::new(SeaOrmNewsRepository::new(db.clone())),
            status_repo: Arc::new(SeaOrmStatusRepository::new(db.clone())),
            order_repo: Arc::new(SeaOrmOrderRepository::new(db)),
        }
    }
}
