pub mod assignments;
pub mod auth;
pub mod books;
pub mod coups_de_coeur;
pub mod error;
pub mod extract;
pub mod genre;
pub mod health;
pub mod news;
pub mod order;
pub mod status;
pub mod user;

use axum::{
    Router,
    routing::{get, post},
};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        // Users
        .route("/users", get(user::list_users).post(user::create_user))
        .route(
            "/users/:id",
            get(user::get_user)
                .put(user::update_user)
                .delete(user::delete_user),
        )
        // Genres
        .route("/genres", get(genre::list_genres).post(genre::create_genre))
        .route(
            "/genres/:id",
            get(genre::get_genre)
                .put(genre::update_genre)
                .delete(genre::delete_genre),
        )
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // News
        .route("/news", get(news::list_news).post(news::create_news))
        .route(
            "/news/:id",
            get(news::get_news)
                .put(news::update_news)
                .delete(news::delete_news),
        )
        // Statuses
        .route(
            "/statuses",
            get(status::list_statuses).post(status::create_status),
        )
        // Orders
        .route("/orders", get(order::list_orders).post(order::create_order))
        .route(
            "/orders/:id",
            get(order::get_order).delete(order::delete_order),
        )
        // Assignments
        .route(
            "/assignments",
            get(assignments::list_assignments).post(assignments::create_assignment),
        )
        .route(
            "/assignments/:id",
            get(assignments::get_assignment)
                .put(assignments::update_assignment)
                .delete(assignments::delete_assignment),
        )
        .route(
            "/assignments/:id/readers",
            get(assignments::list_readers).post(assignments::record_reader),
        )
        // Coups de coeur
        .route(
            "/coups-de-coeur",
            get(coups_de_coeur::list_coups_de_coeur).post(coups_de_coeur::create_coup_de_coeur),
        )
        .route(
            "/coups-de-coeur/:id",
            get(coups_de_coeur::get_coup_de_coeur)
                .put(coups_de_coeur::replace_coup_de_coeur)
                .delete(coups_de_coeur::delete_coup_de_coeur),
        )
        .route(
            "/coups-de-coeur/:id/books",
            get(coups_de_coeur::list_books)
                .post(coups_de_coeur::add_book)
                .delete(coups_de_coeur::remove_book),
        )
        .route(
            "/coups-de-coeur/:id/books/:book_id",
            get(coups_de_coeur::check_book)
                .post(coups_de_coeur::add_book_by_path)
                .delete(coups_de_coeur::remove_book_by_path),
        )
        .with_state(state)
}
