pub mod assignment;
pub mod assignment_reader;
pub mod book;
pub mod book_genre;
pub mod coup_de_coeur;
pub mod coup_de_coeur_book;
pub mod genre;
pub mod news;
pub mod order;
pub mod status;
pub mod user;
