//! Demo data for local development (`SEED_DEMO=1`)

use sea_orm::sea_query::OnConflict;
use sea_orm::*;

use crate::auth::hash_password;
use crate::models::{book, book_genre, coup_de_coeur, coup_de_coeur_book, genre, news, user};
use crate::utils::time::now_rfc3339;

const DEMO_USERS: [(&str, &str, Option<&str>, &str, &str); 3] = [
    ("admin@eca.local", "Admin", None, "admin", "admin"),
    ("staff@eca.local", "Martin", Some("Claire"), "staff", "staff"),
    ("reader@eca.local", "Durand", Some("Paul"), "reader", "reader"),
];

const DEMO_GENRES: [&str; 3] = ["Roman", "Policier", "Histoire"];

const DEMO_BOOKS: [(&str, &str, &str); 3] = [
    ("Les Misérables", "Victor Hugo", "Roman"),
    ("Le Chien des Baskerville", "Arthur Conan Doyle", "Policier"),
    ("Le Tour du monde en quatre-vingts jours", "Jules Verne", "Roman"),
];

/// Insert demo users, genres, books, one news item and one coup de coeur.
/// Safe to run repeatedly; existing rows are left alone.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let now = now_rfc3339();

    // 1. Users
    for (email, name, first_name, role, password) in DEMO_USERS {
        let password_hash = hash_password(password).map_err(DbErr::Custom)?;
        let model = user::ActiveModel {
            email: Set(email.to_owned()),
            name: Set(name.to_owned()),
            first_name: Set(first_name.map(str::to_owned)),
            password_hash: Set(password_hash),
            role: Set(role.to_owned()),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };

        user::Entity::insert(model)
            .on_conflict(OnConflict::column(user::Column::Email).do_nothing().to_owned())
            .exec_without_returning(db)
            .await?;
    }

    // 2. Genres
    for name in DEMO_GENRES {
        let model = genre::ActiveModel {
            name: Set(name.to_owned()),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };

        genre::Entity::insert(model)
            .on_conflict(OnConflict::column(genre::Column::Name).do_nothing().to_owned())
            .exec_without_returning(db)
            .await?;
    }

    // Books have no natural key; only seed them into an empty catalogue
    if book::Entity::find().one(db).await?.is_some() {
        tracing::debug!("Catalogue already populated, skipping demo books");
        return Ok(());
    }

    // 3. Books with their genre
    let mut book_ids = Vec::new();
    for (title, author, genre_name) in DEMO_BOOKS {
        let created = book::ActiveModel {
            title: Set(title.to_owned()),
            author: Set(author.to_owned()),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        if let Some(g) = genre::Entity::find()
            .filter(genre::Column::Name.eq(genre_name))
            .one(db)
            .await?
        {
            book_genre::Entity::insert(book_genre::ActiveModel {
                book_id: Set(created.id),
                genre_id: Set(g.id),
            })
            .exec_without_returning(db)
            .await?;
        }

        book_ids.push(created.id);
    }

    // 4. News
    news::ActiveModel {
        title: Set("Bienvenue".to_owned()),
        content: Set("Le catalogue de démonstration est en ligne.".to_owned()),
        published: Set(true),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    // 5. One collection featuring the first two books
    let collection = coup_de_coeur::ActiveModel {
        title: Set("Coups de coeur de l'été".to_owned()),
        description: Set(Some("Une sélection pour les vacances".to_owned())),
        active: Set(true),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    for book_id in book_ids.into_iter().take(2) {
        coup_de_coeur_book::Entity::insert(coup_de_coeur_book::ActiveModel {
            coup_de_coeur_id: Set(collection.id),
            book_id: Set(book_id),
        })
        .exec_without_returning(db)
        .await?;
    }

    tracing::info!("Demo data seeded");
    Ok(())
}
