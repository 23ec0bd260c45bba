mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{ids, setup};

#[tokio::test]
async fn genres_are_unique_and_sorted_by_name() {
    let app = setup().await;
    let token = app.staff_token().await;

    for name in ["Policier", "Aventure"] {
        let (status, _) = app.post("/api/genres", &token, json!({ "name": name })).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app
        .post("/api/genres", &token, json!({ "name": "Policier" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Genre 'Policier' already exists");

    let (status, _) = app.post("/api/genres", &token, json!({ "name": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = app.get("/api/genres", &token).await;
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Aventure", "Policier"]);
}

#[tokio::test]
async fn book_genres_are_replaced_and_filterable() {
    let app = setup().await;
    let token = app.staff_token().await;
    let (_, roman) = app.post("/api/genres", &token, json!({ "name": "Roman" })).await;
    let (_, histoire) = app
        .post("/api/genres", &token, json!({ "name": "Histoire" }))
        .await;

    let (status, book) = app
        .post(
            "/api/books",
            &token,
            json!({
                "title": "Notre-Dame de Paris",
                "author": "Victor Hugo",
                "durationMinutes": 1200,
                "genreIds": [roman["id"], roman["id"]]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(ids(&book["genres"]), vec![roman["id"].as_i64().unwrap()]);
    assert_eq!(book["durationMinutes"], 1200);

    let uri = format!("/api/books/{}", book["id"]);
    let (status, updated) = app
        .put(&uri, &token, json!({ "genreIds": [histoire["id"]], "narrator": "Jean" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&updated["genres"]), vec![histoire["id"].as_i64().unwrap()]);
    assert_eq!(updated["narrator"], "Jean");
    assert_eq!(updated["title"], "Notre-Dame de Paris");

    let (_, filtered) = app
        .get(&format!("/api/books?genreId={}", histoire["id"]), &token)
        .await;
    assert_eq!(ids(&filtered), vec![book["id"].as_i64().unwrap()]);

    let (_, filtered) = app
        .get(&format!("/api/books?genreId={}", roman["id"]), &token)
        .await;
    assert!(filtered.as_array().unwrap().is_empty());

    let (status, _) = app.get("/api/books?genreId=roman", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_genre_rolls_back_book_update() {
    let app = setup().await;
    let token = app.staff_token().await;
    let (_, book) = app
        .post("/api/books", &token, json!({ "title": "Before", "author": "A" }))
        .await;
    let uri = format!("/api/books/{}", book["id"]);

    let (status, body) = app
        .put(&uri, &token, json!({ "title": "After", "genreIds": [404] }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "RELATED_RECORD_MISSING");

    let (_, after) = app.get(&uri, &token).await;
    assert_eq!(after["title"], "Before");
}

#[tokio::test]
async fn book_creation_requires_title_and_author() {
    let app = setup().await;
    let token = app.staff_token().await;

    let (status, body) = app.post("/api/books", &token, json!({ "author": "A" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "title is required");

    let (status, body) = app.post("/api/books", &token, json!({ "title": "T" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "author is required");
}

#[tokio::test]
async fn assigned_book_cannot_be_deleted() {
    let app = setup().await;
    let token = app.staff_token().await;
    let reader = app.insert_user(None, "r@test.local", "reader").await;
    let book = app.insert_book(None, "Book").await;

    let (status, _) = app
        .post(
            "/api/assignments",
            &token,
            json!({ "readerId": reader, "catalogueId": book, "statusId": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.delete(&format!("/api/books/{}", book), &token).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
    assert_eq!(body["error"], format!("Book {} is still referenced", book));

    let (status, _) = app.get(&format!("/api/books/{}", book), &token).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.delete("/api/books/888", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn news_published_filter() {
    let app = setup().await;
    let token = app.staff_token().await;

    let (status, draft) = app
        .post("/api/news", &token, json!({ "title": "Draft", "content": "..." }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(draft["published"], false);

    let (_, live) = app
        .post(
            "/api/news",
            &token,
            json!({ "title": "Live", "content": "Hello", "published": true }),
        )
        .await;

    let (_, published) = app.get("/api/news?published=true", &token).await;
    assert_eq!(ids(&published), vec![live["id"].as_i64().unwrap()]);

    let (_, all) = app.get("/api/news", &token).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let uri = format!("/api/news/{}", draft["id"]);
    let (_, updated) = app.put(&uri, &token, json!({ "published": true })).await;
    assert_eq!(updated["published"], true);
    assert_eq!(updated["title"], "Draft");

    let (status, _) = app.delete(&uri, &token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn default_statuses_and_creation() {
    let app = setup().await;
    let token = app.staff_token().await;

    let (_, list) = app.get("/api/statuses", &token).await;
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["En attente", "Envoyé", "Reçu", "Retourné"]);

    let (status, created) = app
        .post("/api/statuses", &token, json!({ "name": "Perdu" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 5);

    let (status, _) = app
        .post("/api/statuses", &token, json!({ "name": "Perdu" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn orders_link_reader_and_book() {
    let app = setup().await;
    let token = app.staff_token().await;
    let reader = app.insert_user(None, "r@test.local", "reader").await;
    let book = app.insert_book(None, "Book").await;

    let (status, order) = app
        .post(
            "/api/orders",
            &token,
            json!({ "readerId": reader, "bookId": book, "orderDate": "2024-02-10" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["reader"]["id"], reader);
    assert_eq!(order["book"]["id"], book);
    assert_eq!(order["orderDate"], "2024-02-10T00:00:00Z");

    let (status, assignment) = app
        .post(
            "/api/assignments",
            &token,
            json!({
                "readerId": reader,
                "catalogueId": book,
                "statusId": 1,
                "orderId": order["id"]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(assignment["order"]["id"], order["id"]);

    let (status, _) = app
        .post("/api/orders", &token, json!({ "readerId": reader, "bookId": 999 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete(&format!("/api/orders/{}", order["id"]), &token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The assignment survives with its order link cleared
    let (_, assignment) = app
        .get(&format!("/api/assignments/{}", assignment["id"]), &token)
        .await;
    assert!(assignment["order"].is_null());
}
