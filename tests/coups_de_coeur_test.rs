mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{TestApp, ids, setup};

async fn books(app: &TestApp, n: i32) -> Vec<i32> {
    let mut out = Vec::new();
    for i in 1..=n {
        out.push(app.insert_book(Some(i), &format!("Book {}", i)).await);
    }
    out
}

#[tokio::test]
async fn replace_swaps_membership_exactly() {
    let app = setup().await;
    let token = app.staff_token().await;
    books(&app, 3).await;

    let (status, created) = app
        .post(
            "/api/coups-de-coeur",
            &token,
            json!({ "title": "Coup 1", "bookIds": [1, 2] }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["active"], true);
    let uri = format!("/api/coups-de-coeur/{}", created["id"]);

    let (_, fetched) = app.get(&uri, &token).await;
    assert_eq!(ids(&fetched["books"]), vec![1, 2]);

    let (status, replaced) = app
        .put(&uri, &token, json!({ "title": "Coup 1", "bookIds": [2, 3] }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&replaced["books"]), vec![2, 3]);

    let (_, listed) = app.get(&format!("{}/books", uri), &token).await;
    assert_eq!(ids(&listed), vec![2, 3]);
}

#[tokio::test]
async fn replace_with_empty_list_clears_membership() {
    let app = setup().await;
    let token = app.staff_token().await;
    books(&app, 2).await;

    let (_, created) = app
        .post(
            "/api/coups-de-coeur",
            &token,
            json!({ "title": "Coup", "bookIds": [1, 2] }),
        )
        .await;
    let uri = format!("/api/coups-de-coeur/{}", created["id"]);

    let (status, body) = app
        .put(
            &uri,
            &token,
            json!({ "title": "Coup", "description": "empty now", "bookIds": [], "active": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["books"].as_array().unwrap().is_empty());
    assert_eq!(body["active"], false);
    assert_eq!(body["description"], "empty now");

    let (_, listed) = app.get(&format!("{}/books", uri), &token).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn replace_with_unknown_book_changes_nothing() {
    let app = setup().await;
    let token = app.staff_token().await;
    books(&app, 2).await;

    let (_, created) = app
        .post(
            "/api/coups-de-coeur",
            &token,
            json!({ "title": "Original", "bookIds": [1, 2] }),
        )
        .await;
    let uri = format!("/api/coups-de-coeur/{}", created["id"]);

    let (status, body) = app
        .put(&uri, &token, json!({ "title": "Renamed", "bookIds": [2, 999] }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "RELATED_RECORD_MISSING");

    let (_, after) = app.get(&uri, &token).await;
    assert_eq!(after["title"], "Original");
    assert_eq!(ids(&after["books"]), vec![1, 2]);
}

#[tokio::test]
async fn create_with_unknown_book_leaves_no_collection() {
    let app = setup().await;
    let token = app.staff_token().await;
    books(&app, 1).await;

    let (status, _) = app
        .post(
            "/api/coups-de-coeur",
            &token,
            json!({ "title": "Broken", "bookIds": [1, 50] }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, listed) = app.get("/api/coups-de-coeur", &token).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn replace_requires_title_and_book_ids() {
    let app = setup().await;
    let token = app.staff_token().await;
    let (_, created) = app
        .post("/api/coups-de-coeur", &token, json!({ "title": "T", "bookIds": [] }))
        .await;
    let uri = format!("/api/coups-de-coeur/{}", created["id"]);

    let (status, body) = app.put(&uri, &token, json!({ "bookIds": [] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "title is required");

    let (status, body) = app.put(&uri, &token, json!({ "title": "T" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bookIds is required");

    let (status, body) = app
        .put(&uri, &token, json!({ "title": "T", "bookIds": "1,2" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = app
        .put("/api/coups-de-coeur/321", &token, json!({ "title": "T", "bookIds": [] }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_book_ids_are_collapsed() {
    let app = setup().await;
    let token = app.staff_token().await;
    books(&app, 2).await;

    let (status, body) = app
        .post(
            "/api/coups-de-coeur",
            &token,
            json!({ "title": "Dups", "bookIds": [2, 1, 2, 2] }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(ids(&body["books"]), vec![1, 2]);
}

#[tokio::test]
async fn single_book_toggle() {
    let app = setup().await;
    let token = app.staff_token().await;
    books(&app, 2).await;

    let (_, created) = app
        .post("/api/coups-de-coeur", &token, json!({ "title": "T", "bookIds": [1] }))
        .await;
    let base = format!("/api/coups-de-coeur/{}", created["id"]);

    let (_, check) = app.get(&format!("{}/books/2", base), &token).await;
    assert_eq!(check["exists"], false);

    let (status, body) = app
        .post(&format!("{}/books", base), &token, json!({ "bookId": 2 }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["exists"], true);

    let (status, body) = app
        .post(&format!("{}/books/2", base), &token, json!({}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");

    let (_, check) = app.get(&format!("{}/books/2", base), &token).await;
    assert_eq!(check["exists"], true);

    let (status, _) = app.delete(&format!("{}/books/1", base), &token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.delete(&format!("{}/books/1", base), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send("DELETE", &format!("{}/books", base), Some(&token), Some(json!({ "bookId": 2 })))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app
        .post(&format!("{}/books", base), &token, json!({ "bookId": 77 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "RELATED_RECORD_MISSING");

    let (status, _) = app.get("/api/coups-de-coeur/55/books/1", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get(&format!("{}/books/zero", base), &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn active_filter_and_delete() {
    let app = setup().await;
    let token = app.staff_token().await;

    let (_, shown) = app
        .post("/api/coups-de-coeur", &token, json!({ "title": "Shown", "bookIds": [] }))
        .await;
    let (_, hidden) = app
        .post(
            "/api/coups-de-coeur",
            &token,
            json!({ "title": "Hidden", "bookIds": [], "active": false }),
        )
        .await;

    let (_, all) = app.get("/api/coups-de-coeur", &token).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, active) = app.get("/api/coups-de-coeur?active=true", &token).await;
    assert_eq!(ids(&active), vec![shown["id"].as_i64().unwrap()]);

    let (status, _) = app.get("/api/coups-de-coeur?active=maybe", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let uri = format!("/api/coups-de-coeur/{}", hidden["id"]);
    let (status, _) = app.delete(&uri, &token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.get(&uri, &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
