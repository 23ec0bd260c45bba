mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{ids, setup};

#[tokio::test]
async fn create_assignment_returns_joined_reader_and_catalogue() {
    let app = setup().await;
    let token = app.staff_token().await;
    app.insert_user(Some(5), "reader5@test.local", "reader").await;
    app.insert_book(Some(10), "Le Petit Prince").await;

    let (status, body) = app
        .post(
            "/api/assignments",
            &token,
            json!({ "readerId": 5, "catalogueId": 10, "statusId": 1 }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["reader"]["id"], 5);
    assert_eq!(body["catalogue"]["id"], 10);
    assert_eq!(body["catalogue"]["title"], "Le Petit Prince");
    assert_eq!(body["status"]["name"], "En attente");
    assert!(body["order"].is_null());
    assert!(body["returnedToECADate"].is_null());
}

#[tokio::test]
async fn create_assignment_names_each_missing_required_field() {
    let app = setup().await;
    let token = app.staff_token().await;

    let cases = [
        (json!({ "catalogueId": 1, "statusId": 1 }), "readerId"),
        (json!({ "readerId": 1, "statusId": 1 }), "catalogueId"),
        (json!({ "readerId": 1, "catalogueId": 1 }), "statusId"),
    ];

    for (payload, field) in cases {
        let (status, body) = app.post("/api/assignments", &token, payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"], format!("{} is required", field));
    }
}

#[tokio::test]
async fn create_assignment_with_unknown_reader_is_related_missing() {
    let app = setup().await;
    let token = app.staff_token().await;
    let book_id = app.insert_book(None, "Book").await;

    let (status, body) = app
        .post(
            "/api/assignments",
            &token,
            json!({ "readerId": 999, "catalogueId": book_id, "statusId": 1 }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "RELATED_RECORD_MISSING");
    assert!(body["error"].as_str().unwrap().contains("Reader 999"));
}

#[tokio::test]
async fn create_assignment_rejects_malformed_date() {
    let app = setup().await;
    let token = app.staff_token().await;
    let reader = app.insert_user(None, "r@test.local", "reader").await;
    let book = app.insert_book(None, "Book").await;

    let (status, body) = app
        .post(
            "/api/assignments",
            &token,
            json!({
                "readerId": reader,
                "catalogueId": book,
                "statusId": 1,
                "receptionDate": "12/03/2024"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("receptionDate"));
}

#[tokio::test]
async fn get_by_query_id_and_missing_assignment() {
    let app = setup().await;
    let token = app.staff_token().await;
    let reader = app.insert_user(None, "r@test.local", "reader").await;
    let book = app.insert_book(None, "Book").await;

    let (_, created) = app
        .post(
            "/api/assignments",
            &token,
            json!({ "readerId": reader, "catalogueId": book, "statusId": 2 }),
        )
        .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = app.get(&format!("/api/assignments?id={}", id), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["status"]["name"], "Envoyé");

    let (status, body) = app.get("/api/assignments?id=4242", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Assignment not found");

    let (status, _) = app.get("/api/assignments?id=abc", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get("/api/assignments/abc", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_is_newest_first() {
    let app = setup().await;
    let token = app.staff_token().await;
    let reader = app.insert_user(None, "r@test.local", "reader").await;
    let book = app.insert_book(None, "Book").await;

    let mut created = Vec::new();
    for _ in 0..3 {
        let (_, body) = app
            .post(
                "/api/assignments",
                &token,
                json!({ "readerId": reader, "catalogueId": book, "statusId": 1 }),
            )
            .await;
        created.push(body["id"].as_i64().unwrap());
    }
    created.reverse();

    let (status, body) = app.get("/api/assignments", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), created);
}

#[tokio::test]
async fn partial_update_sets_and_clears_fields() {
    let app = setup().await;
    let token = app.staff_token().await;
    let reader = app.insert_user(None, "r@test.local", "reader").await;
    let other_reader = app.insert_user(None, "r2@test.local", "reader").await;
    let book = app.insert_book(None, "Book").await;

    let (_, created) = app
        .post(
            "/api/assignments",
            &token,
            json!({
                "readerId": reader,
                "catalogueId": book,
                "statusId": 1,
                "receptionDate": "2024-03-01",
                "notes": "first"
            }),
        )
        .await;
    let uri = format!("/api/assignments/{}", created["id"]);
    assert_eq!(created["receptionDate"], "2024-03-01T00:00:00Z");

    let (status, body) = app
        .put(
            &uri,
            &token,
            json!({
                "readerId": other_reader,
                "statusId": 3,
                "receptionDate": null,
                "sentToReaderDate": "2024-03-02T09:00:00+01:00"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reader"]["id"], other_reader);
    assert_eq!(body["status"]["name"], "Reçu");
    assert!(body["receptionDate"].is_null());
    assert_eq!(body["sentToReaderDate"], "2024-03-02T08:00:00Z");
    // Absent keys are left untouched
    assert_eq!(body["notes"], "first");
    assert_eq!(body["catalogue"]["id"], book);

    let (status, body) = app.put(&uri, &token, json!({ "statusId": 99 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "RELATED_RECORD_MISSING");

    let (status, _) = app
        .put("/api/assignments/777", &token, json!({ "notes": "x" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_keeps_reader_history() {
    let app = setup().await;
    let token = app.staff_token().await;
    let reader = app.insert_user(None, "r@test.local", "reader").await;
    let book = app.insert_book(None, "Book").await;

    let (_, created) = app
        .post(
            "/api/assignments",
            &token,
            json!({ "readerId": reader, "catalogueId": book, "statusId": 1 }),
        )
        .await;
    let id = created["id"].as_i64().unwrap();

    let (status, _) = app
        .post(
            &format!("/api/assignments/{}/readers", id),
            &token,
            json!({ "readerId": reader }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.delete(&format!("/api/assignments/{}", id), &token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.delete(&format!("/api/assignments/{}", id), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    use eca_admin::models::assignment_reader;
    use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
    let remaining = assignment_reader::Entity::find()
        .filter(assignment_reader::Column::AssignmentId.eq(id as i32))
        .all(&app.db)
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
}
