mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{TestApp, setup};

async fn assignment_for(app: &TestApp, token: &str, reader: i32) -> i64 {
    let book = app.insert_book(None, "Book").await;
    let (status, body) = app
        .post(
            "/api/assignments",
            token,
            json!({ "readerId": reader, "catalogueId": book, "statusId": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn history_lists_every_entry_most_recent_first() {
    let app = setup().await;
    let token = app.staff_token().await;
    let first = app.insert_user(None, "a@test.local", "reader").await;
    let second = app.insert_user(None, "b@test.local", "reader").await;
    let third = app.insert_user(None, "c@test.local", "reader").await;
    let id = assignment_for(&app, &token, first).await;
    let uri = format!("/api/assignments/{}/readers", id);

    let mut recorded = Vec::new();
    for (reader, note) in [(first, "initial"), (second, "swap"), (third, "swap again")] {
        let (status, body) = app
            .post(&uri, &token, json!({ "readerId": reader, "notes": note }))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["assignmentId"], id);
        assert_eq!(body["reader"]["id"], reader);
        recorded.push(body["id"].as_i64().unwrap());
    }

    let (status, body) = app.get(&uri, &token).await;
    assert_eq!(status, StatusCode::OK);

    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["id"], *recorded.last().unwrap());
    assert_eq!(entries[0]["reader"]["id"], third);
    assert_eq!(entries[0]["notes"], "swap again");
    assert_eq!(entries[2]["reader"]["id"], first);

    let dates: Vec<&str> = entries
        .iter()
        .map(|e| e["assignedDate"].as_str().unwrap())
        .collect();
    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted);
}

#[tokio::test]
async fn recording_does_not_move_the_current_reader() {
    let app = setup().await;
    let token = app.staff_token().await;
    let original = app.insert_user(None, "a@test.local", "reader").await;
    let newcomer = app.insert_user(None, "b@test.local", "reader").await;
    let id = assignment_for(&app, &token, original).await;

    let (status, _) = app
        .post(
            &format!("/api/assignments/{}/readers", id),
            &token,
            json!({ "readerId": newcomer }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, assignment) = app.get(&format!("/api/assignments/{}", id), &token).await;
    assert_eq!(assignment["reader"]["id"], original);
}

#[tokio::test]
async fn history_of_unknown_assignment_is_not_found() {
    let app = setup().await;
    let token = app.staff_token().await;

    let (status, body) = app.get("/api/assignments/9999/readers", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = app
        .post("/api/assignments/9999/readers", &token, json!({ "readerId": 1 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn recording_validates_reader() {
    let app = setup().await;
    let token = app.staff_token().await;
    let reader = app.insert_user(None, "a@test.local", "reader").await;
    let id = assignment_for(&app, &token, reader).await;
    let uri = format!("/api/assignments/{}/readers", id);

    let (status, body) = app.post(&uri, &token, json!({ "notes": "no reader" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "readerId is required");

    let (status, body) = app.post(&uri, &token, json!({ "readerId": 4040 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "RELATED_RECORD_MISSING");

    let (_, body) = app.get(&uri, &token).await;
    assert!(body.as_array().unwrap().is_empty());
}
