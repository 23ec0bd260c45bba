#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use eca_admin::api;
use eca_admin::auth;
use eca_admin::db;
use eca_admin::infrastructure::AppState;
use eca_admin::models::{book, user};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
}

// Fresh in-memory database with migrations applied
pub async fn setup() -> TestApp {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let state = AppState::new(db.clone());
    let router = Router::new().nest("/api", api::api_router(state));
    TestApp { router, db }
}

impl TestApp {
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send("GET", uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send("PUT", uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send("DELETE", uri, Some(token), None).await
    }

    /// Insert a user row directly; `id` is forced when given.
    pub async fn insert_user(&self, id: Option<i32>, email: &str, role: &str) -> i32 {
        let now = chrono::Utc::now().to_rfc3339();
        let mut model = user::ActiveModel {
            email: Set(email.to_string()),
            name: Set("Test".to_string()),
            first_name: Set(Some("User".to_string())),
            password_hash: Set("hash".to_string()),
            role: Set(role.to_string()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };
        if let Some(id) = id {
            model.id = Set(id);
        }
        model.insert(&self.db).await.expect("Failed to create user").id
    }

    pub async fn insert_book(&self, id: Option<i32>, title: &str) -> i32 {
        let now = chrono::Utc::now().to_rfc3339();
        let mut model = book::ActiveModel {
            title: Set(title.to_string()),
            author: Set("Author".to_string()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };
        if let Some(id) = id {
            model.id = Set(id);
        }
        model.insert(&self.db).await.expect("Failed to create book").id
    }

    /// Staff account plus a token for it
    pub async fn staff_token(&self) -> String {
        let id = self.insert_user(None, "staff@test.local", "staff").await;
        token_for(id, "staff")
    }
}

pub fn token_for(user_id: i32, role: &str) -> String {
    auth::create_jwt(user_id, role).expect("Failed to create token")
}

pub fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|item| item["id"].as_i64().expect("id"))
        .collect()
}
