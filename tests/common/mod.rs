#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use newsblog::auth::setup_casbin;
use newsblog::config::{AppState, Config};
use newsblog::entities::user;
use newsblog::models::auth_model::CurrentUser;
use newsblog::repositories::user_repository::UserRepository;
use newsblog::services::auth_service::AuthService;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;
use tower::ServiceExt;

pub const PASSWORD: &str = "correct-horse-battery";

/// Fresh in-memory database with the schema applied. One connection, so the
/// database lives as long as the pool.
pub async fn setup_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("migrate");
    db
}

pub async fn test_state() -> AppState {
    let db = setup_db().await;
    let enforcer = setup_casbin().await.expect("casbin");
    AppState {
        db,
        config: Arc::new(Config::with_secret("sqlite::memory:", "test-secret")),
        enforcer,
    }
}

pub async fn create_user(db: &DatabaseConnection, username: &str, is_staff: bool) -> user::Model {
    let hash = AuthService::hash_password(PASSWORD).expect("hash");
    UserRepository::create(
        db,
        username.to_string(),
        format!("{}@example.com", username),
        hash,
        is_staff,
        false,
    )
    .await
    .expect("create user")
}

pub fn principal(user: &user::Model) -> CurrentUser {
    CurrentUser::from(user.clone())
}

pub async fn send(
    app: &Router,
    method: Method,
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

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Logs in through the API and returns the access token.
pub async fn login(app: &Router, login: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(serde_json::json!({ "login": login, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["data"]["access"].as_str().unwrap().to_string()
}
