mod common;

use axum::http::{Method, StatusCode};
use common::{create_user, login, send, test_state, PASSWORD};
use newsblog::entities::user;
use sea_orm::EntityTrait;
use serde_json::json;

#[tokio::test]
async fn register_then_login_by_username_or_email() {
    let state = test_state().await;
    let db = state.db.clone();
    let app = newsblog::app(state);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "username": "alice", "email": "alice@example.com", "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["username"], "alice");
    assert!(body["data"].get("password").is_none());

    let id = body["data"]["id"].as_i64().unwrap();
    let stored = user::Entity::find_by_id(id).one(&db).await.unwrap().unwrap();
    assert!(stored.last_login.is_none());
    assert!(!stored.is_staff);

    login(&app, "alice").await;
    login(&app, "alice@example.com").await;

    let stored = user::Entity::find_by_id(id).one(&db).await.unwrap().unwrap();
    assert!(stored.last_login.is_some());
}

#[tokio::test]
async fn register_rejects_duplicates_and_weak_passwords() {
    let state = test_state().await;
    create_user(&state.db, "bob", false).await;
    let app = newsblog::app(state);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "username": "bob", "email": "new@example.com", "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "AUTH_DUPLICATE_USERNAME");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "username": "carol", "email": "carol@example.com", "password": "12345" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"][0]["field"], "password");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "username": "", "email": "not-an-email", "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["data"].as_array().unwrap().iter().map(|d| d["field"].as_str().unwrap()).collect();
    assert!(fields.contains(&"username"));
    assert!(fields.contains(&"email"));
}

#[tokio::test]
async fn wrong_credentials_are_unauthorized() {
    let state = test_state().await;
    create_user(&state.db, "dave", false).await;
    let app = newsblog::app(state);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "login": "dave", "password": "not-the-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "AUTH_FAILED");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "login": "nobody", "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_issues_a_new_access_token() {
    let state = test_state().await;
    create_user(&state.db, "erin", false).await;
    let app = newsblog::app(state);

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "login": "erin", "password": PASSWORD })),
    )
    .await;
    let access = body["data"]["access"].as_str().unwrap().to_string();
    let refresh = body["data"]["refresh"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["token_type"], "Bearer");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login/refresh-token",
        None,
        Some(json!({ "refresh": refresh })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let renewed = body["data"]["access"].as_str().unwrap();
    assert_ne!(renewed, access);

    // An access token is not a refresh token
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login/refresh-token",
        None,
        Some(json!({ "refresh": access })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "TOKEN_INVALID");
}

#[tokio::test]
async fn garbage_bearer_token_is_rejected() {
    let app = newsblog::app(test_state().await);
    let (status, body) = send(&app, Method::GET, "/api/main", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn profile_is_public_and_editable_by_owner_only() {
    let state = test_state().await;
    create_user(&state.db, "frank", false).await;
    create_user(&state.db, "grace", false).await;
    let app = newsblog::app(state);

    let (status, body) = send(&app, Method::GET, "/api/user/frank", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "frank@example.com");
    assert_eq!(body["data"]["is_staff"], false);

    let grace = login(&app, "grace").await;
    let (status, _) = send(&app, Method::PATCH, "/api/user/frank", Some(&grace), Some(json!({ "email": "x@example.com" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let frank = login(&app, "frank").await;
    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/user/frank",
        Some(&frank),
        Some(json!({ "email": "frank@new.example.com", "is_staff": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["email"], "frank@new.example.com");
    assert_eq!(body["data"]["is_staff"], false);

    let (status, body) = send(&app, Method::PATCH, "/api/user/frank", Some(&frank), Some(json!({ "email": "grace@example.com" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "AUTH_DUPLICATE_EMAIL");
}

#[tokio::test]
async fn change_password_rules() {
    let state = test_state().await;
    create_user(&state.db, "heidi", false).await;
    let app = newsblog::app(state);
    let token = login(&app, "heidi").await;
    let uri = "/api/user/heidi/change_password";

    let (status, body) = send(
        &app,
        Method::POST,
        uri,
        Some(&token),
        Some(json!({ "current_password": "wrong-password", "new_password": "another-fine-phrase" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "WRONG_PASSWORD");

    let (status, _) = send(
        &app,
        Method::POST,
        uri,
        Some(&token),
        Some(json!({ "current_password": PASSWORD, "new_password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        uri,
        Some(&token),
        Some(json!({ "current_password": PASSWORD, "new_password": "short" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        uri,
        Some(&token),
        Some(json!({ "current_password": PASSWORD, "new_password": "another-fine-phrase" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Set new password.");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "login": "heidi", "password": "another-fine-phrase" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
