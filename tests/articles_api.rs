mod common;

use axum::http::{Method, StatusCode};
use common::{create_user, login, send, test_state};
use serde_json::{json, Value};

fn article_body() -> Value {
    json!({
        "title": "Test title",
        "description": "Something happened",
        "text": "Full story",
        "preview_image": "https://cdn.example.com/p.png",
        "resources": [
            { "url": "https://cdn.example.com/a.png", "type": "IMG" },
            { "url": "https://cdn.example.com/b.mp4", "type": "VIDEO" },
            { "url": "https://example.com/c", "type": "URL" }
        ]
    })
}

#[tokio::test]
async fn staff_creates_article_with_resources() {
    let state = test_state().await;
    create_user(&state.db, "editor", true).await;
    let app = newsblog::app(state);
    let token = login(&app, "editor").await;

    let (status, body) = send(&app, Method::POST, "/api/articles", Some(&token), Some(article_body())).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let data = &body["data"];
    let id = data["id"].as_i64().unwrap();
    assert_eq!(data["slug"], format!("{}-test-title", id));
    assert_eq!(data["author"]["username"], "editor");
    assert_eq!(data["comments_count"], 0);

    let types: Vec<&str> = data["resources"].as_array().unwrap().iter().map(|r| r["type"].as_str().unwrap()).collect();
    assert_eq!(types, vec!["IMG", "VID", "URL"]);
}

#[tokio::test]
async fn writes_require_the_right_role() {
    let state = test_state().await;
    create_user(&state.db, "reader", false).await;
    let app = newsblog::app(state);

    let (status, body) = send(&app, Method::POST, "/api/articles", None, Some(article_body())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "AUTH_REQUIRED");

    let token = login(&app, "reader").await;
    let (status, body) = send(&app, Method::POST, "/api/articles", Some(&token), Some(article_body())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "ACCESS_DENIED");
}

#[tokio::test]
async fn invalid_resources_are_rejected_with_paths() {
    let state = test_state().await;
    create_user(&state.db, "editor", true).await;
    let app = newsblog::app(state);
    let token = login(&app, "editor").await;

    let mut body = article_body();
    body["resources"][1]["url"] = json!("nope");
    let (status, res) = send(&app, Method::POST, "/api/articles", Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["code"], "VALIDATION_ERROR");
    assert_eq!(res["data"][0]["field"], "resources[1].url");

    let mut body = article_body();
    body["resources"][0]["type"] = json!("GIF");
    let (status, res) = send(&app, Method::POST, "/api/articles", Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["code"], "VALIDATION_ERROR");

    let (_, list) = send(&app, Method::GET, "/api/main", None, None).await;
    assert_eq!(list["data"]["meta"]["total"], 0);
}

#[tokio::test]
async fn soft_delete_hides_article() {
    let state = test_state().await;
    create_user(&state.db, "editor", true).await;
    let db = state.db.clone();
    let app = newsblog::app(state);
    let token = login(&app, "editor").await;

    let (_, created) = send(&app, Method::POST, "/api/articles", Some(&token), Some(article_body())).await;
    let slug = created["data"]["slug"].as_str().unwrap().to_string();
    let uri = format!("/api/articles/{}", slug);

    let (status, _) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ARTICLE_NOT_FOUND");

    let kept = newsblog::services::article_service::ArticleService::find_including_deleted(&db, &slug)
        .await
        .unwrap();
    assert!(kept.is_deleted);
}

#[tokio::test]
async fn patch_updates_title_slug_and_resources() {
    let state = test_state().await;
    create_user(&state.db, "editor", true).await;
    let app = newsblog::app(state);
    let token = login(&app, "editor").await;

    let (_, created) = send(&app, Method::POST, "/api/articles", Some(&token), Some(article_body())).await;
    let id = created["data"]["id"].as_i64().unwrap();
    let slug = created["data"]["slug"].as_str().unwrap().to_string();
    let first = created["data"]["resources"][0]["id"].as_i64().unwrap();
    let second = created["data"]["resources"][1]["id"].as_i64().unwrap();

    let patch = json!({
        "title": "Updated headline",
        "resources": [
            { "id": first, "url": "https://new.example.com/a.png" },
            { "id": second, "delete": "true" }
        ]
    });
    let (status, body) = send(&app, Method::PATCH, &format!("/api/articles/{}", slug), Some(&token), Some(patch)).await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let data = &body["data"];
    assert_eq!(data["slug"], format!("{}-updated-headline", id));
    assert_eq!(data["description"], "Something happened");
    let resources = data["resources"].as_array().unwrap();
    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0]["url"], "https://new.example.com/a.png");

    let (status, _) = send(&app, Method::GET, &format!("/api/articles/{}", slug), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_delete_flag_rejects_whole_update() {
    let state = test_state().await;
    create_user(&state.db, "editor", true).await;
    let app = newsblog::app(state);
    let token = login(&app, "editor").await;

    let (_, created) = send(&app, Method::POST, "/api/articles", Some(&token), Some(article_body())).await;
    let slug = created["data"]["slug"].as_str().unwrap().to_string();
    let first = created["data"]["resources"][0]["id"].as_i64().unwrap();

    for flag in [json!("maybe"), json!(2)] {
        let patch = json!({
            "resources": [
                { "id": first, "delete": flag, "url": "https://new.example.com/a.png" }
            ]
        });
        let (status, body) = send(&app, Method::PATCH, &format!("/api/articles/{}", slug), Some(&token), Some(patch)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    let (status, detail) = send(&app, Method::GET, &format!("/api/articles/{}", slug), None, None).await;
    assert_eq!(status, StatusCode::OK);
    let resources = detail["data"]["resources"].as_array().unwrap();
    assert_eq!(resources.len(), 3);
    assert_eq!(resources[0]["url"], "https://cdn.example.com/a.png");
}

#[tokio::test]
async fn comment_appears_nested_in_detail() {
    let state = test_state().await;
    create_user(&state.db, "editor", true).await;
    create_user(&state.db, "reader", false).await;
    let app = newsblog::app(state);
    let editor = login(&app, "editor").await;
    let reader = login(&app, "reader").await;

    let (_, created) = send(&app, Method::POST, "/api/articles", Some(&editor), Some(article_body())).await;
    let uri = format!("/api/articles/{}", created["data"]["slug"].as_str().unwrap());

    let comment = json!({
        "text": "Great read",
        "resources": [{ "url": "https://img.example.com/reaction.gif", "type": "IMG" }]
    });
    let (status, _) = send(&app, Method::POST, &format!("{}/add_comment", uri), None, Some(comment.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, Method::POST, &format!("{}/add_comment", uri), Some(&reader), Some(comment)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let comment_id = body["data"]["id"].as_i64().unwrap();

    let (_, detail) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(detail["data"]["comments_count"], 1);
    let nested = &detail["data"]["comments"][0];
    assert_eq!(nested["text"], "Great read");
    assert_eq!(nested["author"]["username"], "reader");
    assert_eq!(nested["resources"][0]["url"], "https://img.example.com/reaction.gif");

    // Another regular user cannot touch it, staff can
    let other = {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "username": "other", "email": "other@example.com", "password": common::PASSWORD })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        login(&app, "other").await
    };
    let comment_uri = format!("{}/comments/{}", uri, comment_id);
    let (status, _) = send(&app, Method::DELETE, &comment_uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::DELETE, &comment_uri, Some(&editor), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, detail) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(detail["data"]["comments_count"], 0);
}

#[tokio::test]
async fn main_lists_newest_first_with_pagination() {
    let state = test_state().await;
    create_user(&state.db, "editor", true).await;
    let app = newsblog::app(state);
    let token = login(&app, "editor").await;

    for title in ["One", "Two", "Three"] {
        let mut body = article_body();
        body["title"] = json!(title);
        let (status, _) = send(&app, Method::POST, "/api/articles", Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, Method::GET, "/api/main?page=1&limit=2", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["meta"]["total"], 3);
    let titles: Vec<&str> = body["data"]["data"].as_array().unwrap().iter().map(|a| a["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Three", "Two"]);
    assert!(body["data"]["data"][0].get("text").is_none());
}

#[tokio::test]
async fn out_of_range_pages_are_empty() {
    let state = test_state().await;
    create_user(&state.db, "editor", true).await;
    let app = newsblog::app(state);
    let token = login(&app, "editor").await;

    let (status, _) = send(&app, Method::POST, "/api/articles", Some(&token), Some(article_body())).await;
    assert_eq!(status, StatusCode::CREATED);

    for uri in ["/api/main?page=2&limit=10", "/api/main?page=18446744073709551615&limit=100"] {
        let (status, body) = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}: {body}");
        assert_eq!(body["data"]["meta"]["total"], 1);
        assert!(body["data"]["data"].as_array().unwrap().is_empty());
    }
}

#[tokio::test]
async fn malformed_paging_uses_the_error_envelope() {
    let app = newsblog::app(test_state().await);

    for uri in ["/api/main?page=-1", "/api/main?limit=ten"] {
        let (status, body) = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["data"][0]["field"], "query");
    }
}

#[tokio::test]
async fn health_and_unknown_routes() {
    let app = newsblog::app(test_state().await);

    let (status, body) = send(&app, Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "up");

    let (status, _) = send(&app, Method::GET, "/api/nothing-here", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn trailing_slash_redirects_when_enabled() {
    let mut state = test_state().await;
    let cfg = newsblog::config::Config {
        remove_slash: true,
        ..(*state.config).clone()
    };
    state.config = std::sync::Arc::new(cfg);
    let app = newsblog::app(state);

    let request = axum::http::Request::builder()
        .uri("/api/main/?page=2")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.clone(), request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(response.headers()["location"], "/api/main?page=2");

    let (status, _) = send(&app, Method::GET, "/api/main", None, None).await;
    assert_eq!(status, StatusCode::OK);
}
