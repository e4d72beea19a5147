use crate::config::AppState;
use crate::handlers::{article_handler::list_articles_handler, health_check_handler};
use crate::middleware::{auth_middleware::rbac_middleware, trailing_slash::remove_trailing_slash};
use axum::http::{HeaderValue, Method};
use axum::{middleware, routing::get, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod article_route;
pub mod auth_route;
pub mod user_route;

pub fn create_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_route::auth_routes())
        .nest("/api/user", user_route::user_routes())
        .nest("/api/articles", article_route::article_routes())
        .route("/api/main", get(list_articles_handler))
        // Health check
        .route("/api/health", get(health_check_handler))
        // Only matched routes go through the permission check; unknown paths stay 404
        .route_layer(middleware::from_fn_with_state(state.clone(), rbac_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), remove_trailing_slash))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors_allowed_origins))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_origin(allow_origin)
        .allow_headers(Any)
}
