pub mod auth;
pub mod config;
pub mod entities;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod seeders;
pub mod services;
pub mod utils;

use axum::Router;
use config::AppState;

/// The full application router with state applied.
pub fn app(state: AppState) -> Router {
    routes::create_routes(state.clone()).with_state(state)
}
