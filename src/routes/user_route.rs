use axum::{routing::{get, post}, Router};
use crate::config::AppState;
use crate::handlers::user_handler::*;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{username}",
            get(get_user_handler)
                .put(update_user_handler)
                .patch(update_user_handler),
        )
        .route("/{username}/change_password", post(change_password_handler))
}
