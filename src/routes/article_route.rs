use axum::{routing::{get, post, put}, Router};
use crate::config::AppState;
use crate::handlers::{article_handler::*, comment_handler::*};

pub fn article_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_article_handler))
        .route(
            "/{slug}",
            get(get_article_handler)
                .put(update_article_handler)
                .patch(update_article_handler)
                .delete(delete_article_handler),
        )
        .route("/{slug}/add_comment", post(add_comment_handler))
        .route(
            "/{slug}/comments/{comment_id}",
            put(update_comment_handler)
                .patch(update_comment_handler)
                .delete(delete_comment_handler),
        )
}
