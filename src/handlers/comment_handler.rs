use axum::{
    extract::{State, Path},
    response::IntoResponse,
    Extension,
};
use crate::config::AppState;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedJson;
use crate::services::comment_service::CommentService;
use crate::models::{auth_model::AuthContext, article_model::{CreateCommentRequest, UpdateCommentRequest}};

pub async fn add_comment_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(slug): Path<String>,
    ValidatedJson(payload): ValidatedJson<CreateCommentRequest>,
) -> impl IntoResponse {
    let user = match auth.require() {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };

    match CommentService::add_comment(&state.db, &slug, user, payload).await {
        Ok(res) => ResponseBuilder::created("COMMENT_CREATED", "Comment added", res).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_comment_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((slug, comment_id)): Path<(String, i64)>,
    ValidatedJson(payload): ValidatedJson<UpdateCommentRequest>,
) -> impl IntoResponse {
    let user = match auth.require() {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };

    match CommentService::update_comment(&state.db, &slug, comment_id, user, payload).await {
        Ok(res) => ResponseBuilder::success("COMMENT_UPDATED", "Comment updated", res).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_comment_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((slug, comment_id)): Path<(String, i64)>,
) -> impl IntoResponse {
    let user = match auth.require() {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };

    match CommentService::delete_comment(&state.db, &slug, comment_id, user).await {
        Ok(()) => ResponseBuilder::no_content(),
        Err(e) => e.into_response(),
    }
}
