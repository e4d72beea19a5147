use axum::{
    extract::{State, Path},
    response::IntoResponse,
    Extension,
};
use crate::config::AppState;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::{ValidatedJson, ValidatedQuery};
use crate::services::article_service::ArticleService;
use crate::models::{auth_model::AuthContext, article_model::*};

pub async fn list_articles_handler(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<ArticleFilterParams>,
) -> impl IntoResponse {
    match ArticleService::list_articles(&state.db, params).await {
        Ok(res) => ResponseBuilder::success("ARTICLES_FETCHED", "Success", res).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_article_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    match ArticleService::get_article(&state.db, &slug).await {
        Ok(res) => ResponseBuilder::success("ARTICLE_FETCHED", "Success", res).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn create_article_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ValidatedJson(payload): ValidatedJson<CreateArticleRequest>,
) -> impl IntoResponse {
    let user = match auth.require() {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };

    match ArticleService::create_article(&state.db, user, payload).await {
        Ok(res) => ResponseBuilder::created("ARTICLE_CREATED", "Article created", res).into_response(),
        Err(e) => e.into_response(),
    }
}

// Serves both PUT and PATCH; every field is optional
pub async fn update_article_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateArticleRequest>,
) -> impl IntoResponse {
    match ArticleService::update_article(&state.db, &slug, payload).await {
        Ok(res) => ResponseBuilder::success("ARTICLE_UPDATED", "Article updated", res).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_article_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    match ArticleService::delete_article(&state.db, &slug).await {
        Ok(()) => ResponseBuilder::no_content(),
        Err(e) => e.into_response(),
    }
}
