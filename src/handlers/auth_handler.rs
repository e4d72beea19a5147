use axum::{
    extract::State,
    response::IntoResponse,
};
use crate::config::AppState;
use crate::models::auth_model::{LoginRequest, RefreshTokenRequest, RegisterRequest};
use crate::services::auth_service::AuthService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedJson;

// 1. HANDLER REGISTER
pub async fn register_user_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> impl IntoResponse {
    match AuthService::register_user(&state.db, payload).await {
        Ok(user) => ResponseBuilder::created(
            "AUTH_REGISTER_SUCCESS",
            "User registered successfully",
            user,
        ).into_response(),
        Err(e) => e.into_response(),
    }
}

// 2. HANDLER LOGIN
pub async fn login_user_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> impl IntoResponse {
    match AuthService::login_user(&state.db, &state.config, payload).await {
        Ok(tokens) => ResponseBuilder::success("AUTH_LOGIN_SUCCESS", "Login successful", tokens).into_response(),
        Err(e) => e.into_response(),
    }
}

// 3. HANDLER REFRESH
pub async fn refresh_token_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefreshTokenRequest>,
) -> impl IntoResponse {
    match AuthService::refresh_token(&state.db, &state.config, payload).await {
        Ok(res) => ResponseBuilder::success("AUTH_REFRESH_SUCCESS", "Token refreshed", res).into_response(),
        Err(e) => e.into_response(),
    }
}
