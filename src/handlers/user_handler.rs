use axum::{
    extract::{State, Path},
    response::IntoResponse,
    Extension,
};
use crate::config::AppState;
use crate::models::{auth_model::AuthContext, user_model::{ChangePasswordRequest, UpdateUserRequest}};
use crate::services::user_service::UserService;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::validated_wrapper::ValidatedJson;

pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> impl IntoResponse {
    match UserService::get_profile(&state.db, &username).await {
        Ok(profile) => ResponseBuilder::success("USER_FETCHED", "Success", profile).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_user_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(username): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> impl IntoResponse {
    let user = match auth.require() {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };

    match UserService::update_user(&state.db, &username, user, payload).await {
        Ok(profile) => ResponseBuilder::success("USER_UPDATED", "Profile updated", profile).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn change_password_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(username): Path<String>,
    ValidatedJson(payload): ValidatedJson<ChangePasswordRequest>,
) -> impl IntoResponse {
    let user = match auth.require() {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };

    match UserService::change_password(&state.db, &username, user, payload).await {
        Ok(()) => ResponseBuilder::success("PASSWORD_CHANGED", "Set new password.", ()).into_response(),
        Err(e) => e.into_response(),
    }
}
