use crate::auth::subject_for;
use crate::config::AppState;
use crate::error::AppError;
use crate::models::auth_model::{AuthContext, CurrentUser};
use crate::services::auth_service::AuthService;
use crate::utils::api_response::ResponseBuilder;
use axum::{
    body::Body,
    extract::{OriginalUri, State},
    http::{header, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use casbin::CoreApi;

/// Resolves the optional bearer principal, checks the route against the
/// casbin policy and exposes the principal as an [`AuthContext`] extension.
pub async fn rbac_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    // 1. Principal (absent header means anonymous)
    let token = match bearer_token(req.headers()) {
        Ok(token) => token,
        Err(e) => return e.into_response(),
    };

    let user = match token {
        Some(token) => match AuthService::authenticate_bearer(&state.db, &state.config, &token).await {
            Ok(user) => Some(user),
            Err(e) => return e.into_response(),
        },
        None => None,
    };

    // 2. Casbin Enforce (nested routers see a stripped uri)
    let subject = subject_for(user.as_ref());
    let path = req
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.0.path().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let method = req.method().to_string();

    let decision = {
        let enforcer = state.enforcer.read().await;
        enforcer.enforce((subject, path.as_str(), method.as_str()))
    };

    match decision {
        Ok(true) => {
            // 3. Inject principal
            let context = match user {
                Some(user) => AuthContext::authenticated(CurrentUser::from(user)),
                None => AuthContext::anonymous(),
            };
            tracing::debug!(user_id = ?context.current().map(|u| u.id), %method, %path, "access granted");
            req.extensions_mut().insert(context);
            next.run(req).await
        }
        Ok(false) => {
            tracing::warn!(subject, %method, %path, "access denied");
            if user.is_none() {
                AppError::AuthenticationRequired.into_response()
            } else {
                AppError::forbidden("You do not have permission to perform this action").into_response()
            }
        }
        Err(e) => {
            tracing::error!("Casbin enforce error: {}", e);
            ResponseBuilder::error::<()>(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred during permission check",
            )
            .into_response()
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<Option<String>, AppError> {
    let Some(auth_header) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AppError::unauthorized("AUTH_INVALID_FORMAT", "Invalid Authorization header format"))?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(Some(token.trim().to_string())),
        _ => Err(AppError::unauthorized(
            "AUTH_INVALID_SCHEME",
            "Invalid token format. Missing 'Bearer ' prefix",
        )),
    }
}
