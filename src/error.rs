use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use thiserror::Error;

use crate::utils::api_response::{ResponseBuilder, ValidationErrorDetail};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(Vec<ValidationErrorDetail>),

    #[error("{message}")]
    NotFound { code: &'static str, message: String },

    #[error("authentication credentials were not provided")]
    AuthenticationRequired,

    #[error("{message}")]
    Unauthorized { code: &'static str, message: String },

    #[error("{message}")]
    PermissionDenied { code: &'static str, message: String },

    #[error("{message}")]
    Conflict { code: &'static str, message: String },

    /// Collaborator misuse; never caused by user input.
    #[error("programming error: {0}")]
    Programming(String),

    #[error(transparent)]
    Database(#[from] DbErr),

    #[error("password hashing failed: {0}")]
    PasswordHash(argon2::password_hash::Error),

    #[error(transparent)]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        AppError::NotFound { code, message: message.into() }
    }

    pub fn unauthorized(code: &'static str, message: impl Into<String>) -> Self {
        AppError::Unauthorized { code, message: message.into() }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        AppError::Conflict { code, message: message.into() }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        AppError::PermissionDenied { code: "ACCESS_DENIED", message: message.into() }
    }

    pub fn forbidden_with(code: &'static str, message: impl Into<String>) -> Self {
        AppError::PermissionDenied { code, message: message.into() }
    }

    /// Single-field validation failure.
    pub fn invalid_field(field: &str, title: &str, message: &str) -> Self {
        AppError::Validation(vec![ValidationErrorDetail {
            field: field.to_string(),
            title: title.to_string(),
            message: message.to_string(),
        }])
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::AuthenticationRequired | AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::PermissionDenied { .. } => StatusCode::FORBIDDEN,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Programming(_)
            | AppError::Database(_)
            | AppError::PasswordHash(_)
            | AppError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound { code, .. }
            | AppError::Unauthorized { code, .. }
            | AppError::PermissionDenied { code, .. }
            | AppError::Conflict { code, .. } => *code,
            AppError::AuthenticationRequired => "AUTH_REQUIRED",
            AppError::Programming(_) => "PROGRAMMING_ERROR",
            AppError::Database(_) => "DB_ERR",
            AppError::PasswordHash(_) => "HASH_ERR",
            AppError::Token(_) => "JWT_ERR",
        }
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(err: argon2::password_hash::Error) -> Self {
        AppError::PasswordHash(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        if status.is_server_error() {
            tracing::error!(code, "{}", self);
            return ResponseBuilder::error::<()>(status, code, "An internal error occurred").into_response();
        }

        match self {
            AppError::Validation(details) => {
                ResponseBuilder::fail_with_data(status, code, "Validation failed", details).into_response()
            }
            other => ResponseBuilder::error::<()>(status, code, &other.to_string()).into_response(),
        }
    }
}
