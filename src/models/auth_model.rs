use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::entities::user;
use crate::error::AppError;

#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    #[validate(length(max = 32, message = "Username must be at most 32 characters"))]
    pub username: String,

    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    pub login: String, // Email OR Username, see LOGIN_FIELD

    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub access_expires_at: usize,
    pub refresh_expires_at: usize,
    pub token_type: String,
}

#[derive(Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    pub refresh: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshTokenResponse {
    pub access: String,
    pub access_expires_at: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub username: String,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,
    pub token_type: TokenType,
}

/// The authenticated principal of a request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl CurrentUser {
    pub fn is_editor(&self) -> bool {
        self.is_staff || self.is_superuser
    }
}

impl From<user::Model> for CurrentUser {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
        }
    }
}

/// Request extension set by the auth middleware on every request; empty for
/// anonymous callers.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    pub user: Option<CurrentUser>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn authenticated(user: CurrentUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn current(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    pub fn require(&self) -> Result<&CurrentUser, AppError> {
        self.current().ok_or(AppError::AuthenticationRequired)
    }
}
