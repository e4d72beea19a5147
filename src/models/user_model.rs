use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::entities::user;

#[derive(Debug, Serialize)]
pub struct UserProfileResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
}

impl From<user::Model> for UserProfileResponse {
    fn from(u: user::Model) -> Self {
        Self { id: u.id, username: u.username, email: u.email, is_staff: u.is_staff }
    }
}

/// `is_staff` is not accepted here; staff status is managed out of band.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    #[validate(length(max = 32, message = "Username must be at most 32 characters"))]
    pub username: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

#[derive(Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    pub current_password: String,

    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    pub new_password: String,
}
