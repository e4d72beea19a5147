use sea_orm::*;
use crate::entities::user;
use crate::error::{AppError, AppResult};
use crate::models::auth_model::CurrentUser;
use crate::models::user_model::*;
use crate::repositories::user_repository::UserRepository;
use crate::services::auth_service::AuthService;
use crate::utils::validated_wrapper::validate_payload;

pub struct UserService;

impl UserService {
    pub async fn get_profile(db: &DatabaseConnection, username: &str) -> AppResult<UserProfileResponse> {
        Ok(Self::find_public(db, username).await?.into())
    }

    /// Profile edits are limited to the account owner.
    pub async fn update_user(
        db: &DatabaseConnection,
        username: &str,
        actor: &CurrentUser,
        payload: UpdateUserRequest,
    ) -> AppResult<UserProfileResponse> {
        validate_payload(&payload)?;

        let target = Self::find_public(db, username).await?;
        Self::ensure_self(&target, actor)?;

        let new_username = payload.username.unwrap_or_else(|| target.username.clone());
        let new_email = payload.email.unwrap_or_else(|| target.email.clone());

        let duplicates = UserRepository::find_duplicates(db, &new_username, &new_email, Some(target.id)).await?;
        if !duplicates.is_empty() {
            return Err(AuthService::duplicate_error(&duplicates, &new_username, &new_email));
        }

        let mut active: user::ActiveModel = target.into();
        active.username = Set(new_username);
        active.email = Set(new_email);
        let updated = active.update(db).await?;
        tracing::info!(user_id = updated.id, "profile updated");

        Ok(updated.into())
    }

    pub async fn change_password(
        db: &DatabaseConnection,
        username: &str,
        actor: &CurrentUser,
        payload: ChangePasswordRequest,
    ) -> AppResult<()> {
        validate_payload(&payload)?;

        let target = Self::find_public(db, username).await?;
        Self::ensure_self(&target, actor)?;

        if !AuthService::verify_password(&payload.current_password, &target.password_hash)? {
            tracing::warn!(user_id = target.id, "password change rejected: wrong current password");
            return Err(AppError::forbidden_with("WRONG_PASSWORD", "Wrong password."));
        }
        if payload.new_password == payload.current_password {
            return Err(AppError::invalid_field(
                "new_password",
                "password_unchanged",
                "The new password must differ from the current one.",
            ));
        }
        AuthService::ensure_strong_password("new_password", &payload.new_password, &target.username)?;

        let hashed = AuthService::hash_password(&payload.new_password)?;
        let mut active: user::ActiveModel = target.into();
        active.password_hash = Set(hashed);
        let updated = active.update(db).await?;
        tracing::info!(user_id = updated.id, "password changed");

        Ok(())
    }

    async fn find_public(db: &DatabaseConnection, username: &str) -> AppResult<user::Model> {
        UserRepository::find_public_by_username(db, username)
            .await?
            .ok_or_else(|| AppError::not_found("USER_NOT_FOUND", format!("User '{}' not found", username)))
    }

    fn ensure_self(target: &user::Model, actor: &CurrentUser) -> AppResult<()> {
        if target.id == actor.id {
            Ok(())
        } else {
            tracing::warn!(target_id = target.id, user_id = actor.id, "user modification denied");
            Err(AppError::forbidden("You can only modify your own account"))
        }
    }
}
