use sea_orm::*;
use crate::config::SuperuserSeed;
use crate::entities::user;
use crate::error::AppResult;
use crate::repositories::user_repository::UserRepository;
use crate::services::auth_service::AuthService;

/// Creates the configured superuser unless an account with that username exists.
pub async fn seed_super_user(db: &DatabaseConnection, seed: &SuperuserSeed) -> AppResult<bool> {
    // 1. Skip when the account exists
    let exists = user::Entity::find()
        .filter(user::Column::Username.eq(seed.username.as_str()))
        .one(db)
        .await?;

    if exists.is_some() {
        tracing::debug!(username = %seed.username, "superuser already present");
        return Ok(false);
    }

    // 2. Hash and save
    let hashed_password = AuthService::hash_password(&seed.password)?;
    let user = UserRepository::create(
        db,
        seed.username.clone(),
        seed.email.clone(),
        hashed_password,
        true,
        true,
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "superuser created");
    Ok(true)
}
