pub mod casbin_seeder;
pub mod user_seeder;

use sea_orm::DatabaseConnection;
use crate::config::Config;
use crate::error::AppResult;

/// Start-up data. Casbin policies are loaded by `auth::setup_casbin`.
pub async fn run_seeders(db: &DatabaseConnection, cfg: &Config) -> AppResult<()> {
    if let Some(seed) = &cfg.superuser {
        user_seeder::seed_super_user(db, seed).await?;
    }
    Ok(())
}
