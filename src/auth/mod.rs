use casbin::{CoreApi, DefaultModel, Enforcer, MemoryAdapter};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::entities::user;

pub type SharedEnforcer = Arc<RwLock<Enforcer>>;

pub const ROLE_ANONYMOUS: &str = "anonymous";
pub const ROLE_USER: &str = "user";
pub const ROLE_STAFF: &str = "staff";

/// Builds the enforcer from the bundled RBAC model and loads the route policies.
pub async fn setup_casbin() -> Result<SharedEnforcer, casbin::Error> {
    let model = DefaultModel::from_str(include_str!("rbac_model.conf")).await?;
    let adapter = MemoryAdapter::default();
    let enforcer = Arc::new(RwLock::new(Enforcer::new(model, adapter).await?));

    crate::seeders::casbin_seeder::seed_casbin_policies(&enforcer).await?;
    Ok(enforcer)
}

/// Casbin subject for a request principal.
pub fn subject_for(user: Option<&user::Model>) -> &'static str {
    match user {
        Some(u) if u.is_editor() => ROLE_STAFF,
        Some(_) => ROLE_USER,
        None => ROLE_ANONYMOUS,
    }
}
