use casbin::MgmtApi;
use crate::auth::{SharedEnforcer, ROLE_ANONYMOUS, ROLE_STAFF, ROLE_USER};

const WRITE: &str = "^(PUT|PATCH)$";
const WRITE_OR_DELETE: &str = "^(PUT|PATCH|DELETE)$";

/// (subject, path pattern, method regex)
const POLICIES: &[(&str, &str, &str)] = &[
    // Public reads and the auth endpoints
    (ROLE_ANONYMOUS, "/api/health", "^GET$"),
    (ROLE_ANONYMOUS, "/api/main", "^GET$"),
    (ROLE_ANONYMOUS, "/api/articles/:slug", "^GET$"),
    (ROLE_ANONYMOUS, "/api/user/:username", "^GET$"),
    (ROLE_ANONYMOUS, "/api/auth/*", "^POST$"),
    // Any signed-in user
    (ROLE_USER, "/api/articles/:slug/add_comment", "^POST$"),
    (ROLE_USER, "/api/articles/:slug/comments/:id", WRITE_OR_DELETE),
    (ROLE_USER, "/api/user/:username", WRITE),
    (ROLE_USER, "/api/user/:username/change_password", "^POST$"),
    // Redactors
    (ROLE_STAFF, "/api/articles", "^POST$"),
    (ROLE_STAFF, "/api/articles/:slug", WRITE_OR_DELETE),
];

pub async fn seed_casbin_policies(enforcer: &SharedEnforcer) -> Result<(), casbin::Error> {
    let mut e = enforcer.write().await;

    // staff > user > anonymous
    e.add_grouping_policy(vec![ROLE_USER.to_string(), ROLE_ANONYMOUS.to_string()]).await?;
    e.add_grouping_policy(vec![ROLE_STAFF.to_string(), ROLE_USER.to_string()]).await?;

    for (sub, obj, act) in POLICIES {
        e.add_policy(vec![sub.to_string(), obj.to_string(), act.to_string()]).await?;
    }

    tracing::info!(policies = POLICIES.len(), "seeded casbin policies");
    Ok(())
}
