use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use migration::{Migrator, MigratorTrait};
use newsblog::config::{AppState, Config};
use sea_orm::Database;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("newsblog=info,tower_http=info")),
        )
        .init();

    let cfg = Config::init();
    tracing::info!("Starting newsblog backend");

    // 1. Database Connection
    let db = Database::connect(&cfg.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connected");

    // 2. Schema
    Migrator::up(&db, None)
        .await
        .expect("Failed to apply migrations");

    // 3. Casbin Initialization
    let enforcer = newsblog::auth::setup_casbin()
        .await
        .expect("Failed to initialize casbin enforcer");

    // 4. Database Seeding
    if let Err(e) = newsblog::seeders::run_seeders(&db, &cfg).await {
        tracing::error!("Seeding failed: {}", e);
    }

    // 5. Build App State
    let addr_str = format!("{}:{}", cfg.server_host, cfg.server_port);
    let state = AppState {
        db,
        config: Arc::new(cfg),
        enforcer,
    };

    // 6. Initialize Router
    let app = newsblog::app(state);

    // 7. Start Server
    let addr: SocketAddr = addr_str.parse().expect("Invalid address");
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");
    axum::serve(listener, app).await.expect("Server error");
}
