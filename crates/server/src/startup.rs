use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {}", e)))
}

/// Connect, migrate if configured, and assemble the application router.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Database(e.to_string()))?;
        info!(event = "migrated", "database schema up to date");
    }
    let state = ServerState::new(db, &cfg.auth);
    Ok(routes::build_router(state, build_cors()))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
    }
}

/// Public entry: build the app and run the HTTP server until Ctrl+C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting booking server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
