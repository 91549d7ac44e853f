use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

pub use configs::DatabaseConfig;

/// Connect with the pool options from `[database]`.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opts).await?;
    info!(backend = ?db.get_database_backend(), max_connections = cfg.max_connections, "database pool ready");
    Ok(db)
}

/// Fresh, fully migrated in-memory SQLite database.
///
/// The pool is pinned to a single connection: every SQLite `:memory:`
/// connection is its own database.
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    use migration::MigratorTrait;

    let mut opts = ConnectOptions::new("sqlite::memory:".to_string());
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
