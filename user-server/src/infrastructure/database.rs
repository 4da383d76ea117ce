use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::info;

use crate::infrastructure::config::AppConfig;

pub async fn create_pool(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .min_connections(config.db_max_connections.min(5))
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await?;
    info!(max_connections = config.db_max_connections, "connected to PostgreSQL");
    Ok(pool)
}

/// Applies `migrations/` (embedded at build time) to the users database.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    let migrator = sqlx::migrate!();
    info!(count = migrator.iter().count(), "applying database migrations");
    migrator.run(pool).await
}
