/// Database migration runner
///
/// Runs schema migrations using sqlx's embedded migration system.
///
/// # Migration Files
///
/// Migrations live in this crate's `migrations/` directory. Each migration
/// consists of two files:
/// - `{timestamp}_{name}.up.sql` - The "up" migration
/// - `{timestamp}_{name}.down.sql` - The "down" migration (rollback)
///
/// # Example
///
/// ```no_run
/// use dayplan_shared::db::migrations::run_migrations;
/// use dayplan_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     run_migrations(&pool).await?;
///
///     Ok(())
/// }
/// ```

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// Applied migrations are recorded by sqlx; re-running is a no-op.
///
/// # Errors
///
/// Returns an error if a migration file is malformed, a migration fails to
/// execute, or the connection is lost mid-run.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    let migrations = sqlx::migrate!("./migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
