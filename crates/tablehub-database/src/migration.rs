//! Schema migration runner.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use tablehub_core::error::{AppError, ErrorKind};

/// Embedded migrations from the workspace `migrations/` directory.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply all pending migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!(
        available = MIGRATOR.iter().count(),
        "Applying reservation schema migrations"
    );

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!("Reservation schema is up to date");
    Ok(())
}
