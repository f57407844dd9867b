//! Store provider selection.

use std::sync::Arc;

use tracing::{info, warn};

use tablehub_core::config::DatabaseConfig;
use tablehub_core::error::AppError;

use crate::connection::DatabasePool;
use crate::migration::run_migrations;
use crate::repositories::{MemoryReservationRepository, PgReservationRepository};
use crate::store::ReservationStore;

/// Open the reservation store named by `database.provider`.
///
/// For `postgres` this connects, migrates, and also returns the pool so the
/// caller can close it on shutdown.
pub async fn open_store(
    config: &DatabaseConfig,
) -> Result<(Arc<dyn ReservationStore>, Option<DatabasePool>), AppError> {
    match config.provider.to_lowercase().as_str() {
        "postgres" | "postgresql" => {
            let db = DatabasePool::connect(config).await?;
            run_migrations(db.pool()).await?;
            let store = PgReservationRepository::new(db.pool().clone());
            info!("Using PostgreSQL reservation store");
            Ok((Arc::new(store), Some(db)))
        }
        "memory" => {
            warn!("Using in-memory reservation store; data is lost on restart");
            Ok((Arc::new(MemoryReservationRepository::new()), None))
        }
        other => Err(AppError::configuration(format!(
            "Unknown database provider '{other}'. Expected one of: postgres, memory"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_provider() {
        let config = DatabaseConfig {
            provider: "memory".into(),
            ..DatabaseConfig::default()
        };
        let (store, pool) = open_store(&config).await.unwrap();
        assert!(pool.is_none());
        assert!(store.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_provider() {
        let config = DatabaseConfig {
            provider: "mongo".into(),
            ..DatabaseConfig::default()
        };
        let err = open_store(&config).await.unwrap_err();
        assert_eq!(err.kind, tablehub_core::error::ErrorKind::Configuration);
    }
}
