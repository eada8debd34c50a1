use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend};
use migration::MigratorTrait;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::message::{InMemoryMessageRepository, MessageRepository, SeaOrmMessageRepository};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Open the configured store, migrating it first when it is a database.
pub async fn build_repository(cfg: &AppConfig) -> Result<Arc<dyn MessageRepository>, StartupError> {
    match cfg.storage.backend {
        StorageBackend::Memory => {
            warn!("using in-memory message store; data is lost on restart");
            Ok(Arc::new(InMemoryMessageRepository::new()))
        }
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            models::db::test_connection(&db).await?;
            if cfg.database.run_migrations {
                migration::Migrator::up(&db, None)
                    .await
                    .map_err(|e| StartupError::Runtime(format!("migrations failed: {e}")))?;
                info!("migrations applied");
            }
            Ok(Arc::new(SeaOrmMessageRepository::new(db)))
        }
    }
}

/// Wire store, service, and router together.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let repo = build_repository(cfg).await?;
    let state = ServerState::new(repo);
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and run the HTTP server until it stops.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;
    let addr = bind_addr(&cfg)?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, backend = ?cfg.storage.backend, "message server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let cfg = AppConfig::default();
        assert_eq!(bind_addr(&cfg).unwrap().port(), 8080);
    }

    #[test]
    fn bad_host_is_invalid_config() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "not a host".into();
        assert!(matches!(bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn memory_backend_builds_without_database() {
        let mut cfg = AppConfig::default();
        cfg.storage.backend = StorageBackend::Memory;
        assert!(build_app(&cfg).await.is_ok());
    }
}
