#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use configs::DatabaseConfig;
use models::db::{connect_with_config, DATABASE_URL};

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

fn test_db_config() -> DatabaseConfig {
    DatabaseConfig {
        url: DATABASE_URL.clone(),
        max_connections: 5,
        min_connections: 1,
        acquire_timeout_secs: 10,
        ..DatabaseConfig::default()
    }
}

/// Connection to a migrated database, or `None` when DB tests are disabled
/// (`SKIP_DB_TESTS` set or no `DATABASE_URL`).
pub async fn db_or_skip() -> Result<Option<DatabaseConnection>, anyhow::Error> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(None);
    }
    let cfg = test_db_config();
    let migrated = MIGRATED
        .get_or_init(|| async {
            let Ok(db) = connect_with_config(&test_db_config()).await else { return false };
            migration::Migrator::up(&db, None).await.is_ok()
        })
        .await;
    if !*migrated {
        eprintln!("skip: database unreachable or migration failed");
        return Ok(None);
    }
    // Fresh connection for the current test's runtime
    let db = connect_with_config(&cfg).await?;
    Ok(Some(db))
}
