//! Applies the task schema and status seed to the configured database.
//!
//! Usage:
//!
//! ```text
//! TASKLEDGER_DATABASE__URL=postgres://localhost/taskledger taskledger-migrate
//! ```
//!
//! Configuration is read from `taskledger.toml` and `TASKLEDGER_*`
//! environment variables.

use taskledger::config::{ConfigError, TaskLedgerConfig};
use taskledger::task::adapters::postgres::{PostgresTaskStore, apply_migrations};
use taskledger::task::ports::{TaskStore, TaskStoreError};
use taskledger::telemetry::{self, TelemetryError};
use thiserror::Error;

#[derive(Debug, Error)]
enum MigrateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Store(#[from] TaskStoreError),
    #[error("database.url is not configured")]
    MissingDatabaseUrl,
}

#[tokio::main]
async fn main() -> Result<(), MigrateError> {
    let config = TaskLedgerConfig::load()?;
    telemetry::init(&config.logging)?;

    if !config.database.is_configured() {
        return Err(MigrateError::MissingDatabaseUrl);
    }

    let store = PostgresTaskStore::connect(&config.database)?;
    let pool = store.pool().clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
        apply_migrations(&mut connection)
    })
    .await
    .map_err(TaskStoreError::persistence)??;

    for status in store.statuses().await? {
        tracing::info!(id = %status.id(), name = %status.name(), "status available");
    }
    tracing::info!("migrations applied");
    Ok(())
}
