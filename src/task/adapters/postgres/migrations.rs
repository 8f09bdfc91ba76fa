//! Embedded SQL migrations for the task schema.

use crate::task::ports::{TaskStoreError, TaskStoreResult};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;

/// Migration scripts in application order, as `(name, up.sql)` pairs.
pub const MIGRATIONS: &[(&str, &str)] = &[(
    "2026-10-01-000000_create_task_tables",
    include_str!("../../../../migrations/2026-10-01-000000_create_task_tables/up.sql"),
)];

/// Applies every embedded migration, including the status vocabulary seed.
///
/// Scripts are idempotent, so re-running against a migrated database is a
/// no-op.
///
/// This is a blocking call; run it from `spawn_blocking` or a synchronous
/// context.
///
/// # Errors
///
/// Returns [`TaskStoreError::Persistence`] when a script fails.
pub fn apply_migrations(connection: &mut PgConnection) -> TaskStoreResult<()> {
    for (name, sql) in MIGRATIONS {
        tracing::debug!(migration = name, "applying migration");
        connection
            .batch_execute(sql)
            .map_err(TaskStoreError::persistence)?;
    }
    Ok(())
}
