//! Shared test helpers for `PostgreSQL` integration tests.

pub use super::cluster::{BoxError, PostgresCluster, postgres_cluster};
use super::cluster::TemporaryDatabase;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use rstest::fixture;
use taskledger::task::adapters::postgres::{PostgresTaskStore, apply_migrations};
use uuid::Uuid;

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "taskledger_test_template";

/// Ensures the template database exists with migrations and seed data.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: PostgresCluster) -> Result<(), BoxError> {
    cluster.ensure_template_exists(TEMPLATE_DB, |url| {
        let mut conn = PgConnection::establish(url).map_err(|err| Box::new(err) as BoxError)?;
        apply_migrations(&mut conn).map_err(|err| Box::new(err) as BoxError)
    })
}

/// Store bound to a private database cloned from the template.
pub struct PreparedStore {
    /// Temporary database, dropped with this value.
    pub temp_db: TemporaryDatabase,
    /// Store under test.
    pub store: PostgresTaskStore,
}

impl PreparedStore {
    /// Runs raw SQL against the temporary database.
    ///
    /// # Errors
    ///
    /// Returns an error if connection or execution fails.
    pub async fn execute(&self, sql: &'static str) -> Result<usize, BoxError> {
        let url = self.temp_db.url().to_owned();
        tokio::task::spawn_blocking(move || {
            let mut conn = PgConnection::establish(&url).map_err(|err| Box::new(err) as BoxError)?;
            diesel::sql_query(sql)
                .execute(&mut conn)
                .map_err(|err| Box::new(err) as BoxError)
        })
        .await
        .map_err(|err| Box::new(err) as BoxError)?
    }
}

/// Creates a fully prepared store with template setup complete.
///
/// # Errors
///
/// Returns an error if template creation, database setup, or pool
/// construction fails.
#[fixture]
pub fn prepared_store(postgres_cluster: PostgresCluster) -> Result<PreparedStore, BoxError> {
    ensure_template(postgres_cluster)?;
    let temp_db = postgres_cluster
        .temporary_database_from_template(&format!("test_{}", Uuid::new_v4()), TEMPLATE_DB)?;

    let manager = ConnectionManager::<PgConnection>::new(temp_db.url());
    let pool = Pool::builder()
        .max_size(2)
        .build(manager)
        .map_err(|err| Box::new(err) as BoxError)?;

    Ok(PreparedStore {
        temp_db,
        store: PostgresTaskStore::new(pool),
    })
}
