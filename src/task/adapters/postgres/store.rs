//! `PostgreSQL` store implementation for tasks and status history.

use super::{
    models::{HistoryRow, NewHistoryRow, NewTaskRow, StatusRow, TaskChangeset, TaskRow},
    schema::{task_status_history, task_statuses, tasks},
};
use crate::config::DatabaseConfig;
use crate::task::{
    domain::{
        HistoryEntryId, NewTask, OwnerId, PersistedTaskData, StatusHistoryEntry, StatusId,
        StatusName, Task, TaskId, TaskStatus, TaskTitle,
    },
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::time::Duration;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task store.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: TaskPgPool,
}

/// Error carried out of a Diesel transaction closure.
///
/// Diesel requires the closure error to absorb its own errors so rollback
/// failures can surface.
#[derive(Debug)]
enum TxError {
    Store(TaskStoreError),
    Diesel(DieselError),
}

impl From<DieselError> for TxError {
    fn from(err: DieselError) -> Self {
        Self::Diesel(err)
    }
}

impl From<TaskStoreError> for TxError {
    fn from(err: TaskStoreError) -> Self {
        Self::Store(err)
    }
}

impl TxError {
    fn into_store_error(self, status: StatusId) -> TaskStoreError {
        match self {
            Self::Store(err) => err,
            Self::Diesel(DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)) => {
                TaskStoreError::UnknownStatus(status)
            }
            Self::Diesel(err) => TaskStoreError::persistence(err),
        }
    }
}

impl PostgresTaskStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Builds a connection pool from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the pool cannot open its
    /// initial connections.
    pub fn connect(config: &DatabaseConfig) -> TaskStoreResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(config.url.as_str());
        let pool = Pool::builder()
            .max_size(config.max_connections)
            .connection_timeout(Duration::from_secs(config.connection_timeout_secs))
            .build(manager)
            .map_err(TaskStoreError::persistence)?;
        Ok(Self::new(pool))
    }

    /// Returns the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &TaskPgPool {
        &self.pool
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn insert_with_status(
        &self,
        task: &NewTask,
        initial_status: StatusId,
    ) -> TaskStoreResult<(Task, StatusHistoryEntry)> {
        let new_row = NewTaskRow {
            title: task.title().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            owner_id: task.owner().into_inner(),
            created_at: task.created_at(),
        };

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, TxError, _>(|tx| {
                    // Semantic pre-check; the foreign key still guards the
                    // window between check and insert.
                    ensure_status_exists(tx, initial_status)?;

                    let task_row = diesel::insert_into(tasks::table)
                        .values(&new_row)
                        .returning(TaskRow::as_returning())
                        .get_result::<TaskRow>(tx)?;
                    let history_row = diesel::insert_into(task_status_history::table)
                        .values(&NewHistoryRow {
                            created_at: task_row.created_at,
                            status_id: Some(initial_status.value()),
                            task_id: task_row.id,
                        })
                        .returning(HistoryRow::as_returning())
                        .get_result::<HistoryRow>(tx)?;

                    Ok((row_to_task(task_row)?, row_to_entry(history_row)))
                })
                .map_err(|err| err.into_store_error(initial_status))
        })
        .await
    }

    async fn find_owned(&self, owner: OwnerId, id: TaskId) -> TaskStoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.value()))
                .filter(tasks::owner_id.eq(owner.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_owned(&self, owner: OwnerId) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::owner_id.eq(owner.into_inner()))
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn current_status(&self, task_id: TaskId) -> TaskStoreResult<Option<TaskStatus>> {
        self.run_blocking(move |connection| {
            let latest = task_status_history::table
                .left_join(task_statuses::table)
                .filter(task_status_history::task_id.eq(task_id.value()))
                .order((
                    task_status_history::created_at.desc(),
                    task_status_history::id.desc(),
                ))
                .select((task_statuses::id, task_statuses::name).nullable())
                .first::<Option<(i64, String)>>(connection)
                .optional()
                .map_err(TaskStoreError::persistence)?;
            latest
                .flatten()
                .map(|(id, name)| row_to_status(StatusRow { id, name }))
                .transpose()
        })
        .await
    }

    async fn history(&self, task_id: TaskId) -> TaskStoreResult<Vec<StatusHistoryEntry>> {
        self.run_blocking(move |connection| {
            let rows = task_status_history::table
                .filter(task_status_history::task_id.eq(task_id.value()))
                .order((
                    task_status_history::created_at.asc(),
                    task_status_history::id.asc(),
                ))
                .select(HistoryRow::as_select())
                .load::<HistoryRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            Ok(rows.into_iter().map(row_to_entry).collect())
        })
        .await
    }

    async fn find_status_by_name(&self, name: &str) -> TaskStoreResult<Option<TaskStatus>> {
        let lookup_name = name.to_owned();
        self.run_blocking(move |connection| {
            let row = task_statuses::table
                .filter(task_statuses::name.eq(lookup_name))
                .select(StatusRow::as_select())
                .first::<StatusRow>(connection)
                .optional()
                .map_err(TaskStoreError::persistence)?;
            row.map(row_to_status).transpose()
        })
        .await
    }

    async fn statuses(&self) -> TaskStoreResult<Vec<TaskStatus>> {
        self.run_blocking(move |connection| {
            let rows = task_statuses::table
                .order(task_statuses::id.asc())
                .select(StatusRow::as_select())
                .load::<StatusRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_status).collect()
        })
        .await
    }

    async fn save_with_status(
        &self,
        task: &Task,
        status: StatusId,
        recorded_at: DateTime<Utc>,
    ) -> TaskStoreResult<StatusHistoryEntry> {
        let task_id = task.id();
        let changes = TaskChangeset {
            title: task.title().as_str().to_owned(),
            description: task.description().map(str::to_owned),
        };

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, TxError, _>(|tx| {
                    ensure_status_exists(tx, status)?;

                    let updated = diesel::update(tasks::table.find(task_id.value()))
                        .set(&changes)
                        .execute(tx)?;
                    if updated == 0 {
                        return Err(TaskStoreError::NotFound(task_id).into());
                    }

                    let history_row = diesel::insert_into(task_status_history::table)
                        .values(&NewHistoryRow {
                            created_at: recorded_at,
                            status_id: Some(status.value()),
                            task_id: task_id.value(),
                        })
                        .returning(HistoryRow::as_returning())
                        .get_result::<HistoryRow>(tx)?;
                    Ok(row_to_entry(history_row))
                })
                .map_err(|err| err.into_store_error(status))
        })
        .await
    }

    async fn delete_owned(&self, owner: OwnerId, id: TaskId) -> TaskStoreResult<Option<TaskId>> {
        self.run_blocking(move |connection| {
            // A single statement: the owner filter is part of the delete
            // itself and history rows go with it through ON DELETE CASCADE.
            let deleted = diesel::delete(
                tasks::table
                    .filter(tasks::id.eq(id.value()))
                    .filter(tasks::owner_id.eq(owner.into_inner())),
            )
            .returning(tasks::id)
            .get_result::<i64>(connection)
            .optional()
            .map_err(TaskStoreError::persistence)?;
            Ok(deleted.map(TaskId::new))
        })
        .await
    }
}

fn ensure_status_exists(connection: &mut PgConnection, status: StatusId) -> Result<(), TxError> {
    let count: i64 = task_statuses::table
        .filter(task_statuses::id.eq(status.value()))
        .count()
        .get_result(connection)?;
    if count == 0 {
        return Err(TaskStoreError::UnknownStatus(status).into());
    }
    Ok(())
}

fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let TaskRow {
        id,
        title: persisted_title,
        description,
        owner_id,
        created_at,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskStoreError::persistence)?;
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id),
        title,
        description,
        owner: OwnerId::from_uuid(owner_id),
        created_at,
    }))
}

fn row_to_status(row: StatusRow) -> TaskStoreResult<TaskStatus> {
    let name = StatusName::new(row.name).map_err(TaskStoreError::persistence)?;
    Ok(TaskStatus::new(StatusId::new(row.id), name))
}

fn row_to_entry(row: HistoryRow) -> StatusHistoryEntry {
    StatusHistoryEntry::from_persisted(
        HistoryEntryId::new(row.id),
        TaskId::new(row.task_id),
        row.status_id.map(StatusId::new),
        row.created_at,
    )
}
