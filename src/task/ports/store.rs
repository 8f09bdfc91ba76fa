//! Store port for tasks, the status vocabulary, and status history.

use crate::task::domain::{
    NewTask, OwnerId, StatusHistoryEntry, StatusId, Task, TaskId, TaskStatus,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task persistence contract.
///
/// Every lookup that takes an [`OwnerId`] filters on owner and identifier in
/// the same query, so a task owned by someone else is indistinguishable from
/// one that does not exist. Methods that write more than one record are
/// atomic.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Inserts a task together with its first status history entry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::UnknownStatus`] when `initial_status` is not
    /// part of the vocabulary. Nothing is written in that case.
    async fn insert_with_status(
        &self,
        task: &NewTask,
        initial_status: StatusId,
    ) -> TaskStoreResult<(Task, StatusHistoryEntry)>;

    /// Finds a task by identifier, restricted to tasks owned by `owner`.
    async fn find_owned(&self, owner: OwnerId, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Returns every task owned by `owner`, ordered by identifier ascending.
    async fn list_owned(&self, owner: OwnerId) -> TaskStoreResult<Vec<Task>>;

    /// Resolves the status referenced by the most recent history entry.
    ///
    /// Entries are ranked by creation timestamp, then by identifier. Returns
    /// `None` when the task has no history or the latest entry's definition
    /// has been removed.
    async fn current_status(&self, task_id: TaskId) -> TaskStoreResult<Option<TaskStatus>>;

    /// Returns the task's history, oldest first.
    async fn history(&self, task_id: TaskId) -> TaskStoreResult<Vec<StatusHistoryEntry>>;

    /// Finds a status definition by exact name.
    async fn find_status_by_name(&self, name: &str) -> TaskStoreResult<Option<TaskStatus>>;

    /// Returns the status vocabulary ordered by identifier.
    async fn statuses(&self) -> TaskStoreResult<Vec<TaskStatus>>;

    /// Persists title and description changes and appends a history entry
    /// in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task no longer exists or
    /// [`TaskStoreError::UnknownStatus`] when `status` is not defined.
    async fn save_with_status(
        &self,
        task: &Task,
        status: StatusId,
        recorded_at: DateTime<Utc>,
    ) -> TaskStoreResult<StatusHistoryEntry>;

    /// Deletes a task owned by `owner` and, by cascade, its history.
    ///
    /// Returns the deleted identifier, or `None` when no owned task matched.
    async fn delete_owned(&self, owner: OwnerId, id: TaskId) -> TaskStoreResult<Option<TaskId>>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The referenced status definition does not exist.
    #[error("unknown status definition: {0}")]
    UnknownStatus(StatusId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
