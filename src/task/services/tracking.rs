//! Service layer for task creation, lookup, update, and deletion.

use crate::task::{
    domain::{
        NewTask, OwnerId, StatusHistoryEntry, StatusId, Task, TaskDomainError, TaskId,
        TaskStatus, TaskTitle,
    },
    ports::{TaskStore, TaskStoreError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    owner: OwnerId,
    title: String,
    description: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(owner: OwnerId, title: impl Into<String>) -> Self {
        Self {
            owner,
            title: title.into(),
            description: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for a partial task update.
///
/// Fields left as `None` are not touched. The status is resolved by exact
/// name against the vocabulary; a missing status counts as an unknown one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    owner: OwnerId,
    task_id: Option<TaskId>,
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates an update request for `task_id` on behalf of `owner`.
    #[must_use]
    pub const fn new(owner: OwnerId, task_id: TaskId) -> Self {
        Self::for_optional_task(owner, Some(task_id))
    }

    /// Creates an update request whose task identifier may be missing, as
    /// happens when it is taken straight from an inbound request.
    #[must_use]
    pub const fn for_optional_task(owner: OwnerId, task_id: Option<TaskId>) -> Self {
        Self {
            owner,
            task_id,
            title: None,
            description: None,
            status: None,
        }
    }

    /// Sets a replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the name of the status to transition to.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// A task together with its current status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedTask {
    task: Task,
    status: Option<TaskStatus>,
}

impl TrackedTask {
    /// Pairs a task with its resolved status.
    #[must_use]
    pub const fn new(task: Task, status: Option<TaskStatus>) -> Self {
        Self { task, status }
    }

    /// Returns the task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the current status.
    ///
    /// `None` only when the latest history entry points at a status
    /// definition that has since been removed.
    #[must_use]
    pub const fn status(&self) -> Option<&TaskStatus> {
        self.status.as_ref()
    }

    /// Splits into task and status.
    #[must_use]
    pub fn into_parts(self) -> (Task, Option<TaskStatus>) {
        (self.task, self.status)
    }
}

/// Result of [`TaskService::update_task`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The task identifier was missing, or no task with that identifier is
    /// owned by the caller.
    NotFound,
    /// The task exists but the requested status name is unknown. The task is
    /// returned unchanged.
    InvalidStatus(Task),
    /// The task was updated and the new status recorded.
    Updated {
        /// Task after the update.
        task: Task,
        /// Status now current.
        status: TaskStatus,
    },
}

impl UpdateOutcome {
    /// Flattens the outcome into the `(task, status)` pair used by transport
    /// layers: both `None` when not found, only the task when the status was
    /// invalid, and both present on success.
    #[must_use]
    pub fn into_parts(self) -> (Option<Task>, Option<TaskStatus>) {
        match self {
            Self::NotFound => (None, None),
            Self::InvalidStatus(task) => (Some(task), None),
            Self::Updated { task, status } => (Some(task), Some(status)),
        }
    }
}

/// Service-level errors for task operations.
///
/// Missing tasks and unknown status names are not errors; they are reported
/// through `Option` and [`UpdateOutcome`].
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
///
/// Stateless apart from its store and clock handles; clone it freely.
pub struct TaskService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    initial_status: StatusId,
}

impl<S, C> Clone for TaskService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            initial_status: self.initial_status,
        }
    }
}

impl<S, C> TaskService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a service whose new tasks start in [`StatusId::INITIAL`].
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            initial_status: StatusId::INITIAL,
        }
    }

    /// Overrides the status new tasks start in.
    #[must_use]
    pub const fn with_initial_status(mut self, initial_status: StatusId) -> Self {
        self.initial_status = initial_status;
        self
    }

    /// Returns the status new tasks start in.
    #[must_use]
    pub const fn initial_status(&self) -> StatusId {
        self.initial_status
    }

    /// Creates a task and records its initial status in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for an invalid title, or
    /// [`TaskServiceError::Store`] when the initial status is not seeded or
    /// persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let title = TaskTitle::new(request.title)?;
        let mut new_task = NewTask::new(request.owner, title, &*self.clock);
        if let Some(description) = request.description {
            new_task = new_task.with_description(description);
        }

        let (task, entry) = self
            .store
            .insert_with_status(&new_task, self.initial_status)
            .await?;
        tracing::info!(
            task_id = %task.id(),
            owner = %task.owner(),
            history_entry = %entry.id(),
            "task created"
        );
        Ok(task)
    }

    /// Retrieves a task owned by `owner` together with its current status.
    ///
    /// Returns `Ok(None)` both when the task does not exist and when another
    /// user owns it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Store`] when persistence lookup fails.
    pub async fn get_task(
        &self,
        owner: OwnerId,
        task_id: TaskId,
    ) -> TaskServiceResult<Option<TrackedTask>> {
        let Some(task) = self.store.find_owned(owner, task_id).await? else {
            tracing::debug!(%task_id, %owner, "no owned task");
            return Ok(None);
        };
        let status = self.store.current_status(task.id()).await?;
        Ok(Some(TrackedTask::new(task, status)))
    }

    /// Lists every task owned by `owner` in identifier order, each with its
    /// current status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Store`] when persistence lookup fails.
    pub async fn get_tasks(&self, owner: OwnerId) -> TaskServiceResult<Vec<TrackedTask>> {
        let tasks = self.store.list_owned(owner).await?;
        let mut tracked = Vec::with_capacity(tasks.len());
        for task in tasks {
            let status = self.store.current_status(task.id()).await?;
            tracked.push(TrackedTask::new(task, status));
        }
        tracing::debug!(%owner, count = tracked.len(), "listed tasks");
        Ok(tracked)
    }

    /// Applies a partial update and records the requested status.
    ///
    /// Steps, in order: reject a missing identifier, look the task up with
    /// the owner filter, resolve the status by exact name, apply the provided
    /// fields, then persist the task and a new history entry atomically.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for an invalid replacement title,
    /// or [`TaskServiceError::Store`] when persistence fails.
    pub async fn update_task(&self, request: UpdateTaskRequest) -> TaskServiceResult<UpdateOutcome> {
        let UpdateTaskRequest {
            owner,
            task_id: requested_id,
            title,
            description,
            status,
        } = request;

        let Some(task_id) = requested_id else {
            tracing::error!(%owner, "update requested without a task id");
            return Ok(UpdateOutcome::NotFound);
        };

        let Some(mut task) = self.store.find_owned(owner, task_id).await? else {
            tracing::warn!(%task_id, %owner, "no owned task to update");
            return Ok(UpdateOutcome::NotFound);
        };

        let resolved = match status.as_deref() {
            Some(name) => self.store.find_status_by_name(name).await?,
            None => None,
        };
        let Some(next_status) = resolved else {
            tracing::warn!(%task_id, status = ?status, "unknown task status");
            return Ok(UpdateOutcome::InvalidStatus(task));
        };

        if let Some(replacement) = title {
            task.retitle(TaskTitle::new(replacement)?);
        }
        if let Some(replacement) = description {
            task.describe(replacement);
        }

        let entry = self
            .store
            .save_with_status(&task, next_status.id(), self.clock.utc())
            .await?;
        tracing::info!(
            %task_id,
            status = %next_status.name(),
            history_entry = %entry.id(),
            "task updated"
        );
        Ok(UpdateOutcome::Updated {
            task,
            status: next_status,
        })
    }

    /// Deletes a task owned by `owner`, cascading to its history.
    ///
    /// Returns the deleted identifier, or `Ok(None)` when no owned task
    /// matched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Store`] when persistence fails.
    pub async fn delete_task(
        &self,
        owner: OwnerId,
        task_id: TaskId,
    ) -> TaskServiceResult<Option<TaskId>> {
        let deleted = self.store.delete_owned(owner, task_id).await?;
        match deleted {
            Some(id) => tracing::info!(task_id = %id, %owner, "task deleted"),
            None => tracing::warn!(%task_id, %owner, "no owned task to delete"),
        }
        Ok(deleted)
    }

    /// Returns the status history of a task owned by `owner`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Store`] when persistence lookup fails.
    pub async fn status_history(
        &self,
        owner: OwnerId,
        task_id: TaskId,
    ) -> TaskServiceResult<Option<Vec<StatusHistoryEntry>>> {
        if self.store.find_owned(owner, task_id).await?.is_none() {
            return Ok(None);
        }
        Ok(Some(self.store.history(task_id).await?))
    }

    /// Returns the status vocabulary in identifier order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Store`] when persistence lookup fails.
    pub async fn statuses(&self) -> TaskServiceResult<Vec<TaskStatus>> {
        Ok(self.store.statuses().await?)
    }
}
