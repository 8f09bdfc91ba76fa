//! Request handlers translating service outcomes into responses.

use super::payloads::{CreateTaskPayload, TaskRepresentation, UpdateTaskPayload};
use crate::task::{
    domain::{OwnerId, TaskId},
    ports::TaskStore,
    services::{
        CreateTaskRequest, TaskService, TaskServiceError, UpdateOutcome, UpdateTaskRequest,
    },
};
use http::StatusCode;
use mockable::Clock;

/// Status code plus optional body, ready for any HTTP framework to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse<T> {
    /// Response status code.
    pub status: StatusCode,
    /// Response body; `None` means an empty body.
    pub body: Option<T>,
}

impl<T> ApiResponse<T> {
    const fn new(status: StatusCode, body: Option<T>) -> Self {
        Self { status, body }
    }

    fn from_error(err: &TaskServiceError) -> Self {
        match err {
            TaskServiceError::Domain(domain) => {
                tracing::warn!(error = %domain, "rejected task request");
                Self::new(StatusCode::BAD_REQUEST, None)
            }
            TaskServiceError::Store(store) => {
                tracing::error!(error = %store, "task store failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        }
    }
}

/// Task endpoint handlers over a [`TaskService`].
///
/// Not-found and not-owned both produce `404`, an unknown status name
/// produces `400`.
pub struct TaskApi<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    service: TaskService<S, C>,
}

impl<S, C> Clone for TaskApi<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<S, C> TaskApi<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Wraps a task service.
    #[must_use]
    pub const fn new(service: TaskService<S, C>) -> Self {
        Self { service }
    }

    /// `GET /task`: every task owned by the caller.
    pub async fn list(&self, owner: OwnerId) -> ApiResponse<Vec<TaskRepresentation>> {
        match self.service.get_tasks(owner).await {
            Ok(tasks) => ApiResponse::new(
                StatusCode::OK,
                Some(tasks.iter().map(TaskRepresentation::tracked).collect()),
            ),
            Err(err) => ApiResponse::from_error(&err),
        }
    }

    /// `GET /task/{id}`: a one-element list, or `404` with an empty list.
    pub async fn detail(
        &self,
        owner: OwnerId,
        task_id: TaskId,
    ) -> ApiResponse<Vec<TaskRepresentation>> {
        match self.service.get_task(owner, task_id).await {
            Ok(Some(tracked)) if tracked.status().is_some() => ApiResponse::new(
                StatusCode::OK,
                Some(vec![TaskRepresentation::tracked(&tracked)]),
            ),
            Ok(_) => ApiResponse::new(StatusCode::NOT_FOUND, Some(Vec::new())),
            Err(err) => ApiResponse::from_error(&err),
        }
    }

    /// `POST /task`: creates a task, answering `201`.
    pub async fn create(
        &self,
        owner: OwnerId,
        payload: CreateTaskPayload,
    ) -> ApiResponse<TaskRepresentation> {
        let CreateTaskPayload { title, description } = payload;
        let mut request = CreateTaskRequest::new(owner, title);
        if let Some(text) = description {
            request = request.with_description(text);
        }

        match self.service.create(request).await {
            Ok(task) => {
                ApiResponse::new(StatusCode::CREATED, Some(TaskRepresentation::created(&task)))
            }
            Err(err) => ApiResponse::from_error(&err),
        }
    }

    /// `PATCH /task/{id}`: partial update with a status transition.
    pub async fn update(
        &self,
        owner: OwnerId,
        task_id: Option<TaskId>,
        payload: UpdateTaskPayload,
    ) -> ApiResponse<TaskRepresentation> {
        let UpdateTaskPayload {
            title,
            description,
            status,
        } = payload;
        let mut request = UpdateTaskRequest::for_optional_task(owner, task_id);
        if let Some(text) = title {
            request = request.with_title(text);
        }
        if let Some(text) = description {
            request = request.with_description(text);
        }
        if let Some(name) = status {
            request = request.with_status(name);
        }

        match self.service.update_task(request).await {
            Ok(UpdateOutcome::Updated { task, status: next }) => ApiResponse::new(
                StatusCode::OK,
                Some(TaskRepresentation::with_status(&task, &next)),
            ),
            Ok(UpdateOutcome::InvalidStatus(_)) => ApiResponse::new(StatusCode::BAD_REQUEST, None),
            Ok(UpdateOutcome::NotFound) => ApiResponse::new(StatusCode::NOT_FOUND, None),
            Err(err) => ApiResponse::from_error(&err),
        }
    }

    /// `DELETE /task/{id}`: answers with the deleted task's summary.
    pub async fn delete(&self, owner: OwnerId, task_id: TaskId) -> ApiResponse<TaskRepresentation> {
        let existing = match self.service.get_task(owner, task_id).await {
            Ok(Some(tracked)) => TaskRepresentation::summary(tracked.task()),
            Ok(None) => return ApiResponse::new(StatusCode::NOT_FOUND, None),
            Err(err) => return ApiResponse::from_error(&err),
        };

        match self.service.delete_task(owner, task_id).await {
            Ok(Some(_)) => ApiResponse::new(StatusCode::OK, Some(existing)),
            Ok(None) => ApiResponse::new(StatusCode::NOT_FOUND, None),
            Err(err) => ApiResponse::from_error(&err),
        }
    }
}
