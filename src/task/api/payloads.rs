//! Wire representations for task requests and responses.

use crate::task::{
    domain::{Task, TaskStatus},
    services::TrackedTask,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inbound body for task creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTaskPayload {
    /// Task title.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Inbound body for a partial task update. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateTaskPayload {
    /// Replacement title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement description.
    #[serde(default)]
    pub description: Option<String>,
    /// Name of the status to transition to.
    #[serde(default)]
    pub status: Option<String>,
}

/// Outbound task representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRepresentation {
    /// Task identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: Option<String>,
    /// Current status name, omitted where not applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Creation timestamp, only reported when the task was just created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl TaskRepresentation {
    /// Bare representation without status or timestamp.
    #[must_use]
    pub fn summary(task: &Task) -> Self {
        Self {
            id: task.id().value(),
            title: task.title().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            status: None,
            created_at: None,
        }
    }

    /// Representation returned after creation.
    #[must_use]
    pub fn created(task: &Task) -> Self {
        Self {
            created_at: Some(task.created_at()),
            ..Self::summary(task)
        }
    }

    /// Representation of a task with an explicit status.
    #[must_use]
    pub fn with_status(task: &Task, status: &TaskStatus) -> Self {
        Self {
            status: Some(status.name().as_str().to_owned()),
            ..Self::summary(task)
        }
    }

    /// Representation of a task paired with its current status.
    #[must_use]
    pub fn tracked(tracked: &TrackedTask) -> Self {
        match tracked.status() {
            Some(status) => Self::with_status(tracked.task(), status),
            None => Self::summary(tracked.task()),
        }
    }
}
