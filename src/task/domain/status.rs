//! Status vocabulary and the append-only status history.

use super::{HistoryEntryId, StatusId, TaskDomainError, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum status name length, matching the `VARCHAR(20)` column.
const MAX_STATUS_NAME_LENGTH: usize = 20;

/// Name of a status definition.
///
/// Names are matched exactly, so the value is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusName(String);

impl StatusName {
    /// Creates a validated status name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyStatusName`] for blank values or
    /// [`TaskDomainError::StatusNameTooLong`] beyond 20 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(TaskDomainError::EmptyStatusName);
        }
        if raw.chars().count() > MAX_STATUS_NAME_LENGTH {
            return Err(TaskDomainError::StatusNameTooLong {
                name: raw,
                max: MAX_STATUS_NAME_LENGTH,
            });
        }
        Ok(Self(raw))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StatusName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for StatusName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One element of the seeded status vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskStatus {
    id: StatusId,
    name: StatusName,
}

impl TaskStatus {
    /// Creates a status definition.
    #[must_use]
    pub const fn new(id: StatusId, name: StatusName) -> Self {
        Self { id, name }
    }

    /// Returns the default vocabulary seeded by the initial migration:
    /// `TODO`, `RUNNING`, `FINISHED` and `PENDING`, in identifier order.
    #[must_use]
    pub fn default_vocabulary() -> Vec<Self> {
        [(1, "TODO"), (2, "RUNNING"), (3, "FINISHED"), (4, "PENDING")]
            .into_iter()
            .map(|(id, name)| Self::new(StatusId::new(id), StatusName(name.to_owned())))
            .collect()
    }

    /// Returns the status identifier.
    #[must_use]
    pub const fn id(&self) -> StatusId {
        self.id
    }

    /// Returns the status name.
    #[must_use]
    pub const fn name(&self) -> &StatusName {
        &self.name
    }
}

/// An append-only record of a status assigned to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    id: HistoryEntryId,
    task_id: TaskId,
    status_id: Option<StatusId>,
    created_at: DateTime<Utc>,
}

impl StatusHistoryEntry {
    /// Reconstructs a history entry from storage.
    ///
    /// `status_id` is `None` when the referenced definition was removed.
    #[must_use]
    pub const fn from_persisted(
        id: HistoryEntryId,
        task_id: TaskId,
        status_id: Option<StatusId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            task_id,
            status_id,
            created_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> HistoryEntryId {
        self.id
    }

    /// Returns the task this entry belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the recorded status, if its definition still exists.
    #[must_use]
    pub const fn status_id(&self) -> Option<StatusId> {
        self.status_id
    }

    /// Returns when the status was recorded.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Ordering key for "most recent" resolution: timestamp first, then
    /// identifier so equal timestamps still resolve deterministically.
    #[must_use]
    pub const fn recency(&self) -> (DateTime<Utc>, HistoryEntryId) {
        (self.created_at, self.id)
    }
}
