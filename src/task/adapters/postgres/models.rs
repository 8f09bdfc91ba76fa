//! Diesel row models for task persistence.

use super::schema::{task_status_history, task_statuses, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for task records. The identifier comes from the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Mutable task columns. `None` description is written as SQL `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Query result row for status definitions.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_statuses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StatusRow {
    /// Status identifier.
    pub id: i64,
    /// Status name.
    pub name: String,
}

/// Query result row for status history entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_status_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct HistoryRow {
    /// Entry identifier.
    pub id: i64,
    /// Recording timestamp.
    pub created_at: DateTime<Utc>,
    /// Recorded status, if the definition still exists.
    pub status_id: Option<i64>,
    /// Owning task.
    pub task_id: i64,
}

/// Insert model for status history entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_status_history)]
pub struct NewHistoryRow {
    /// Recording timestamp.
    pub created_at: DateTime<Utc>,
    /// Recorded status.
    pub status_id: Option<i64>,
    /// Owning task.
    pub task_id: i64,
}
