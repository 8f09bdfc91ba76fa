//! Domain model for task tracking.
//!
//! Tasks are owned by a single user and carry no status column of their own.
//! Their status is the latest entry of an append-only history that references
//! a fixed, seeded vocabulary.

mod error;
mod ids;
mod status;
mod task;

pub use error::TaskDomainError;
pub use ids::{HistoryEntryId, OwnerId, StatusId, TaskId};
pub use status::{StatusHistoryEntry, StatusName, TaskStatus};
pub use task::{NewTask, PersistedTaskData, Task, TaskTitle};
