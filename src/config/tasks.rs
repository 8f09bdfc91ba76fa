//! Task service settings.

use crate::task::domain::StatusId;
use serde::{Deserialize, Serialize};

const fn default_initial_status_id() -> i64 {
    StatusId::INITIAL.value()
}

/// Settings for the task service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TasksConfig {
    /// Identifier of the seeded status every new task starts in.
    #[serde(default = "default_initial_status_id")]
    pub initial_status_id: i64,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            initial_status_id: default_initial_status_id(),
        }
    }
}

impl TasksConfig {
    /// Returns the configured initial status as a domain identifier.
    #[must_use]
    pub const fn initial_status(&self) -> StatusId {
        StatusId::new(self.initial_status_id)
    }
}
