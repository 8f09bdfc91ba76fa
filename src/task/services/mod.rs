//! Application services for task tracking.

mod tracking;

pub use tracking::{
    CreateTaskRequest, TaskService, TaskServiceError, TaskServiceResult, TrackedTask,
    UpdateOutcome, UpdateTaskRequest,
};
