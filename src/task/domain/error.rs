//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the persisted column width.
    #[error("task title exceeds {max} characters: '{title}'")]
    TitleTooLong {
        /// Rejected title.
        title: String,
        /// Maximum accepted length in characters.
        max: usize,
    },

    /// The status name is empty after trimming.
    #[error("status name must not be empty")]
    EmptyStatusName,

    /// The status name exceeds the persisted column width.
    #[error("status name exceeds {max} characters: '{name}'")]
    StatusNameTooLong {
        /// Rejected name.
        name: String,
        /// Maximum accepted length in characters.
        max: usize,
    },
}
