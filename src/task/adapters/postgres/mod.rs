//! `PostgreSQL` adapters for task persistence.

mod migrations;
mod models;
mod schema;
mod store;

pub use migrations::{MIGRATIONS, apply_migrations};
pub use store::{PostgresTaskStore, TaskPgPool};
