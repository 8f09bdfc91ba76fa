//! Shared test helpers for in-memory integration tests.

use mockable::DefaultClock;
use rstest::fixture;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use taskledger::task::{adapters::memory::InMemoryTaskStore, api::TaskApi, services::TaskService};

/// API type under test.
pub type MemoryApi = TaskApi<InMemoryTaskStore, DefaultClock>;

/// Provides a task API over a freshly seeded in-memory store.
#[fixture]
pub fn api() -> MemoryApi {
    let store = Arc::new(InMemoryTaskStore::new());
    TaskApi::new(TaskService::new(store, Arc::new(DefaultClock)))
}

/// Parses an inbound request body.
///
/// # Errors
///
/// Returns an error if the JSON does not match the payload shape.
pub fn payload<T: DeserializeOwned>(body: serde_json::Value) -> eyre::Result<T> {
    Ok(serde_json::from_value(body)?)
}

/// Renders an outbound response body.
///
/// # Errors
///
/// Returns an error if the body cannot be serialized.
pub fn render<T: Serialize>(body: Option<T>) -> eyre::Result<serde_json::Value> {
    Ok(serde_json::to_value(body)?)
}
