//! Shared world state for task tracking BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskledger::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{OwnerId, Task, TaskId},
    services::{TaskService, UpdateOutcome},
};

/// Service type used by the BDD world.
pub type TestTaskService = TaskService<InMemoryTaskStore, DefaultClock>;

/// Scenario world for task tracking behaviour tests.
pub struct TaskWorld {
    pub store: Arc<InMemoryTaskStore>,
    pub service: TestTaskService,
    pub users: HashMap<String, OwnerId>,
    pub last_created_task: Option<Task>,
    pub last_update: Option<UpdateOutcome>,
    pub last_delete: Option<Option<TaskId>>,
}

impl TaskWorld {
    /// Creates a world backed by a freshly seeded store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryTaskStore::new());
        let service = TaskService::new(Arc::clone(&store), Arc::new(DefaultClock));
        Self {
            store,
            service,
            users: HashMap::new(),
            last_created_task: None,
            last_update: None,
            last_delete: None,
        }
    }

    /// Looks up a named user registered by a given step.
    pub fn user(&self, name: &str) -> Result<OwnerId, eyre::Report> {
        self.users
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown user {name} in scenario world"))
    }

    /// Returns the task created most recently in the scenario.
    pub fn created_task(&self) -> Result<&Task, eyre::Report> {
        self.last_created_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no task created in scenario world"))
    }
}

impl Default for TaskWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskWorld {
    TaskWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
