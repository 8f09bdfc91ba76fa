//! In-memory task store for tests and embedding.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{
        HistoryEntryId, NewTask, OwnerId, StatusHistoryEntry, StatusId, Task, TaskId, TaskStatus,
    },
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Identifiers are assigned from monotonically increasing counters starting
/// at 1, mirroring `BIGSERIAL` columns. Multi-record writes happen under a
/// single write lock.
#[derive(Debug, Clone)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    statuses: BTreeMap<StatusId, TaskStatus>,
    history: Vec<StatusHistoryEntry>,
    last_task_id: i64,
    last_entry_id: i64,
}

impl InMemoryTaskState {
    fn append_entry(
        &mut self,
        task_id: TaskId,
        status: StatusId,
        recorded_at: DateTime<Utc>,
    ) -> StatusHistoryEntry {
        self.last_entry_id += 1;
        let entry = StatusHistoryEntry::from_persisted(
            HistoryEntryId::new(self.last_entry_id),
            task_id,
            Some(status),
            recorded_at,
        );
        self.history.push(entry.clone());
        entry
    }

    fn latest_entry(&self, task_id: TaskId) -> Option<&StatusHistoryEntry> {
        self.history
            .iter()
            .filter(|entry| entry.task_id() == task_id)
            .max_by_key(|entry| entry.recency())
    }
}

impl InMemoryTaskStore {
    /// Creates a store seeded with the default status vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self::with_statuses(TaskStatus::default_vocabulary())
    }

    /// Creates a store seeded with the given status vocabulary.
    #[must_use]
    pub fn with_statuses(statuses: impl IntoIterator<Item = TaskStatus>) -> Self {
        let state = InMemoryTaskState {
            statuses: statuses
                .into_iter()
                .map(|status| (status.id(), status))
                .collect(),
            ..InMemoryTaskState::default()
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Removes a status definition, nulling the references held by history
    /// entries the way `ON DELETE SET NULL` does.
    ///
    /// Returns whether a definition was removed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the lock is poisoned.
    pub fn remove_status(&self, id: StatusId) -> TaskStoreResult<bool> {
        let mut state = self.write()?;
        if state.statuses.remove(&id).is_none() {
            return Ok(false);
        }
        for entry in &mut state.history {
            if entry.status_id() == Some(id) {
                *entry = StatusHistoryEntry::from_persisted(
                    entry.id(),
                    entry.task_id(),
                    None,
                    entry.created_at(),
                );
            }
        }
        Ok(true)
    }

    /// Appends a history entry directly, bypassing the task write path.
    ///
    /// Useful for reproducing histories recorded by other writers.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] for an unknown task,
    /// [`TaskStoreError::UnknownStatus`] for an unknown status, or
    /// [`TaskStoreError::Persistence`] when the lock is poisoned.
    pub fn record_status(
        &self,
        task_id: TaskId,
        status: StatusId,
        recorded_at: DateTime<Utc>,
    ) -> TaskStoreResult<StatusHistoryEntry> {
        let mut state = self.write()?;
        if !state.tasks.contains_key(&task_id) {
            return Err(TaskStoreError::NotFound(task_id));
        }
        if !state.statuses.contains_key(&status) {
            return Err(TaskStoreError::UnknownStatus(status));
        }
        Ok(state.append_entry(task_id, status, recorded_at))
    }

    fn read(&self) -> TaskStoreResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TaskStoreResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert_with_status(
        &self,
        task: &NewTask,
        initial_status: StatusId,
    ) -> TaskStoreResult<(Task, StatusHistoryEntry)> {
        let mut state = self.write()?;
        if !state.statuses.contains_key(&initial_status) {
            return Err(TaskStoreError::UnknownStatus(initial_status));
        }

        state.last_task_id += 1;
        let created = task.clone().into_task(TaskId::new(state.last_task_id));
        state.tasks.insert(created.id(), created.clone());
        let entry = state.append_entry(created.id(), initial_status, created.created_at());
        Ok((created, entry))
    }

    async fn find_owned(&self, owner: OwnerId, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self.read()?;
        Ok(state
            .tasks
            .get(&id)
            .filter(|task| task.is_owned_by(owner))
            .cloned())
    }

    async fn list_owned(&self, owner: OwnerId) -> TaskStoreResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.is_owned_by(owner))
            .cloned()
            .collect())
    }

    async fn current_status(&self, task_id: TaskId) -> TaskStoreResult<Option<TaskStatus>> {
        let state = self.read()?;
        Ok(state
            .latest_entry(task_id)
            .and_then(StatusHistoryEntry::status_id)
            .and_then(|status_id| state.statuses.get(&status_id))
            .cloned())
    }

    async fn history(&self, task_id: TaskId) -> TaskStoreResult<Vec<StatusHistoryEntry>> {
        let state = self.read()?;
        let mut entries: Vec<StatusHistoryEntry> = state
            .history
            .iter()
            .filter(|entry| entry.task_id() == task_id)
            .cloned()
            .collect();
        entries.sort_by_key(StatusHistoryEntry::recency);
        Ok(entries)
    }

    async fn find_status_by_name(&self, name: &str) -> TaskStoreResult<Option<TaskStatus>> {
        let state = self.read()?;
        Ok(state
            .statuses
            .values()
            .find(|status| status.name().as_str() == name)
            .cloned())
    }

    async fn statuses(&self) -> TaskStoreResult<Vec<TaskStatus>> {
        let state = self.read()?;
        Ok(state.statuses.values().cloned().collect())
    }

    async fn save_with_status(
        &self,
        task: &Task,
        status: StatusId,
        recorded_at: DateTime<Utc>,
    ) -> TaskStoreResult<StatusHistoryEntry> {
        let mut state = self.write()?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskStoreError::NotFound(task.id()));
        }
        if !state.statuses.contains_key(&status) {
            return Err(TaskStoreError::UnknownStatus(status));
        }

        state.tasks.insert(task.id(), task.clone());
        Ok(state.append_entry(task.id(), status, recorded_at))
    }

    async fn delete_owned(&self, owner: OwnerId, id: TaskId) -> TaskStoreResult<Option<TaskId>> {
        let mut state = self.write()?;
        let is_owned = state
            .tasks
            .get(&id)
            .is_some_and(|task| task.is_owned_by(owner));
        if !is_owned {
            return Ok(None);
        }

        state.tasks.remove(&id);
        state.history.retain(|entry| entry.task_id() != id);
        Ok(Some(id))
    }
}
