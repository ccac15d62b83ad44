//! In-memory repository for workflow and lifecycle tests.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::blogger::domain::BloggerId;
use crate::task::{
    domain::{ContentPatch, Task, TaskId, TaskSetup, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Targeted updates mutate the stored aggregate through its domain
/// methods, so the adapter needs a clock for the update timestamps.
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<InMemoryTaskState>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    blogger_index: HashMap<BloggerId, Vec<TaskId>>,
}

impl<C> InMemoryTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTaskState::default())),
            clock,
        }
    }

    fn with_task<T>(
        &self,
        id: TaskId,
        mutate: impl FnOnce(&mut Task) -> TaskRepositoryResult<T>,
    ) -> TaskRepositoryResult<T> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        mutate(task)
    }
}

#[async_trait]
impl<C> TaskRepository for InMemoryTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state
            .blogger_index
            .entry(task.blogger_id())
            .or_default()
            .push(task.id());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_by_blogger(&self, blogger_id: BloggerId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let tasks = state
            .blogger_index
            .get(&blogger_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.tasks.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(tasks)
    }

    async fn update_setup(&self, id: TaskId, setup: TaskSetup) -> TaskRepositoryResult<Task> {
        self.with_task(id, |task| {
            task.replace_setup(setup, &*self.clock)?;
            Ok(task.clone())
        })
    }

    async fn update_content(&self, id: TaskId, patch: ContentPatch) -> TaskRepositoryResult<Task> {
        self.with_task(id, |task| {
            task.apply_content(patch, &*self.clock);
            Ok(task.clone())
        })
    }

    async fn update_status(&self, id: TaskId, status: TaskStatus) -> TaskRepositoryResult<Task> {
        self.with_task(id, |task| {
            task.set_status(status, &*self.clock)?;
            Ok(task.clone())
        })
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let task = state
            .tasks
            .remove(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        if let Some(ids) = state.blogger_index.get_mut(&task.blogger_id()) {
            ids.retain(|candidate| *candidate != id);
            if ids.is_empty() {
                state.blogger_index.remove(&task.blogger_id());
            }
        }
        Ok(())
    }
}
