//! Service layer for task creation, retrieval, and explicit commands.

use crate::blogger::domain::{BloggerFamily, BloggerId};
use crate::task::{
    domain::{ContentPatch, Task, TaskDomainError, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    blogger_id: BloggerId,
    family: BloggerFamily,
    date: NaiveDate,
    content_type: String,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields and the default content
    /// type.
    #[must_use]
    pub fn new(blogger_id: BloggerId, family: BloggerFamily, date: NaiveDate) -> Self {
        Self {
            blogger_id,
            family,
            date,
            content_type: "post".to_owned(),
        }
    }

    /// Sets the content type label.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a draft task for a blogger on a given date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the repository
    /// rejects persistence.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let task = Task::new(
            request.blogger_id,
            request.family,
            request.date,
            request.content_type,
            &*self.clock,
        );
        self.repository.store(&task).await?;
        info!(task_id = %task.id(), family = %task.family(), "task created");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when no such task exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn get(&self, id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists all tasks belonging to a blogger.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_for_blogger(&self, blogger_id: BloggerId) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.find_by_blogger(blogger_id).await?)
    }

    /// Patches the idea/script fields of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the task does not
    /// exist or persistence fails.
    pub async fn update_content(
        &self,
        id: TaskId,
        patch: ContentPatch,
    ) -> TaskLifecycleResult<Task> {
        Ok(self.repository.update_content(id, patch).await?)
    }

    /// Explicitly sets a task's lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the task does not
    /// exist, the status belongs to the other family, or persistence fails.
    pub async fn update_status(&self, id: TaskId, status: TaskStatus) -> TaskLifecycleResult<Task> {
        let task = self.repository.update_status(id, status).await?;
        info!(task_id = %id, status = %status, "task status updated");
        Ok(task)
    }

    /// Deletes a task. This is always an explicit command.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the task does not
    /// exist or persistence fails.
    pub async fn delete(&self, id: TaskId) -> TaskLifecycleResult<()> {
        self.repository.delete(id).await?;
        info!(task_id = %id, "task deleted");
        Ok(())
    }
}
