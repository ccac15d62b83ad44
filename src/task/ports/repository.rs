//! Repository port for task persistence and targeted field updates.

use crate::blogger::domain::BloggerId;
use crate::task::domain::{ContentPatch, Task, TaskDomainError, TaskId, TaskSetup, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// The targeted update operations (`update_setup`, `update_content`,
/// `update_status`) carry PATCH semantics: fields they do not name are left
/// unchanged, and each is an atomic read-modify-write on the record keyed by
/// task id.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all tasks belonging to the given blogger.
    async fn find_by_blogger(&self, blogger_id: BloggerId) -> TaskRepositoryResult<Vec<Task>>;

    /// Replaces only the setup block of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist, or [`TaskRepositoryError::Domain`] when the snapshot belongs
    /// to the other content family.
    async fn update_setup(&self, id: TaskId, setup: TaskSetup) -> TaskRepositoryResult<Task>;

    /// Patches only the idea/script fields of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update_content(&self, id: TaskId, patch: ContentPatch) -> TaskRepositoryResult<Task>;

    /// Replaces only the lifecycle status of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist, or [`TaskRepositoryError::Domain`] when the status belongs to
    /// the other content family.
    async fn update_status(&self, id: TaskId, status: TaskStatus) -> TaskRepositoryResult<Task>;

    /// Deletes a task. Deletion is always an explicit command, never a side
    /// effect of another operation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A targeted update was refused by domain validation.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
