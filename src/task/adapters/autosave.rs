//! Snapshot writer persisting setup-editor snapshots through the repository.

use async_trait::async_trait;
use std::sync::Arc;

use crate::sync::{SnapshotWriter, SyncFailure};
use crate::task::{
    domain::{TaskId, TaskSetup},
    ports::TaskRepository,
};

/// Persists whole-object setup snapshots for one task.
pub struct SetupSaver<R>
where
    R: TaskRepository,
{
    repository: Arc<R>,
    task_id: TaskId,
}

impl<R> SetupSaver<R>
where
    R: TaskRepository,
{
    /// Creates a saver bound to one task.
    #[must_use]
    pub const fn new(repository: Arc<R>, task_id: TaskId) -> Self {
        Self {
            repository,
            task_id,
        }
    }
}

#[async_trait]
impl<R> SnapshotWriter<TaskSetup> for SetupSaver<R>
where
    R: TaskRepository,
{
    async fn save(&self, snapshot: TaskSetup) -> Result<(), SyncFailure> {
        self.repository
            .update_setup(self.task_id, snapshot)
            .await
            .map(|_| ())
            .map_err(SyncFailure::from_source)
    }
}
