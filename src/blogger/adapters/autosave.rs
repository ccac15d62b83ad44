//! Snapshot writer persisting profile-editor drafts through the repository.

use async_trait::async_trait;
use std::sync::Arc;

use crate::blogger::{
    domain::{BloggerId, ProfileDraft},
    ports::BloggerRepository,
};
use crate::sync::{SnapshotWriter, SyncFailure};
use mockable::Clock;

/// Persists whole-object profile drafts for one blogger.
///
/// Each save loads the current aggregate, applies the draft and writes it
/// back, so catalogue edits made through other paths are never clobbered.
pub struct ProfileSaver<R, C>
where
    R: BloggerRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    blogger_id: BloggerId,
}

impl<R, C> ProfileSaver<R, C>
where
    R: BloggerRepository,
    C: Clock + Send + Sync,
{
    /// Creates a saver bound to one blogger profile.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, blogger_id: BloggerId) -> Self {
        Self {
            repository,
            clock,
            blogger_id,
        }
    }
}

#[async_trait]
impl<R, C> SnapshotWriter<ProfileDraft> for ProfileSaver<R, C>
where
    R: BloggerRepository,
    C: Clock + Send + Sync,
{
    async fn save(&self, snapshot: ProfileDraft) -> Result<(), SyncFailure> {
        let mut blogger = self
            .repository
            .find_by_id(self.blogger_id)
            .await
            .map_err(SyncFailure::from_source)?
            .ok_or_else(|| SyncFailure::new(format!("blogger not found: {}", self.blogger_id)))?;
        blogger
            .apply_profile(snapshot, self.clock.as_ref())
            .map_err(SyncFailure::from_source)?;
        self.repository
            .update(&blogger)
            .await
            .map_err(SyncFailure::from_source)
    }
}
