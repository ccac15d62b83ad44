//! Driver binding a save session to a snapshot writer and a clock.

use super::{SaveSession, SaveStatus, SyncPolicy};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Failure raised when a snapshot could not be written to the remote store.
///
/// Autosave failures are transient: they surface through
/// [`SaveStatus::Error`] and never propagate further, because the next edit
/// decides whether a retry happens.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("snapshot save failed: {message}")]
pub struct SyncFailure {
    message: String,
}

impl SyncFailure {
    /// Creates a failure carrying a human-readable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Wraps an underlying error.
    pub fn from_source(err: impl std::error::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Destination for coalesced snapshots.
#[async_trait]
pub trait SnapshotWriter<S: Send + 'static>: Send + Sync {
    /// Persists one snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SyncFailure`] when the write could not be completed.
    async fn save(&self, snapshot: S) -> Result<(), SyncFailure>;
}

/// Coalescing-save primitive for one editor session.
///
/// [`DebouncedSynchronizer::trigger`] accepts a snapshot on every edit and
/// is cheap and synchronous; [`DebouncedSynchronizer::flush_due`] performs
/// whatever work has become due. Saves are strictly serialised: a snapshot
/// arriving mid-save replaces any queued one and is written as soon as the
/// in-flight save completes.
pub struct DebouncedSynchronizer<S, W, C>
where
    S: Send + 'static,
    W: SnapshotWriter<S>,
    C: Clock + Send + Sync,
{
    session: SaveSession<S>,
    writer: Arc<W>,
    clock: Arc<C>,
}

impl<S, W, C> DebouncedSynchronizer<S, W, C>
where
    S: Send + 'static,
    W: SnapshotWriter<S>,
    C: Clock + Send + Sync,
{
    /// Creates a synchroniser over the given writer and clock.
    #[must_use]
    pub const fn new(writer: Arc<W>, clock: Arc<C>, policy: SyncPolicy) -> Self {
        Self {
            session: SaveSession::new(policy),
            writer,
            clock,
        }
    }

    /// Records an edit; see [`SaveSession::trigger`].
    pub fn trigger(&mut self, snapshot: S) {
        let now = self.clock.utc();
        self.session.trigger(snapshot, now);
    }

    /// Returns the currently visible save status.
    #[must_use]
    pub const fn status(&self) -> SaveStatus {
        self.session.status()
    }

    /// Returns the next instant at which [`Self::flush_due`] has work.
    #[must_use]
    pub fn next_wakeup(&self) -> Option<DateTime<Utc>> {
        self.session.next_wakeup()
    }

    /// Performs every save that has become due, including follow-up saves
    /// queued while a write was in flight. Returns the number of writes
    /// performed.
    pub async fn flush_due(&mut self) -> usize {
        let now = self.clock.utc();
        self.session.expire_display(now);
        let Some(first) = self.session.begin_due_save(now) else {
            return 0;
        };
        let mut completed = 0_usize;
        let mut snapshot = first;
        loop {
            let outcome = self.writer.save(snapshot).await;
            completed += 1;
            let finished_at = self.clock.utc();
            let success = match outcome {
                Ok(()) => {
                    debug!("autosave write completed");
                    true
                }
                Err(failure) => {
                    warn!(error = %failure, "autosave write failed");
                    false
                }
            };
            match self.session.finish_save(success, finished_at) {
                Some(next) => snapshot = next,
                None => break,
            }
        }
        completed
    }

    /// Closes the owning editor's session; see [`SaveSession::close`].
    pub fn close(&mut self) {
        self.session.close();
    }
}
