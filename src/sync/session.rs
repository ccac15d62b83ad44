//! Save-session state machine for debounced autosave.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Visible status of an autosave session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    /// No edits outstanding and nothing to report.
    Idle,
    /// Edits received; a save is scheduled after the quiet period.
    Pending,
    /// A save is executing against the remote store.
    Saving,
    /// The last save succeeded; reverts to idle after the display window.
    Saved,
    /// The last save failed; reverts to idle after the display window.
    Error,
}

impl SaveStatus {
    /// Returns the canonical lowercase representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Saving => "saving",
            Self::Saved => "saved",
            Self::Error => "error",
        }
    }
}

/// Timing configuration for a save session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncPolicy {
    /// Quiet period measured from the most recent edit before a save fires.
    pub quiet_period: Duration,
    /// How long a successful save is displayed before reverting to idle.
    pub saved_window: Duration,
    /// How long a failed save is displayed before reverting to idle.
    pub error_window: Duration,
}

impl SyncPolicy {
    /// Creates a policy from explicit windows.
    #[must_use]
    pub const fn new(quiet_period: Duration, saved_window: Duration, error_window: Duration) -> Self {
        Self {
            quiet_period,
            saved_window,
            error_window,
        }
    }

    /// Policy that makes every triggered snapshot immediately due.
    ///
    /// Useful for integration tests that drive the synchroniser without a
    /// stepped clock.
    #[must_use]
    pub fn immediate() -> Self {
        Self::new(Duration::zero(), Duration::zero(), Duration::zero())
    }
}

impl Default for SyncPolicy {
    fn default() -> Self {
        Self::new(
            Duration::milliseconds(1500),
            Duration::milliseconds(2000),
            Duration::milliseconds(3000),
        )
    }
}

/// Clock-driven state machine owning the pending snapshot for one editor.
///
/// The session never performs I/O itself: a driver asks it which snapshot is
/// due via [`SaveSession::begin_due_save`] and reports completion via
/// [`SaveSession::finish_save`]. Snapshots triggered while a save is in
/// flight replace each other and are handed back as an immediately-due
/// follow-up save, which keeps saves strictly serialised.
#[derive(Debug)]
pub struct SaveSession<S> {
    policy: SyncPolicy,
    status: SaveStatus,
    pending: Option<S>,
    in_flight: bool,
    debounce_deadline: Option<DateTime<Utc>>,
    revert_deadline: Option<DateTime<Utc>>,
    closed: bool,
}

impl<S> SaveSession<S> {
    /// Creates an idle session with the given timing policy.
    #[must_use]
    pub const fn new(policy: SyncPolicy) -> Self {
        Self {
            policy,
            status: SaveStatus::Idle,
            pending: None,
            in_flight: false,
            debounce_deadline: None,
            revert_deadline: None,
            closed: false,
        }
    }

    /// Returns the currently visible status.
    #[must_use]
    pub const fn status(&self) -> SaveStatus {
        self.status
    }

    /// Returns whether the owning editor has closed the session.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns whether a snapshot is waiting for the quiet period to elapse
    /// or for an in-flight save to complete.
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Records an edit: replaces the pending snapshot and resets the
    /// trailing-edge debounce deadline. Status becomes `Pending`
    /// synchronously. Ignored once the session is closed.
    pub fn trigger(&mut self, snapshot: S, now: DateTime<Utc>) {
        if self.closed {
            return;
        }
        self.pending = Some(snapshot);
        self.debounce_deadline = Some(now + self.policy.quiet_period);
        self.revert_deadline = None;
        self.status = SaveStatus::Pending;
    }

    /// Takes the pending snapshot when it is due and no save is executing.
    ///
    /// Transitions the session to `Saving`. Returns `None` when nothing is
    /// due yet, a save is already in flight, or the session is closed.
    pub fn begin_due_save(&mut self, now: DateTime<Utc>) -> Option<S> {
        if self.closed || self.in_flight || self.pending.is_none() {
            return None;
        }
        let deadline = self.debounce_deadline?;
        if now < deadline {
            return None;
        }
        self.in_flight = true;
        self.debounce_deadline = None;
        self.status = SaveStatus::Saving;
        self.pending.take()
    }

    /// Completes the in-flight save.
    ///
    /// When an edit arrived mid-flight, the replacement snapshot is returned
    /// as an immediately-due follow-up save and the session stays `Saving`.
    /// Otherwise the session displays `Saved` or `Error` for the configured
    /// window. A failed snapshot is never retried: only a subsequent edit
    /// schedules another save. After close, completion is fire-and-forget
    /// and no status is updated.
    pub fn finish_save(&mut self, success: bool, now: DateTime<Utc>) -> Option<S> {
        if !self.in_flight {
            return None;
        }
        self.in_flight = false;
        if self.closed {
            self.pending = None;
            return None;
        }
        if self.pending.is_some() {
            self.in_flight = true;
            self.debounce_deadline = None;
            self.status = SaveStatus::Saving;
            return self.pending.take();
        }
        if success {
            self.status = SaveStatus::Saved;
            self.revert_deadline = Some(now + self.policy.saved_window);
        } else {
            self.status = SaveStatus::Error;
            self.revert_deadline = Some(now + self.policy.error_window);
        }
        None
    }

    /// Reverts `Saved`/`Error` display states to `Idle` once their window
    /// has elapsed.
    pub fn expire_display(&mut self, now: DateTime<Utc>) {
        if self.closed {
            return;
        }
        if !matches!(self.status, SaveStatus::Saved | SaveStatus::Error) {
            return;
        }
        if self.revert_deadline.is_some_and(|deadline| now >= deadline) {
            self.status = SaveStatus::Idle;
            self.revert_deadline = None;
        }
    }

    /// Closes the session: the pending debounce is cancelled, further
    /// triggers are ignored, and an in-flight save completes without any
    /// further status updates.
    pub fn close(&mut self) {
        self.closed = true;
        self.pending = None;
        self.debounce_deadline = None;
        self.revert_deadline = None;
    }

    /// Returns the next instant at which the session wants to be polled, if
    /// any (the debounce deadline or a display-window expiry).
    #[must_use]
    pub fn next_wakeup(&self) -> Option<DateTime<Utc>> {
        match (self.debounce_deadline, self.revert_deadline) {
            (Some(debounce), Some(revert)) => Some(debounce.min(revert)),
            (Some(deadline), None) | (None, Some(deadline)) => Some(deadline),
            (None, None) => None,
        }
    }
}
