//! Debounced snapshot synchronisation for editor autosave.
//!
//! Editors of task and blogger data produce a stream of whole-object
//! snapshots on every keystroke. This module coalesces that stream into a
//! bounded number of writes: a trailing-edge debounce collects rapid edits,
//! at most one save is ever in flight, and the remote store eventually
//! reflects the last snapshot triggered. Status is reported through an
//! explicit state machine (`idle -> pending -> saving -> {saved | error} ->
//! idle`) driven by an injected clock, so the behaviour is testable without
//! real timers.

mod session;
mod synchronizer;

pub use session::{SaveSession, SaveStatus, SyncPolicy};
pub use synchronizer::{DebouncedSynchronizer, SnapshotWriter, SyncFailure};

#[cfg(test)]
mod tests;
