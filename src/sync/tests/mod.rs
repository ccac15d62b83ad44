//! Unit tests for the autosave session and synchroniser.
#![expect(
    clippy::expect_used,
    reason = "tests fail loudly when fixtures cannot be built"
)]

mod session_tests;

use super::{SnapshotWriter, SyncFailure};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::Mutex;

/// Deterministic clock stepped manually by the tests.
#[derive(Debug)]
pub struct TestClock {
    now: Mutex<DateTime<Utc>>,
}

impl TestClock {
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp");
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock().expect("clock mutex poisoned");
        *now += delta;
    }
}

impl Clock for TestClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock mutex poisoned")
    }
}

/// Writer recording every snapshot it is asked to persist.
#[derive(Debug)]
pub struct RecordingWriter<S> {
    state: Mutex<RecordingState<S>>,
}

#[derive(Debug)]
struct RecordingState<S> {
    saves: Vec<S>,
    failures_remaining: u32,
}

impl<S> RecordingWriter<S> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RecordingState {
                saves: Vec::new(),
                failures_remaining: 0,
            }),
        }
    }

    /// Makes the next `count` saves fail with a simulated transport error.
    pub fn fail_next(&self, count: u32) {
        let mut state = self.state.lock().expect("writer mutex poisoned");
        state.failures_remaining = count;
    }

    pub fn save_count(&self) -> usize {
        let state = self.state.lock().expect("writer mutex poisoned");
        state.saves.len()
    }
}

impl<S: Clone> RecordingWriter<S> {
    pub fn saves(&self) -> Vec<S> {
        let state = self.state.lock().expect("writer mutex poisoned");
        state.saves.clone()
    }
}

#[async_trait]
impl<S: Send + 'static> SnapshotWriter<S> for RecordingWriter<S> {
    async fn save(&self, snapshot: S) -> Result<(), SyncFailure> {
        let mut state = self
            .state
            .lock()
            .map_err(|err| SyncFailure::new(err.to_string()))?;
        if state.failures_remaining > 0 {
            state.failures_remaining -= 1;
            return Err(SyncFailure::new("simulated transport error"));
        }
        state.saves.push(snapshot);
        Ok(())
    }
}
