//! Unit tests for the workflow core.
#![expect(
    clippy::expect_used,
    reason = "tests fail loudly when fixtures cannot be built"
)]

mod workflow_tests;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::DefaultClock;
use std::sync::Mutex;

use crate::blogger::domain::{BloggerFamily, BloggerId};
use crate::task::domain::{ArtifactValue, Task};
use crate::task::ports::{
    ArtifactGenerator, GeneratedArtifact, GenerationContext, GeneratorError,
};

/// Fixed calendar date used across fixtures.
pub fn fixture_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 3).expect("valid fixture date")
}

/// Builds a draft fashion task.
pub fn fashion_task() -> Task {
    Task::new(
        BloggerId::new(),
        BloggerFamily::Fashion,
        fixture_date(),
        "post",
        &DefaultClock,
    )
}

/// Builds a draft podcaster task.
pub fn podcaster_task() -> Task {
    Task::new(
        BloggerId::new(),
        BloggerFamily::Podcaster,
        fixture_date(),
        "episode",
        &DefaultClock,
    )
}

/// Generator recording every context it receives and answering with
/// synthetic asset references.
#[derive(Debug)]
pub struct RecordingGenerator {
    state: Mutex<GeneratorState>,
}

#[derive(Debug, Default)]
struct GeneratorState {
    calls: Vec<GenerationContext>,
    failures_remaining: u32,
    produced: u32,
}

impl RecordingGenerator {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GeneratorState::default()),
        }
    }

    /// Makes the next `count` generations fail with a simulated transport
    /// error.
    pub fn fail_next(&self, count: u32) {
        let mut state = self.state.lock().expect("generator mutex poisoned");
        state.failures_remaining = count;
    }

    pub fn calls(&self) -> Vec<GenerationContext> {
        let state = self.state.lock().expect("generator mutex poisoned");
        state.calls.clone()
    }

    pub fn call_count(&self) -> usize {
        let state = self.state.lock().expect("generator mutex poisoned");
        state.calls.len()
    }
}

#[async_trait]
impl ArtifactGenerator for RecordingGenerator {
    async fn generate(
        &self,
        context: GenerationContext,
    ) -> Result<GeneratedArtifact, GeneratorError> {
        let mut state = self
            .state
            .lock()
            .map_err(|err| GeneratorError::Transport(err.to_string()))?;
        state.calls.push(context.clone());
        if state.failures_remaining > 0 {
            state.failures_remaining -= 1;
            return Err(GeneratorError::Transport(
                "simulated transport error".to_owned(),
            ));
        }
        state.produced += 1;
        let prompt = match context.custom_instructions {
            Some(custom) => format!("{} {custom}", context.instructions),
            None => context.instructions,
        };
        Ok(GeneratedArtifact {
            value: ArtifactValue::new(format!(
                "https://cdn.example/{}-{}.bin",
                context.slot, state.produced
            )),
            prompt,
        })
    }
}
