//! Shared fixtures for the integration tests.

use async_trait::async_trait;
use atelier::task::domain::ArtifactValue;
use atelier::task::ports::{
    ArtifactGenerator, GeneratedArtifact, GenerationContext, GeneratorError,
};
use std::sync::Mutex;

/// Generator answering every request with a synthetic asset reference.
#[derive(Debug, Default)]
pub struct RecordingGenerator {
    calls: Mutex<u32>,
}

impl RecordingGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> u32 {
        self.calls.lock().map(|calls| *calls).unwrap_or_default()
    }
}

#[async_trait]
impl ArtifactGenerator for RecordingGenerator {
    async fn generate(
        &self,
        context: GenerationContext,
    ) -> Result<GeneratedArtifact, GeneratorError> {
        let mut calls = self
            .calls
            .lock()
            .map_err(|err| GeneratorError::Transport(err.to_string()))?;
        *calls += 1;
        Ok(GeneratedArtifact {
            value: ArtifactValue::new(format!(
                "https://cdn.example/{}-{}.bin",
                context.slot, *calls
            )),
            prompt: context.instructions,
        })
    }
}
