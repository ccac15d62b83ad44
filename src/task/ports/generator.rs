//! Generator port for AI asset production.

use crate::task::domain::{ArtifactSlot, ArtifactValue};
use async_trait::async_trait;
use thiserror::Error;

/// Context handed to a generator for one slot.
///
/// Built by the workflow from the setup fields and prior approved
/// artifacts; the generator treats it as a single request and returns a
/// single response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationContext {
    /// Slot being generated.
    pub slot: ArtifactSlot,
    /// Default generation instructions rendered from the setup fields.
    pub instructions: String,
    /// Prompt of the approved artifact this generation derives from, if
    /// any (fashion angles derive from the approved main frame).
    pub reference_prompt: Option<String>,
    /// Asset reference this generation derives from, if any (fashion
    /// angles reference the main frame image; podcaster video references
    /// the audio asset).
    pub reference_value: Option<ArtifactValue>,
    /// Free-text steering instructions appended on regeneration.
    pub custom_instructions: Option<String>,
}

/// A freshly generated asset and the prompt that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Generated asset reference.
    pub value: ArtifactValue,
    /// Prompt the provider actually used.
    pub prompt: String,
}

/// External AI generation contract, one implementation per artifact kind.
#[async_trait]
pub trait ArtifactGenerator: Send + Sync {
    /// Generates one asset from the given context.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError`] when the provider call fails; failures
    /// are transient and retried only by explicit user action.
    async fn generate(&self, context: GenerationContext)
    -> Result<GeneratedArtifact, GeneratorError>;
}

/// Errors returned by artifact generators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// The provider could not be reached or timed out.
    #[error("generator transport failure: {0}")]
    Transport(String),

    /// The provider refused the generation request.
    #[error("generation rejected: {0}")]
    Rejected(String),
}
