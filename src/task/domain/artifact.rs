//! Generated artifacts and the per-task artifact store.

use super::TaskDomainError;
use crate::blogger::domain::BloggerFamily;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Named slot an artifact occupies within a task.
///
/// Slots are fixed per content family and pipeline step.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactSlot {
    /// Fashion main frame (9:16 portrait).
    Main,
    /// Fashion close-up angle frame.
    Angle1,
    /// Fashion medium-shot angle frame.
    Angle2,
    /// Fashion detail-shot angle frame.
    Angle3,
    /// Podcaster voiceover audio.
    Audio,
    /// Podcaster lip-sync video.
    Video,
}

impl ArtifactSlot {
    /// All fashion angle slots in pipeline order.
    pub const ANGLES: [Self; 3] = [Self::Angle1, Self::Angle2, Self::Angle3];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Angle1 => "angle1",
            Self::Angle2 => "angle2",
            Self::Angle3 => "angle3",
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }

    /// Returns the content family whose pipeline owns this slot.
    #[must_use]
    pub const fn family(self) -> BloggerFamily {
        match self {
            Self::Main | Self::Angle1 | Self::Angle2 | Self::Angle3 => BloggerFamily::Fashion,
            Self::Audio | Self::Video => BloggerFamily::Podcaster,
        }
    }
}

impl fmt::Display for ArtifactSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque reference to a generated asset (URL or equivalent handle).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactValue(String);

impl ArtifactValue {
    /// Wraps an asset reference.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A generated asset together with its prompt and approval flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    value: ArtifactValue,
    prompt: String,
    approved: bool,
}

impl Artifact {
    /// Returns the generated asset reference.
    #[must_use]
    pub const fn value(&self) -> &ArtifactValue {
        &self.value
    }

    /// Returns the generation prompt.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Returns whether the artifact has been explicitly approved.
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        self.approved
    }
}

/// Outcome of a bulk approval: slots are independent, so a missing artifact
/// in one slot never blocks approval of the others.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApprovalReport {
    /// Slots whose artifacts were approved by this call.
    pub approved: Vec<ArtifactSlot>,
    /// Slots that had no artifact to approve.
    pub missing: Vec<ArtifactSlot>,
}

impl ApprovalReport {
    /// Returns whether every requested slot was approved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Per-task mapping from slot to artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactStore {
    artifacts: BTreeMap<ArtifactSlot, Artifact>,
}

impl ArtifactStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            artifacts: BTreeMap::new(),
        }
    }

    /// Returns the artifact in `slot`, if one has been generated.
    #[must_use]
    pub fn get(&self, slot: ArtifactSlot) -> Option<&Artifact> {
        self.artifacts.get(&slot)
    }

    /// Returns whether `slot` holds an approved artifact.
    #[must_use]
    pub fn is_approved(&self, slot: ArtifactSlot) -> bool {
        self.get(slot).is_some_and(Artifact::is_approved)
    }

    /// Installs a newly generated artifact, replacing any prior one.
    ///
    /// Generation and regeneration both route through here, and the
    /// installed artifact always starts unapproved: replacing an approved
    /// artifact revokes its approval atomically with the new value.
    pub fn put(&mut self, slot: ArtifactSlot, value: ArtifactValue, prompt: impl Into<String>) {
        self.artifacts.insert(
            slot,
            Artifact {
                value,
                prompt: prompt.into(),
                approved: false,
            },
        );
    }

    /// Approves the artifact in `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ArtifactNotFound`] when the slot is empty;
    /// the store is left unchanged.
    pub fn approve(&mut self, slot: ArtifactSlot) -> Result<(), TaskDomainError> {
        let artifact = self
            .artifacts
            .get_mut(&slot)
            .ok_or(TaskDomainError::ArtifactNotFound(slot))?;
        artifact.approved = true;
        Ok(())
    }

    /// Approves each of the given slots independently.
    ///
    /// There is no cross-slot atomicity: slots with artifacts are approved
    /// and empty slots are reported back, in the order given.
    pub fn approve_all(&mut self, slots: impl IntoIterator<Item = ArtifactSlot>) -> ApprovalReport {
        let mut report = ApprovalReport::default();
        for slot in slots {
            match self.approve(slot) {
                Ok(()) => report.approved.push(slot),
                Err(_) => report.missing.push(slot),
            }
        }
        report
    }

    /// Rewrites the prompt of an existing artifact.
    ///
    /// This is an annotation, not a regeneration: the value and approval
    /// flag are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ArtifactNotFound`] when the slot is empty.
    pub fn edit_prompt(
        &mut self,
        slot: ArtifactSlot,
        new_prompt: impl Into<String>,
    ) -> Result<(), TaskDomainError> {
        let artifact = self
            .artifacts
            .get_mut(&slot)
            .ok_or(TaskDomainError::ArtifactNotFound(slot))?;
        artifact.prompt = new_prompt.into();
        Ok(())
    }

    /// Iterates over the occupied slots and their artifacts.
    pub fn iter(&self) -> impl Iterator<Item = (ArtifactSlot, &Artifact)> {
        self.artifacts.iter().map(|(slot, artifact)| (*slot, artifact))
    }

    /// Returns whether no artifact has been generated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}
