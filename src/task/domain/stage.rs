//! Production stages and the per-family unlock rules.

use super::{ArtifactSlot, ArtifactStore, TaskSetup};
use crate::blogger::domain::BloggerFamily;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Production stage of a podcaster episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PodcasterStage {
    /// Write the episode script.
    Script,
    /// Choose location and animation frames.
    Setup,
    /// Generate the voiceover audio.
    Audio,
    /// Generate the lip-sync video.
    Video,
}

/// Production stage of a fashion post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FashionStage {
    /// Choose location and outfit.
    Setup,
    /// Generate the main frame.
    MainFrame,
    /// Generate the three angle variations.
    AdditionalFrames,
}

/// A pipeline stage tagged by content family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "family", content = "stage", rename_all = "snake_case")]
pub enum Stage {
    /// Stage within the podcaster pipeline.
    Podcaster(PodcasterStage),
    /// Stage within the fashion pipeline.
    Fashion(FashionStage),
}

impl Stage {
    /// Returns the content family this stage belongs to.
    #[must_use]
    pub const fn family(self) -> BloggerFamily {
        match self {
            Self::Podcaster(_) => BloggerFamily::Podcaster,
            Self::Fashion(_) => BloggerFamily::Fashion,
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Podcaster(PodcasterStage::Script) => "script",
            Self::Podcaster(PodcasterStage::Setup) | Self::Fashion(FashionStage::Setup) => "setup",
            Self::Podcaster(PodcasterStage::Audio) => "audio",
            Self::Podcaster(PodcasterStage::Video) => "video",
            Self::Fashion(FashionStage::MainFrame) => "main_frame",
            Self::Fashion(FashionStage::AdditionalFrames) => "additional_frames",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const PODCASTER_STAGES: [Stage; 4] = [
    Stage::Podcaster(PodcasterStage::Script),
    Stage::Podcaster(PodcasterStage::Setup),
    Stage::Podcaster(PodcasterStage::Audio),
    Stage::Podcaster(PodcasterStage::Video),
];

const FASHION_STAGES: [Stage; 3] = [
    Stage::Fashion(FashionStage::Setup),
    Stage::Fashion(FashionStage::MainFrame),
    Stage::Fashion(FashionStage::AdditionalFrames),
];

/// Inputs the unlock rules are evaluated against.
///
/// Unlock evaluation is a pure function of these fields: the same inputs
/// always produce the same answer, regardless of call order or history.
#[derive(Debug, Clone, Copy)]
pub struct StageInputs<'a> {
    /// Script text, empty when none has been written.
    pub script: &'a str,
    /// Current setup block.
    pub setup: &'a TaskSetup,
    /// Current artifact store.
    pub artifacts: &'a ArtifactStore,
}

/// Ordered stages and unlock rules for one content family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageGraph {
    family: BloggerFamily,
}

impl StageGraph {
    /// Returns the stage graph for a content family.
    #[must_use]
    pub const fn for_family(family: BloggerFamily) -> Self {
        Self { family }
    }

    /// Returns the content family this graph describes.
    #[must_use]
    pub const fn family(self) -> BloggerFamily {
        self.family
    }

    /// Returns the ordered stages of this family's pipeline.
    #[must_use]
    pub const fn stages(self) -> &'static [Stage] {
        match self.family {
            BloggerFamily::Podcaster => &PODCASTER_STAGES,
            BloggerFamily::Fashion => &FASHION_STAGES,
        }
    }

    /// Returns the first stage of this pipeline.
    #[must_use]
    pub const fn first_stage(self) -> Stage {
        match self.family {
            BloggerFamily::Podcaster => Stage::Podcaster(PodcasterStage::Script),
            BloggerFamily::Fashion => Stage::Fashion(FashionStage::Setup),
        }
    }

    /// Returns the position of `stage` within this pipeline, if it belongs
    /// to it.
    #[must_use]
    pub fn position(self, stage: Stage) -> Option<usize> {
        self.stages().iter().position(|candidate| *candidate == stage)
    }

    /// Returns the stage at `index`, if within the pipeline.
    #[must_use]
    pub fn stage_at(self, index: usize) -> Option<Stage> {
        self.stages().get(index).copied()
    }

    /// Evaluates whether `stage` is reachable given the current inputs.
    ///
    /// A stage from the other family's pipeline is never unlocked. The
    /// first stage of each pipeline is always unlocked.
    #[must_use]
    pub fn unlocked(self, stage: Stage, inputs: StageInputs<'_>) -> bool {
        if stage.family() != self.family {
            return false;
        }
        match stage {
            Stage::Podcaster(PodcasterStage::Script) | Stage::Fashion(FashionStage::Setup) => true,
            Stage::Podcaster(PodcasterStage::Setup) => !inputs.script.trim().is_empty(),
            Stage::Podcaster(PodcasterStage::Audio) => {
                inputs.setup.as_podcaster().is_some_and(|setup| {
                    setup.selected_location.is_some() && !setup.voiceover_text.trim().is_empty()
                })
            }
            Stage::Podcaster(PodcasterStage::Video) => {
                inputs.artifacts.get(ArtifactSlot::Audio).is_some()
            }
            Stage::Fashion(FashionStage::MainFrame) => inputs
                .setup
                .as_fashion()
                .and_then(|setup| setup.location.as_ref())
                .is_some_and(super::LocationChoice::is_usable),
            // The one approval-gated rule: presence of the main frame is
            // not enough, it must have been approved.
            Stage::Fashion(FashionStage::AdditionalFrames) => {
                inputs.artifacts.is_approved(ArtifactSlot::Main)
            }
        }
    }
}
