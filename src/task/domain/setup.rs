//! Family-specific setup blocks edited before generation.

use super::TaskDomainError;
use crate::blogger::domain::{BloggerFamily, Outfit};
use serde::{Deserialize, Serialize};

/// Shooting-location choice: a preset from the blogger's catalogue or a
/// free-text description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocationChoice {
    /// Preset location from the blogger's catalogue.
    Preset {
        /// Index into the blogger's location catalogue.
        index: usize,
        /// Description copied from the preset at selection time.
        description: String,
    },
    /// Free-text location description.
    Custom(String),
}

impl LocationChoice {
    /// Returns the location description used when building generation
    /// context.
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::Preset { description, .. } => description,
            Self::Custom(description) => description,
        }
    }

    /// Returns whether the choice carries usable location information:
    /// a preset always does, a custom description only when non-blank.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        match self {
            Self::Preset { .. } => true,
            Self::Custom(description) => !description.trim().is_empty(),
        }
    }
}

/// Setup fields for a podcaster episode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodcasterSetup {
    /// Recording-location selection, if made.
    pub selected_location: Option<LocationChoice>,
    /// Animation frames chosen for lip-sync generation.
    pub selected_frames: Vec<String>,
    /// Voiceover text read by the synthesised voice.
    pub voiceover_text: String,
}

/// Setup fields for a fashion post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FashionSetup {
    /// Shooting-location selection, if made.
    pub location: Option<LocationChoice>,
    /// Outfit composed for the shoot, if chosen.
    pub outfit: Option<Outfit>,
}

/// Task setup block tagged by content family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum TaskSetup {
    /// Podcaster setup fields.
    Podcaster(PodcasterSetup),
    /// Fashion setup fields.
    Fashion(FashionSetup),
}

impl TaskSetup {
    /// Empty setup block for the given family.
    #[must_use]
    pub fn empty(family: BloggerFamily) -> Self {
        match family {
            BloggerFamily::Podcaster => Self::Podcaster(PodcasterSetup::default()),
            BloggerFamily::Fashion => Self::Fashion(FashionSetup::default()),
        }
    }

    /// Returns the content family this setup belongs to.
    #[must_use]
    pub const fn family(&self) -> BloggerFamily {
        match self {
            Self::Podcaster(_) => BloggerFamily::Podcaster,
            Self::Fashion(_) => BloggerFamily::Fashion,
        }
    }

    /// Returns the podcaster fields when this is a podcaster setup.
    #[must_use]
    pub const fn as_podcaster(&self) -> Option<&PodcasterSetup> {
        match self {
            Self::Podcaster(setup) => Some(setup),
            Self::Fashion(_) => None,
        }
    }

    /// Returns the fashion fields when this is a fashion setup.
    #[must_use]
    pub const fn as_fashion(&self) -> Option<&FashionSetup> {
        match self {
            Self::Podcaster(_) => None,
            Self::Fashion(setup) => Some(setup),
        }
    }

    /// Applies a single field update.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SetupFamilyMismatch`] when the field
    /// belongs to the other family; the setup is left unchanged.
    pub fn apply(&mut self, field: SetupField) -> Result<(), TaskDomainError> {
        match (self, field) {
            (Self::Podcaster(setup), SetupField::Location(location)) => {
                setup.selected_location = location;
                Ok(())
            }
            (Self::Fashion(setup), SetupField::Location(location)) => {
                setup.location = location;
                Ok(())
            }
            (Self::Fashion(setup), SetupField::Outfit(outfit)) => {
                setup.outfit = outfit;
                Ok(())
            }
            (Self::Podcaster(setup), SetupField::Frames(frames)) => {
                setup.selected_frames = frames;
                Ok(())
            }
            (Self::Podcaster(setup), SetupField::VoiceoverText(text)) => {
                setup.voiceover_text = text;
                Ok(())
            }
            (this, other) => Err(TaskDomainError::SetupFamilyMismatch {
                setup_family: other.family().unwrap_or_else(|| this.family()),
                task_family: this.family(),
            }),
        }
    }
}

/// Typed single-field update command issued by the setup editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupField {
    /// Replace the location selection (either family).
    Location(Option<LocationChoice>),
    /// Replace the composed outfit (fashion only).
    Outfit(Option<Outfit>),
    /// Replace the selected animation frames (podcaster only).
    Frames(Vec<String>),
    /// Replace the voiceover text (podcaster only).
    VoiceoverText(String),
}

impl SetupField {
    /// Returns the family this field is exclusive to, or `None` when it
    /// applies to both.
    #[must_use]
    pub const fn family(&self) -> Option<BloggerFamily> {
        match self {
            Self::Location(_) => None,
            Self::Outfit(_) => Some(BloggerFamily::Fashion),
            Self::Frames(_) | Self::VoiceoverText(_) => Some(BloggerFamily::Podcaster),
        }
    }
}
