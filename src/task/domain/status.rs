//! Lifecycle status enumerations, one canonical set per content family.
//!
//! The storage strings are a wire contract shared with the planning job and
//! the editor clients, so both enumerations serialise to exactly the
//! SCREAMING_SNAKE_CASE forms below.

use super::{ParseStatusError, TaskDomainError};
use crate::blogger::domain::BloggerFamily;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status for podcaster tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PodcasterStatus {
    /// Created, nothing produced yet.
    Draft,
    /// Created by the auto-planning job.
    Planned,
    /// Script written and accepted.
    ScriptReady,
    /// Audio and video assets generated.
    VisualReady,
    /// Episode approved for publishing.
    Approved,
}

impl PodcasterStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Planned => "PLANNED",
            Self::ScriptReady => "SCRIPT_READY",
            Self::VisualReady => "VISUAL_READY",
            Self::Approved => "APPROVED",
        }
    }

    /// Position of this status in the lifecycle order.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Draft => 0,
            Self::Planned => 1,
            Self::ScriptReady => 2,
            Self::VisualReady => 3,
            Self::Approved => 4,
        }
    }
}

impl TryFrom<&str> for PodcasterStatus {
    type Error = ParseStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "DRAFT" => Ok(Self::Draft),
            "PLANNED" => Ok(Self::Planned),
            "SCRIPT_READY" => Ok(Self::ScriptReady),
            "VISUAL_READY" => Ok(Self::VisualReady),
            "APPROVED" => Ok(Self::Approved),
            _ => Err(ParseStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for PodcasterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status for fashion tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FashionStatus {
    /// Created, nothing produced yet.
    Draft,
    /// Location and outfit chosen.
    SetupReady,
    /// Frame generation in progress.
    Generating,
    /// All frames generated, awaiting review.
    Review,
    /// Post approved for publishing.
    Approved,
    /// Post published.
    Published,
}

impl FashionStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::SetupReady => "SETUP_READY",
            Self::Generating => "GENERATING",
            Self::Review => "REVIEW",
            Self::Approved => "APPROVED",
            Self::Published => "PUBLISHED",
        }
    }

    /// Position of this status in the lifecycle order.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Draft => 0,
            Self::SetupReady => 1,
            Self::Generating => 2,
            Self::Review => 3,
            Self::Approved => 4,
            Self::Published => 5,
        }
    }
}

impl TryFrom<&str> for FashionStatus {
    type Error = ParseStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "DRAFT" => Ok(Self::Draft),
            "SETUP_READY" => Ok(Self::SetupReady),
            "GENERATING" => Ok(Self::Generating),
            "REVIEW" => Ok(Self::Review),
            "APPROVED" => Ok(Self::Approved),
            "PUBLISHED" => Ok(Self::Published),
            _ => Err(ParseStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for FashionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task lifecycle status tagged by content family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "family", content = "status", rename_all = "snake_case")]
pub enum TaskStatus {
    /// Status within the podcaster lifecycle.
    Podcaster(PodcasterStatus),
    /// Status within the fashion lifecycle.
    Fashion(FashionStatus),
}

impl TaskStatus {
    /// Initial status for a freshly created task of the given family.
    #[must_use]
    pub const fn draft(family: BloggerFamily) -> Self {
        match family {
            BloggerFamily::Podcaster => Self::Podcaster(PodcasterStatus::Draft),
            BloggerFamily::Fashion => Self::Fashion(FashionStatus::Draft),
        }
    }

    /// Returns the content family this status belongs to.
    #[must_use]
    pub const fn family(self) -> BloggerFamily {
        match self {
            Self::Podcaster(_) => BloggerFamily::Podcaster,
            Self::Fashion(_) => BloggerFamily::Fashion,
        }
    }

    /// Returns the canonical storage representation of the inner status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Podcaster(status) => status.as_str(),
            Self::Fashion(status) => status.as_str(),
        }
    }

    /// Position of this status in its family's lifecycle order.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Podcaster(status) => status.rank(),
            Self::Fashion(status) => status.rank(),
        }
    }

    /// Advances to `target` when it is later in the same family's lifecycle.
    ///
    /// Promotion is monotonic: a target at or below the current rank leaves
    /// the status unchanged, so an automatic promotion fires at most once.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::StatusFamilyMismatch`] when `target`
    /// belongs to the other family.
    pub const fn promote(self, target: Self) -> Result<Self, TaskDomainError> {
        if !matches!(
            (self, target),
            (Self::Podcaster(_), Self::Podcaster(_)) | (Self::Fashion(_), Self::Fashion(_))
        ) {
            return Err(TaskDomainError::StatusFamilyMismatch {
                status_family: target.family(),
                task_family: self.family(),
            });
        }
        if target.rank() > self.rank() {
            Ok(target)
        } else {
            Ok(self)
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
