//! Error types for task domain validation and parsing.

use super::{ArtifactSlot, TaskId};
use crate::blogger::domain::BloggerFamily;
use thiserror::Error;

/// Errors returned while validating task domain operations.
///
/// Every variant is a refused transition: the aggregate is left unchanged
/// whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskDomainError {
    /// No artifact exists yet for the slot.
    #[error("no artifact exists for slot {0}")]
    ArtifactNotFound(ArtifactSlot),

    /// The slot belongs to the other content family's pipeline.
    #[error("slot {slot} does not belong to the {family} pipeline")]
    SlotFamilyMismatch {
        /// Slot that was addressed.
        slot: ArtifactSlot,
        /// Family of the task being operated on.
        family: BloggerFamily,
    },

    /// The status value belongs to the other content family.
    #[error("status family {status_family} does not match task family {task_family}")]
    StatusFamilyMismatch {
        /// Family of the supplied status.
        status_family: BloggerFamily,
        /// Family of the task being operated on.
        task_family: BloggerFamily,
    },

    /// The setup block or setup field belongs to the other content family.
    #[error("setup family {setup_family} does not match task family {task_family}")]
    SetupFamilyMismatch {
        /// Family of the supplied setup or field.
        setup_family: BloggerFamily,
        /// Family of the task being operated on.
        task_family: BloggerFamily,
    },

    /// A persisted record carried a status and setup from different families.
    #[error("persisted task {0} mixes status and setup from different families")]
    InconsistentPersistedFamilies(TaskId),
}

/// Error raised when a stored status string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised task status: {0}")]
pub struct ParseStatusError(pub String);
