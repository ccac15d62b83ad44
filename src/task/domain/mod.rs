//! Domain model for the content production workflow.
//!
//! The task domain models per-family lifecycle statuses, generated
//! artifacts, stage unlock rules, and the setup fields edited before
//! generation, while keeping all infrastructure concerns outside of the
//! domain boundary.

mod artifact;
mod error;
mod ids;
mod setup;
mod stage;
mod status;
mod task;

pub use artifact::{ApprovalReport, Artifact, ArtifactSlot, ArtifactStore, ArtifactValue};
pub use error::{ParseStatusError, TaskDomainError};
pub use ids::TaskId;
pub use setup::{FashionSetup, LocationChoice, PodcasterSetup, SetupField, TaskSetup};
pub use stage::{FashionStage, PodcasterStage, Stage, StageGraph, StageInputs};
pub use status::{FashionStatus, PodcasterStatus, TaskStatus};
pub use task::{ContentPatch, PersistedTaskData, Task};
