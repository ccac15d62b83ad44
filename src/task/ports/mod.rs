//! Port contracts for the content production workflow.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod generator;
pub mod planner;
pub mod repository;

pub use generator::{ArtifactGenerator, GeneratedArtifact, GenerationContext, GeneratorError};
pub use planner::{AutoPlanRequest, AutoPlanner, PlanReceipt, PlannerError};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
