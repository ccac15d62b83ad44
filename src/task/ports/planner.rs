//! Port for the external auto-planning job.

use crate::blogger::domain::{BloggerFamily, BloggerId};
use async_trait::async_trait;
use thiserror::Error;

/// Request to plan a month of tasks for one blogger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoPlanRequest {
    /// Blogger to plan for.
    pub blogger_id: BloggerId,
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1 through 12.
    pub month: u32,
    /// Content family of the tasks to create.
    pub family: BloggerFamily,
    /// Weekly posting frequency drawn from the blogger's schedule.
    pub posts_per_week: u8,
}

/// Opaque confirmation returned by the planning job.
///
/// The job runs fire-and-forget; the caller never polls it for completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanReceipt {
    /// Identifier of the queued planning job.
    pub job_id: String,
    /// Number of tasks the job will create.
    pub tasks_planned: u32,
}

/// External auto-planning contract.
#[async_trait]
pub trait AutoPlanner: Send + Sync {
    /// Submits a planning request and returns the job confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError`] when submission fails.
    async fn submit(&self, request: AutoPlanRequest) -> Result<PlanReceipt, PlannerError>;
}

/// Errors returned by the auto-planning port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    /// The planning service could not be reached.
    #[error("planner transport failure: {0}")]
    Transport(String),

    /// The planning service refused the request.
    #[error("planning request rejected: {0}")]
    Rejected(String),
}
