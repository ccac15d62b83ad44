//! Thin facade over the external auto-planning job.

use crate::blogger::domain::Blogger;
use crate::task::ports::{AutoPlanRequest, AutoPlanner, PlanReceipt, PlannerError};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors surfaced by the scheduling facade.
#[derive(Debug, Error)]
pub enum PlanningError {
    /// The month is outside 1 through 12.
    #[error("month out of range: {0}")]
    InvalidMonth(u32),

    /// The blogger has no weekly posting schedule configured.
    #[error("blogger has no weekly posting schedule configured")]
    MissingSchedule,

    /// Submission to the planning job failed.
    #[error(transparent)]
    Planner(#[from] PlannerError),
}

/// Translates a blogger's posting schedule into an auto-planning request.
///
/// The facade treats the response as opaque confirmation and never polls
/// the job for completion.
#[derive(Clone)]
pub struct SchedulingFacade<P>
where
    P: AutoPlanner,
{
    planner: Arc<P>,
}

impl<P> SchedulingFacade<P>
where
    P: AutoPlanner,
{
    /// Creates a facade over the given planner.
    #[must_use]
    pub const fn new(planner: Arc<P>) -> Self {
        Self { planner }
    }

    /// Submits a month of planning for one blogger.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::InvalidMonth`] or
    /// [`PlanningError::MissingSchedule`] when the request cannot be
    /// built, and [`PlanningError::Planner`] when submission fails.
    pub async fn auto_plan(
        &self,
        blogger: &Blogger,
        year: i32,
        month: u32,
    ) -> Result<PlanReceipt, PlanningError> {
        if !(1..=12).contains(&month) {
            return Err(PlanningError::InvalidMonth(month));
        }
        let schedule = blogger.schedule().ok_or(PlanningError::MissingSchedule)?;
        let request = AutoPlanRequest {
            blogger_id: blogger.id(),
            year,
            month,
            family: blogger.family(),
            posts_per_week: schedule.posts_per_week(),
        };
        let receipt = self.planner.submit(request).await?;
        info!(
            blogger_id = %blogger.id(),
            job_id = %receipt.job_id,
            tasks_planned = receipt.tasks_planned,
            "auto-planning job queued"
        );
        Ok(receipt)
    }
}
