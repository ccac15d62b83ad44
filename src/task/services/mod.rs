//! Application services for the content production workflow.

mod lifecycle;
mod planning;
mod prompt;
mod workflow;

pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
};
pub use planning::{PlanningError, SchedulingFacade};
pub use prompt::{PromptBuilder, PromptError};
pub use workflow::{TaskWorkflow, WorkflowError, WorkflowResult};
