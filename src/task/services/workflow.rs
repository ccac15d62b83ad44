//! Orchestrator for one open task editor.

use std::collections::BTreeSet;
use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;
use tracing::{debug, warn};

use super::{PromptBuilder, PromptError};
use crate::sync::{DebouncedSynchronizer, SaveStatus, SyncPolicy};
use crate::task::adapters::SetupSaver;
use crate::task::domain::{
    ApprovalReport, ArtifactSlot, ContentPatch, FashionStage, FashionStatus, PodcasterStage,
    PodcasterStatus, SetupField, Stage, StageGraph, StageInputs, Task, TaskDomainError, TaskSetup,
    TaskStatus,
};
use crate::task::ports::{
    ArtifactGenerator, GeneratedArtifact, GenerationContext, GeneratorError, TaskRepository,
    TaskRepositoryError,
};

/// Errors surfaced by workflow operations.
///
/// Refusals (`Domain`, `StageLocked`, `GenerationInFlight`) leave the task
/// unchanged; `Generator` and `Repository` failures are scoped to one slot
/// or one save cycle and never corrupt in-memory task state.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Domain validation refused the operation.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The requested stage's unlock rule does not hold yet.
    #[error("stage {0} is locked")]
    StageLocked(Stage),

    /// The task is already at the final stage of its pipeline.
    #[error("already at the final stage")]
    AtFinalStage,

    /// A generation for this slot is still in flight.
    #[error("generation already in flight for slot {0}")]
    GenerationInFlight(ArtifactSlot),

    /// The external generator call failed.
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    /// A persistence operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Instruction rendering failed.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// The editor owning this workflow has been closed.
    #[error("workflow has been closed")]
    Closed,
}

/// Result type for workflow operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Orchestrates stage navigation, artifact generation, and setup autosave
/// for one open task editor.
///
/// A workflow owns its task exclusively for the editor's lifetime; two
/// simultaneous editors of the same task race with last-write-wins
/// semantics at the persistence boundary.
pub struct TaskWorkflow<R, G, C>
where
    R: TaskRepository,
    G: ArtifactGenerator,
    C: Clock + Send + Sync,
{
    task: Task,
    graph: StageGraph,
    stage_index: usize,
    in_flight: BTreeSet<ArtifactSlot>,
    prompts: PromptBuilder,
    repository: Arc<R>,
    generator: Arc<G>,
    clock: Arc<C>,
    autosave: DebouncedSynchronizer<TaskSetup, SetupSaver<R>, C>,
    closed: bool,
}

impl<R, G, C> TaskWorkflow<R, G, C>
where
    R: TaskRepository,
    G: ArtifactGenerator,
    C: Clock + Send + Sync,
{
    /// Opens a workflow over a task, starting at the first stage of its
    /// pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Prompt`] when the stock instruction
    /// templates fail to parse.
    pub fn new(
        task: Task,
        repository: Arc<R>,
        generator: Arc<G>,
        clock: Arc<C>,
        policy: SyncPolicy,
    ) -> WorkflowResult<Self> {
        let graph = StageGraph::for_family(task.family());
        let saver = Arc::new(SetupSaver::new(Arc::clone(&repository), task.id()));
        let autosave = DebouncedSynchronizer::new(saver, Arc::clone(&clock), policy);
        Ok(Self {
            task,
            graph,
            stage_index: 0,
            in_flight: BTreeSet::new(),
            prompts: PromptBuilder::new()?,
            repository,
            generator,
            clock,
            autosave,
            closed: false,
        })
    }

    /// Returns the task being edited.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the current stage.
    #[must_use]
    pub fn current_stage(&self) -> Stage {
        self.graph
            .stage_at(self.stage_index)
            .unwrap_or_else(|| self.graph.first_stage())
    }

    /// Returns the autosave status visible to the editor.
    #[must_use]
    pub const fn save_status(&self) -> SaveStatus {
        self.autosave.status()
    }

    /// Evaluates whether `stage` is currently unlocked.
    #[must_use]
    pub fn stage_unlocked(&self, stage: Stage) -> bool {
        self.graph.unlocked(
            stage,
            StageInputs {
                script: self.task.script().unwrap_or_default(),
                setup: self.task.setup(),
                artifacts: self.task.artifacts(),
            },
        )
    }

    /// Evaluates whether the stage after the current one is unlocked.
    /// Returns `false` at the final stage.
    #[must_use]
    pub fn next_stage_unlocked(&self) -> bool {
        self.graph
            .stage_at(self.stage_index + 1)
            .is_some_and(|stage| self.stage_unlocked(stage))
    }

    /// Applies a single setup field edit and re-triggers the debounced
    /// autosave with the full setup snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Closed`] after [`Self::close`], or
    /// [`WorkflowError::Domain`] when the field belongs to the other
    /// family.
    pub fn update_setup_field(&mut self, field: SetupField) -> WorkflowResult<()> {
        if self.closed {
            return Err(WorkflowError::Closed);
        }
        self.task.apply_setup_field(field, &*self.clock)?;
        // Whole-object snapshot, never a diff.
        self.autosave.trigger(self.task.setup().clone());
        Ok(())
    }

    /// Patches the idea/script fields and persists immediately.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Closed`] after [`Self::close`], or
    /// [`WorkflowError::Repository`] when persistence fails.
    pub async fn update_content(&mut self, patch: ContentPatch) -> WorkflowResult<()> {
        if self.closed {
            return Err(WorkflowError::Closed);
        }
        self.task.apply_content(patch, &*self.clock);
        self.repository.update(&self.task).await?;
        Ok(())
    }

    /// Performs every autosave write that has become due. Returns the
    /// number of writes performed.
    pub async fn flush_autosave(&mut self) -> usize {
        self.autosave.flush_due().await
    }

    /// Reserves `slot` for generation and returns the context to hand to
    /// the generator.
    ///
    /// The reservation is the per-slot serialisation guard: a second call
    /// for the same slot before [`Self::complete_generation`] is rejected,
    /// so an older response can never overwrite a newer one.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::GenerationInFlight`] when the slot is
    /// already reserved, [`WorkflowError::Domain`] when the slot belongs
    /// to the other family, or [`WorkflowError::Closed`] after close.
    pub fn begin_generation(
        &mut self,
        slot: ArtifactSlot,
        custom_instructions: Option<String>,
    ) -> WorkflowResult<GenerationContext> {
        if self.closed {
            return Err(WorkflowError::Closed);
        }
        if slot.family() != self.task.family() {
            return Err(WorkflowError::Domain(TaskDomainError::SlotFamilyMismatch {
                slot,
                family: self.task.family(),
            }));
        }
        if self.in_flight.contains(&slot) {
            return Err(WorkflowError::GenerationInFlight(slot));
        }
        let context = self.build_context(slot, custom_instructions)?;
        self.in_flight.insert(slot);
        Ok(context)
    }

    /// Applies the outcome of a generation started with
    /// [`Self::begin_generation`].
    ///
    /// A successful result installs the artifact (unapproved) and persists
    /// the task; a failed result leaves the slot and status untouched.
    /// Results arriving after [`Self::close`] are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Generator`] when the generation failed, or
    /// [`WorkflowError::Repository`] when persisting the new artifact
    /// fails.
    pub async fn complete_generation(
        &mut self,
        slot: ArtifactSlot,
        outcome: Result<GeneratedArtifact, GeneratorError>,
    ) -> WorkflowResult<()> {
        self.in_flight.remove(&slot);
        if self.closed {
            debug!(slot = %slot, "discarding generation result for closed workflow");
            return Ok(());
        }
        match outcome {
            Ok(generated) => {
                self.task
                    .record_artifact(slot, generated.value, generated.prompt, &*self.clock)?;
                self.repository.update(&self.task).await?;
                debug!(slot = %slot, "artifact recorded");
                Ok(())
            }
            Err(failure) => {
                warn!(slot = %slot, error = %failure, "artifact generation failed");
                Err(WorkflowError::Generator(failure))
            }
        }
    }

    /// Generates the artifact for `slot` using the workflow's generator.
    ///
    /// # Errors
    ///
    /// See [`Self::begin_generation`] and [`Self::complete_generation`].
    pub async fn generate_artifact(&mut self, slot: ArtifactSlot) -> WorkflowResult<()> {
        self.run_generation(slot, None).await
    }

    /// Regenerates the artifact for `slot`, optionally steering the
    /// generator with free-text instructions.
    ///
    /// Every call reaches the generator: there is no caching, and the
    /// installed artifact always starts unapproved again.
    ///
    /// # Errors
    ///
    /// See [`Self::begin_generation`] and [`Self::complete_generation`].
    pub async fn regenerate_artifact(
        &mut self,
        slot: ArtifactSlot,
        custom_instructions: Option<String>,
    ) -> WorkflowResult<()> {
        self.run_generation(slot, custom_instructions).await
    }

    async fn run_generation(
        &mut self,
        slot: ArtifactSlot,
        custom_instructions: Option<String>,
    ) -> WorkflowResult<()> {
        let context = self.begin_generation(slot, custom_instructions)?;
        let outcome = self.generator.generate(context).await;
        self.complete_generation(slot, outcome).await
    }

    /// Approves the artifact in `slot` and persists the task. Returns
    /// whether the next stage is unlocked afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Domain`] when the slot is empty or belongs
    /// to the other family, or [`WorkflowError::Repository`] when
    /// persistence fails.
    pub async fn approve(&mut self, slot: ArtifactSlot) -> WorkflowResult<bool> {
        if self.closed {
            return Err(WorkflowError::Closed);
        }
        self.task.approve_artifact(slot, &*self.clock)?;
        self.repository.update(&self.task).await?;
        Ok(self.next_stage_unlocked())
    }

    /// Approves each of the given slots independently, persists when
    /// anything changed, and reports the per-slot outcome.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Repository`] when persistence fails.
    pub async fn approve_all(
        &mut self,
        slots: impl IntoIterator<Item = ArtifactSlot> + Send,
    ) -> WorkflowResult<ApprovalReport> {
        if self.closed {
            return Err(WorkflowError::Closed);
        }
        let report = self.task.approve_artifacts(slots, &*self.clock);
        if !report.approved.is_empty() {
            self.repository.update(&self.task).await?;
        }
        Ok(report)
    }

    /// Rewrites the prompt of an existing artifact and persists the task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Domain`] when the slot is empty or belongs
    /// to the other family, or [`WorkflowError::Repository`] when
    /// persistence fails.
    pub async fn edit_prompt(
        &mut self,
        slot: ArtifactSlot,
        new_prompt: impl Into<String> + Send,
    ) -> WorkflowResult<()> {
        if self.closed {
            return Err(WorkflowError::Closed);
        }
        self.task.edit_prompt(slot, new_prompt, &*self.clock)?;
        self.repository.update(&self.task).await?;
        Ok(())
    }

    /// Advances to the next stage when its unlock rule holds.
    ///
    /// Entering a stage may promote the task status (fashion setup done →
    /// `SETUP_READY`, podcaster script done → `SCRIPT_READY`); promotion is
    /// monotonic, so returning and advancing again changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::StageLocked`] when the next stage is not
    /// unlocked (no state change), [`WorkflowError::AtFinalStage`] at the
    /// end of the pipeline, or [`WorkflowError::Closed`] after close.
    pub async fn advance_stage(&mut self) -> WorkflowResult<Stage> {
        if self.closed {
            return Err(WorkflowError::Closed);
        }
        let next = self
            .graph
            .stage_at(self.stage_index + 1)
            .ok_or(WorkflowError::AtFinalStage)?;
        if !self.stage_unlocked(next) {
            return Err(WorkflowError::StageLocked(next));
        }
        self.stage_index += 1;
        if let Some(promotion) = entry_promotion(next) {
            self.task.promote_status(promotion, &*self.clock)?;
            self.repository.update(&self.task).await?;
        }
        debug!(stage = %next, "stage advanced");
        Ok(next)
    }

    /// Returns to the previous stage. Always allowed; a no-op at the first
    /// stage. Never changes the task status.
    pub fn retreat_stage(&mut self) -> Stage {
        self.stage_index = self.stage_index.saturating_sub(1);
        self.current_stage()
    }

    /// Closes the editor's workflow: cancels the pending autosave timer
    /// and causes late generation results to be discarded. In-flight saves
    /// complete fire-and-forget.
    pub fn close(&mut self) {
        self.autosave.close();
        self.closed = true;
    }

    fn build_context(
        &self,
        slot: ArtifactSlot,
        custom_instructions: Option<String>,
    ) -> WorkflowResult<GenerationContext> {
        let instructions = self.prompts.instructions(slot, self.task.setup())?;
        let (reference_prompt, reference_value) = match slot {
            // Angle frames derive from the approved main frame.
            ArtifactSlot::Angle1 | ArtifactSlot::Angle2 | ArtifactSlot::Angle3 => self
                .task
                .artifacts()
                .get(ArtifactSlot::Main)
                .filter(|artifact| artifact.is_approved())
                .map_or((None, None), |artifact| {
                    (
                        Some(artifact.prompt().to_owned()),
                        Some(artifact.value().clone()),
                    )
                }),
            // The lip-sync video derives from the generated audio.
            ArtifactSlot::Video => (
                None,
                self.task
                    .artifacts()
                    .get(ArtifactSlot::Audio)
                    .map(|artifact| artifact.value().clone()),
            ),
            _ => (None, None),
        };
        Ok(GenerationContext {
            slot,
            instructions,
            reference_prompt,
            reference_value,
            custom_instructions,
        })
    }
}

/// Status promotion applied when a stage is entered, if any.
const fn entry_promotion(stage: Stage) -> Option<TaskStatus> {
    match stage {
        Stage::Podcaster(PodcasterStage::Setup) => Some(TaskStatus::Podcaster(
            PodcasterStatus::ScriptReady,
        )),
        Stage::Fashion(FashionStage::MainFrame) => {
            Some(TaskStatus::Fashion(FashionStatus::SetupReady))
        }
        _ => None,
    }
}
