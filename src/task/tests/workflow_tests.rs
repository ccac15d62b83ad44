//! Workflow orchestration tests over in-memory collaborators.

use super::{RecordingGenerator, fashion_task, podcaster_task};
use crate::sync::SyncPolicy;
use crate::task::adapters::InMemoryTaskRepository;
use crate::task::domain::{
    ArtifactSlot, ArtifactValue, ContentPatch, FashionStage, FashionStatus, LocationChoice,
    PodcasterStage, PodcasterStatus, SetupField, Stage, Task, TaskStatus,
};
use crate::task::ports::{GeneratedArtifact, TaskRepository};
use crate::task::services::{TaskWorkflow, WorkflowError};
use eyre::{OptionExt, Result, ensure};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;

type TestRepository = InMemoryTaskRepository<DefaultClock>;
type TestWorkflow = TaskWorkflow<TestRepository, RecordingGenerator, DefaultClock>;

struct Harness {
    workflow: TestWorkflow,
    repository: Arc<TestRepository>,
    generator: Arc<RecordingGenerator>,
}

async fn open(task: Task) -> Result<Harness> {
    let clock = Arc::new(DefaultClock);
    let repository = Arc::new(InMemoryTaskRepository::new(Arc::clone(&clock)));
    repository.store(&task).await?;
    let generator = Arc::new(RecordingGenerator::new());
    let workflow = TaskWorkflow::new(
        task,
        Arc::clone(&repository),
        Arc::clone(&generator),
        clock,
        SyncPolicy::immediate(),
    )?;
    Ok(Harness {
        workflow,
        repository,
        generator,
    })
}

fn choose_location(workflow: &mut TestWorkflow, description: &str) -> Result<()> {
    workflow.update_setup_field(SetupField::Location(Some(LocationChoice::Custom(
        description.to_owned(),
    ))))?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn advancing_a_fashion_task_with_empty_setup_is_refused() -> Result<()> {
    let mut harness = open(fashion_task()).await?;

    let refused = harness.workflow.advance_stage().await;
    ensure!(
        matches!(
            refused,
            Err(WorkflowError::StageLocked(Stage::Fashion(
                FashionStage::MainFrame
            )))
        ),
        "empty setup must lock the main frame stage"
    );
    ensure!(
        harness.workflow.current_stage() == Stage::Fashion(FashionStage::Setup),
        "a refused advance must not move the stage"
    );

    choose_location(&mut harness.workflow, "studio, soft light")?;
    let advanced = harness.workflow.advance_stage().await?;
    ensure!(
        advanced == Stage::Fashion(FashionStage::MainFrame),
        "a usable location must unlock the main frame stage"
    );
    ensure!(
        harness.workflow.task().status() == TaskStatus::Fashion(FashionStatus::SetupReady),
        "entering the generation stage marks the setup ready"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn angle_frames_unlock_only_after_main_approval() -> Result<()> {
    let mut harness = open(fashion_task()).await?;
    choose_location(&mut harness.workflow, "rooftop at dusk")?;
    harness.workflow.advance_stage().await?;

    harness.workflow.generate_artifact(ArtifactSlot::Main).await?;
    ensure!(
        harness.workflow.task().status() == TaskStatus::Fashion(FashionStatus::Review),
        "the main frame promotes the task to review"
    );

    let refused = harness.workflow.advance_stage().await;
    ensure!(
        matches!(
            refused,
            Err(WorkflowError::StageLocked(Stage::Fashion(
                FashionStage::AdditionalFrames
            )))
        ),
        "an unapproved main frame must keep the angles locked"
    );

    let unlocked = harness.workflow.approve(ArtifactSlot::Main).await?;
    ensure!(unlocked, "approval must report the next stage as reachable");
    harness.workflow.advance_stage().await?;
    ensure!(
        harness.workflow.current_stage() == Stage::Fashion(FashionStage::AdditionalFrames),
        "approval must unlock the angle stage"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_failed_generation_leaves_slot_and_status_untouched() -> Result<()> {
    let mut harness = open(podcaster_task()).await?;
    harness.generator.fail_next(1);

    let failed = harness.workflow.generate_artifact(ArtifactSlot::Audio).await;
    ensure!(
        matches!(failed, Err(WorkflowError::Generator(_))),
        "the transport failure must surface"
    );
    ensure!(
        harness.workflow.task().artifacts().is_empty(),
        "the slot must be left unchanged"
    );
    ensure!(
        harness.workflow.task().status() == TaskStatus::Podcaster(PodcasterStatus::Draft),
        "the status must be left unchanged"
    );

    // Retry is an explicit user action re-issuing the same call.
    harness.workflow.generate_artifact(ArtifactSlot::Audio).await?;
    ensure!(
        harness.generator.call_count() == 2,
        "the retry must reach the generator again"
    );
    ensure!(
        harness
            .workflow
            .task()
            .artifacts()
            .get(ArtifactSlot::Audio)
            .is_some(),
        "the retry must install the artifact"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn regeneration_always_reaches_the_generator_and_resets_approval() -> Result<()> {
    let mut harness = open(fashion_task()).await?;
    harness.workflow.generate_artifact(ArtifactSlot::Main).await?;
    harness.workflow.approve(ArtifactSlot::Main).await?;

    harness
        .workflow
        .regenerate_artifact(ArtifactSlot::Main, None)
        .await?;

    ensure!(
        harness.generator.call_count() == 2,
        "no caching: every regeneration must reach the generator"
    );
    let artifact = harness
        .workflow
        .task()
        .artifacts()
        .get(ArtifactSlot::Main)
        .ok_or_eyre("main artifact missing")?;
    ensure!(
        !artifact.is_approved(),
        "regeneration must reset the approval flag"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn custom_instructions_are_passed_through_to_the_generator() -> Result<()> {
    let mut harness = open(fashion_task()).await?;
    harness
        .workflow
        .regenerate_artifact(ArtifactSlot::Main, Some("warmer light".to_owned()))
        .await?;

    let call = harness
        .generator
        .calls()
        .into_iter()
        .next()
        .ok_or_eyre("generator was not called")?;
    ensure!(
        call.custom_instructions.as_deref() == Some("warmer light"),
        "steering instructions must reach the generator"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overlapping_generation_for_the_same_slot_is_rejected() -> Result<()> {
    let mut harness = open(fashion_task()).await?;

    let first = harness.workflow.begin_generation(ArtifactSlot::Main, None)?;
    let refused = harness.workflow.begin_generation(ArtifactSlot::Main, None);
    ensure!(
        matches!(
            refused,
            Err(WorkflowError::GenerationInFlight(ArtifactSlot::Main))
        ),
        "the per-slot guard must reject the overlapping call"
    );

    // Different slots may generate concurrently.
    harness.workflow.begin_generation(ArtifactSlot::Angle1, None)?;

    harness
        .workflow
        .complete_generation(
            ArtifactSlot::Main,
            Ok(GeneratedArtifact {
                value: ArtifactValue::new("https://cdn.example/main.png"),
                prompt: first.instructions,
            }),
        )
        .await?;
    ensure!(
        harness
            .workflow
            .begin_generation(ArtifactSlot::Main, None)
            .is_ok(),
        "completion must release the slot"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn angle_generation_context_derives_from_the_approved_main_frame() -> Result<()> {
    let mut harness = open(fashion_task()).await?;
    harness.workflow.generate_artifact(ArtifactSlot::Main).await?;
    harness.workflow.approve(ArtifactSlot::Main).await?;
    let main_value = harness
        .workflow
        .task()
        .artifacts()
        .get(ArtifactSlot::Main)
        .ok_or_eyre("main artifact missing")?
        .value()
        .clone();

    let context = harness
        .workflow
        .begin_generation(ArtifactSlot::Angle1, None)?;
    ensure!(
        context.reference_value.as_ref() == Some(&main_value),
        "angles must reference the main frame image"
    );
    ensure!(
        context.reference_prompt.is_some(),
        "angles must carry the approved main prompt"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rapid_setup_edits_coalesce_into_one_persisted_write() -> Result<()> {
    let mut harness = open(fashion_task()).await?;
    let task_id = harness.workflow.task().id();

    for description in ["s", "st", "stu", "stud", "studio, soft light"] {
        choose_location(&mut harness.workflow, description)?;
    }
    let writes = harness.workflow.flush_autosave().await;
    ensure!(writes == 1, "five edits must coalesce into one write");

    let stored = harness
        .repository
        .find_by_id(task_id)
        .await?
        .ok_or_eyre("task missing")?;
    let location = stored
        .setup()
        .as_fashion()
        .and_then(|setup| setup.location.as_ref())
        .ok_or_eyre("location missing from persisted setup")?;
    ensure!(
        location.description() == "studio, soft light",
        "the persisted snapshot must be the last one"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn closing_discards_pending_saves_and_stale_generation_results() -> Result<()> {
    let mut harness = open(fashion_task()).await?;
    let task_id = harness.workflow.task().id();

    choose_location(&mut harness.workflow, "studio")?;
    harness.workflow.begin_generation(ArtifactSlot::Main, None)?;
    harness.workflow.close();

    ensure!(
        harness.workflow.flush_autosave().await == 0,
        "closing must cancel the pending debounce"
    );

    // A late response must be discarded, not applied to disposed state.
    harness
        .workflow
        .complete_generation(
            ArtifactSlot::Main,
            Ok(GeneratedArtifact {
                value: ArtifactValue::new("https://cdn.example/stale.png"),
                prompt: "stale".to_owned(),
            }),
        )
        .await?;
    let stored = harness
        .repository
        .find_by_id(task_id)
        .await?
        .ok_or_eyre("task missing")?;
    ensure!(
        stored.artifacts().is_empty(),
        "stale results must not be persisted"
    );

    let refused = harness.workflow.update_setup_field(SetupField::Location(None));
    ensure!(
        matches!(refused, Err(WorkflowError::Closed)),
        "edits after close must be refused"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn retreating_is_always_allowed_and_never_changes_the_status() -> Result<()> {
    let mut harness = open(podcaster_task()).await?;
    harness
        .workflow
        .update_content(ContentPatch {
            idea: None,
            script: Some("Welcome back to the show.".to_owned()),
        })
        .await?;
    harness.workflow.advance_stage().await?;
    ensure!(
        harness.workflow.task().status()
            == TaskStatus::Podcaster(PodcasterStatus::ScriptReady),
        "finishing the script promotes the status"
    );

    let stage = harness.workflow.retreat_stage();
    ensure!(
        stage == Stage::Podcaster(PodcasterStage::Script),
        "retreat must return to the previous stage"
    );
    ensure!(
        harness.workflow.task().status()
            == TaskStatus::Podcaster(PodcasterStatus::ScriptReady),
        "retreat must never regress the status"
    );

    // No-op at the first stage.
    let still_first = harness.workflow.retreat_stage();
    ensure!(still_first == Stage::Podcaster(PodcasterStage::Script), "retreat at the first stage is a no-op");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_podcaster_episode_flows_from_script_to_video() -> Result<()> {
    let mut harness = open(podcaster_task()).await?;
    harness
        .workflow
        .update_content(ContentPatch {
            idea: Some("Autumn wardrobe special".to_owned()),
            script: Some("Welcome back to the show.".to_owned()),
        })
        .await?;
    harness.workflow.advance_stage().await?;

    choose_location(&mut harness.workflow, "home studio")?;
    harness
        .workflow
        .update_setup_field(SetupField::VoiceoverText(
            "Welcome back to the show.".to_owned(),
        ))?;
    harness
        .workflow
        .update_setup_field(SetupField::Frames(vec![
            "https://cdn.example/frame-smile.png".to_owned(),
        ]))?;
    harness.workflow.flush_autosave().await;
    harness.workflow.advance_stage().await?;

    harness.workflow.generate_artifact(ArtifactSlot::Audio).await?;
    let audio_value = harness
        .workflow
        .task()
        .artifacts()
        .get(ArtifactSlot::Audio)
        .ok_or_eyre("audio artifact missing")?
        .value()
        .clone();
    harness.workflow.advance_stage().await?;

    let context = harness.workflow.begin_generation(ArtifactSlot::Video, None)?;
    ensure!(
        context.reference_value.as_ref() == Some(&audio_value),
        "the video must reference the generated audio"
    );
    harness
        .workflow
        .complete_generation(
            ArtifactSlot::Video,
            Ok(GeneratedArtifact {
                value: ArtifactValue::new("https://cdn.example/video.mp4"),
                prompt: context.instructions,
            }),
        )
        .await?;
    ensure!(
        harness.workflow.task().status()
            == TaskStatus::Podcaster(PodcasterStatus::VisualReady),
        "the video is the triggering artifact for visual-ready"
    );
    Ok(())
}
