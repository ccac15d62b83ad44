//! Task aggregate root.

use super::{
    ApprovalReport, ArtifactSlot, ArtifactStore, ArtifactValue, FashionStatus, PodcasterStatus,
    SetupField, TaskDomainError, TaskId, TaskSetup, TaskStatus,
};
use crate::blogger::domain::{BloggerFamily, BloggerId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// One unit of scheduled content production for a blogger on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    blogger_id: BloggerId,
    date: NaiveDate,
    content_type: String,
    status: TaskStatus,
    idea: Option<String>,
    script: Option<String>,
    setup: TaskSetup,
    artifacts: ArtifactStore,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Patch for the free-text content fields; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPatch {
    /// Replacement idea text, if any.
    pub idea: Option<String>,
    /// Replacement script text, if any.
    pub script: Option<String>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning blogger.
    pub blogger_id: BloggerId,
    /// Persisted calendar date.
    pub date: NaiveDate,
    /// Persisted content type label.
    pub content_type: String,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted idea text, if any.
    pub idea: Option<String>,
    /// Persisted script text, if any.
    pub script: Option<String>,
    /// Persisted setup block.
    pub setup: TaskSetup,
    /// Persisted artifact store.
    pub artifacts: ArtifactStore,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new draft task for a blogger.
    #[must_use]
    pub fn new(
        blogger_id: BloggerId,
        family: BloggerFamily,
        date: NaiveDate,
        content_type: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            blogger_id,
            date,
            content_type: content_type.into(),
            status: TaskStatus::draft(family),
            idea: None,
            script: None,
            setup: TaskSetup::empty(family),
            artifacts: ArtifactStore::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InconsistentPersistedFamilies`] when the
    /// stored status and setup disagree about the content family.
    pub fn from_persisted(data: PersistedTaskData) -> Result<Self, TaskDomainError> {
        if data.status.family() != data.setup.family() {
            return Err(TaskDomainError::InconsistentPersistedFamilies(data.id));
        }
        Ok(Self {
            id: data.id,
            blogger_id: data.blogger_id,
            date: data.date,
            content_type: data.content_type,
            status: data.status,
            idea: data.idea,
            script: data.script,
            setup: data.setup,
            artifacts: data.artifacts,
            created_at: data.created_at,
            updated_at: data.updated_at,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning blogger's identifier.
    #[must_use]
    pub const fn blogger_id(&self) -> BloggerId {
        self.blogger_id
    }

    /// Returns the scheduled calendar date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the content type label.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the content family, derived from the setup block.
    #[must_use]
    pub const fn family(&self) -> BloggerFamily {
        self.setup.family()
    }

    /// Returns the current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the idea text, if any.
    #[must_use]
    pub fn idea(&self) -> Option<&str> {
        self.idea.as_deref()
    }

    /// Returns the script text, if any.
    #[must_use]
    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    /// Returns the setup block.
    #[must_use]
    pub const fn setup(&self) -> &TaskSetup {
        &self.setup
    }

    /// Returns the artifact store.
    #[must_use]
    pub const fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a content patch to the idea/script fields.
    pub fn apply_content(&mut self, patch: ContentPatch, clock: &impl Clock) {
        if let Some(idea) = patch.idea {
            self.idea = Some(idea);
        }
        if let Some(script) = patch.script {
            self.script = Some(script);
        }
        self.touch(clock);
    }

    /// Applies a single setup field update.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SetupFamilyMismatch`] when the field
    /// belongs to the other family.
    pub fn apply_setup_field(
        &mut self,
        field: SetupField,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.setup.apply(field)?;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the whole setup block with a coalesced editor snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SetupFamilyMismatch`] when the snapshot
    /// belongs to the other family.
    pub fn replace_setup(
        &mut self,
        setup: TaskSetup,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if setup.family() != self.family() {
            return Err(TaskDomainError::SetupFamilyMismatch {
                setup_family: setup.family(),
                task_family: self.family(),
            });
        }
        self.setup = setup;
        self.touch(clock);
        Ok(())
    }

    /// Explicitly sets the lifecycle status.
    ///
    /// Explicit user action (stage navigation, external commands) may move
    /// the status in either direction within its family.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::StatusFamilyMismatch`] when `status`
    /// belongs to the other family.
    pub fn set_status(
        &mut self,
        status: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if status.family() != self.family() {
            return Err(TaskDomainError::StatusFamilyMismatch {
                status_family: status.family(),
                task_family: self.family(),
            });
        }
        self.status = status;
        self.touch(clock);
        Ok(())
    }

    /// Promotes the status monotonically; later ranks win, earlier ranks
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::StatusFamilyMismatch`] when `target`
    /// belongs to the other family.
    pub fn promote_status(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let promoted = self.status.promote(target)?;
        if promoted != self.status {
            self.status = promoted;
            self.touch(clock);
        }
        Ok(())
    }

    /// Records a newly generated artifact in `slot`.
    ///
    /// The installed artifact always starts unapproved. When the slot is
    /// the triggering artifact for its pipeline (fashion `main`, podcaster
    /// `video`), the status is promoted automatically; the promotion is
    /// monotonic, so regeneration never re-fires it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SlotFamilyMismatch`] when the slot
    /// belongs to the other family; the store is left unchanged.
    pub fn record_artifact(
        &mut self,
        slot: ArtifactSlot,
        value: ArtifactValue,
        prompt: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.check_slot(slot)?;
        self.artifacts.put(slot, value, prompt);
        match slot {
            ArtifactSlot::Main => {
                self.status = self
                    .status
                    .promote(TaskStatus::Fashion(FashionStatus::Review))?;
            }
            ArtifactSlot::Video => {
                self.status = self
                    .status
                    .promote(TaskStatus::Podcaster(PodcasterStatus::VisualReady))?;
            }
            _ => {}
        }
        self.touch(clock);
        Ok(())
    }

    /// Approves the artifact in `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when the slot belongs to the other
    /// family or holds no artifact.
    pub fn approve_artifact(
        &mut self,
        slot: ArtifactSlot,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.check_slot(slot)?;
        self.artifacts.approve(slot)?;
        self.touch(clock);
        Ok(())
    }

    /// Approves each of the given slots independently and reports the
    /// outcome per slot.
    pub fn approve_artifacts(
        &mut self,
        slots: impl IntoIterator<Item = ArtifactSlot>,
        clock: &impl Clock,
    ) -> ApprovalReport {
        let report = self.artifacts.approve_all(slots);
        if !report.approved.is_empty() {
            self.touch(clock);
        }
        report
    }

    /// Rewrites the prompt of an existing artifact without touching its
    /// value or approval flag.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when the slot belongs to the other
    /// family or holds no artifact.
    pub fn edit_prompt(
        &mut self,
        slot: ArtifactSlot,
        new_prompt: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.check_slot(slot)?;
        self.artifacts.edit_prompt(slot, new_prompt)?;
        self.touch(clock);
        Ok(())
    }

    /// Rejects slots from the other family's pipeline.
    const fn check_slot(&self, slot: ArtifactSlot) -> Result<(), TaskDomainError> {
        if matches!(
            (slot.family(), self.family()),
            (BloggerFamily::Podcaster, BloggerFamily::Podcaster)
                | (BloggerFamily::Fashion, BloggerFamily::Fashion)
        ) {
            Ok(())
        } else {
            Err(TaskDomainError::SlotFamilyMismatch {
                slot,
                family: self.family(),
            })
        }
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
