//! Blogger profile aggregate and profile-editor snapshot types.

use super::{
    AnimationFrame, BloggerDomainError, BloggerFamily, BloggerId, Outfit, PresetLocation,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Weekly posting frequency used by auto-planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule(u8);

impl WeeklySchedule {
    /// Creates a validated schedule.
    ///
    /// # Errors
    ///
    /// Returns [`BloggerDomainError::InvalidPostingFrequency`] when the
    /// frequency is zero or exceeds seven posts per week.
    pub const fn new(posts_per_week: u8) -> Result<Self, BloggerDomainError> {
        if posts_per_week == 0 || posts_per_week > 7 {
            return Err(BloggerDomainError::InvalidPostingFrequency(posts_per_week));
        }
        Ok(Self(posts_per_week))
    }

    /// Returns the number of posts planned per week.
    #[must_use]
    pub const fn posts_per_week(self) -> u8 {
        self.0
    }
}

/// Whole-object snapshot of the editable profile fields.
///
/// The profile editor always sends the complete set of fields rather than a
/// diff, which keeps the autosave path free of lost-update anomalies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDraft {
    /// Display name.
    pub name: String,
    /// Writing persona used when generating ideas and scripts.
    pub tone_of_voice: Option<String>,
    /// Content theme description.
    pub theme: Option<String>,
    /// Speech-synthesis voice identifier.
    pub voice_id: Option<String>,
}

/// Blogger profile aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blogger {
    id: BloggerId,
    name: String,
    family: BloggerFamily,
    tone_of_voice: Option<String>,
    theme: Option<String>,
    voice_id: Option<String>,
    locations: Vec<PresetLocation>,
    outfits: Vec<Outfit>,
    animation_frames: Vec<AnimationFrame>,
    schedule: Option<WeeklySchedule>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted blogger aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBloggerData {
    /// Persisted blogger identifier.
    pub id: BloggerId,
    /// Persisted display name.
    pub name: String,
    /// Persisted content family.
    pub family: BloggerFamily,
    /// Persisted writing persona.
    pub tone_of_voice: Option<String>,
    /// Persisted theme description.
    pub theme: Option<String>,
    /// Persisted voice identifier.
    pub voice_id: Option<String>,
    /// Persisted location catalogue.
    pub locations: Vec<PresetLocation>,
    /// Persisted outfit catalogue.
    pub outfits: Vec<Outfit>,
    /// Persisted animation frame catalogue.
    pub animation_frames: Vec<AnimationFrame>,
    /// Persisted posting schedule, if configured.
    pub schedule: Option<WeeklySchedule>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Blogger {
    /// Creates a new blogger profile with empty catalogues.
    ///
    /// # Errors
    ///
    /// Returns [`BloggerDomainError::EmptyName`] when the name is empty
    /// after trimming.
    pub fn new(
        name: impl Into<String>,
        family: BloggerFamily,
        clock: &impl Clock,
    ) -> Result<Self, BloggerDomainError> {
        let name = validated_name(name)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: BloggerId::new(),
            name,
            family,
            tone_of_voice: None,
            theme: None,
            voice_id: None,
            locations: Vec::new(),
            outfits: Vec::new(),
            animation_frames: Vec::new(),
            schedule: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a blogger from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBloggerData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            family: data.family,
            tone_of_voice: data.tone_of_voice,
            theme: data.theme,
            voice_id: data.voice_id,
            locations: data.locations,
            outfits: data.outfits,
            animation_frames: data.animation_frames,
            schedule: data.schedule,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the blogger identifier.
    #[must_use]
    pub const fn id(&self) -> BloggerId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the content family.
    #[must_use]
    pub const fn family(&self) -> BloggerFamily {
        self.family
    }

    /// Returns the writing persona, if set.
    #[must_use]
    pub fn tone_of_voice(&self) -> Option<&str> {
        self.tone_of_voice.as_deref()
    }

    /// Returns the theme description, if set.
    #[must_use]
    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref()
    }

    /// Returns the speech-synthesis voice identifier, if set.
    #[must_use]
    pub fn voice_id(&self) -> Option<&str> {
        self.voice_id.as_deref()
    }

    /// Returns the preset location catalogue.
    #[must_use]
    pub fn locations(&self) -> &[PresetLocation] {
        &self.locations
    }

    /// Returns the outfit catalogue.
    #[must_use]
    pub fn outfits(&self) -> &[Outfit] {
        &self.outfits
    }

    /// Returns the animation frame catalogue.
    #[must_use]
    pub fn animation_frames(&self) -> &[AnimationFrame] {
        &self.animation_frames
    }

    /// Returns the posting schedule, if configured.
    #[must_use]
    pub const fn schedule(&self) -> Option<WeeklySchedule> {
        self.schedule
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

    /// Applies a whole-object profile snapshot from the editor.
    ///
    /// # Errors
    ///
    /// Returns [`BloggerDomainError::EmptyName`] when the draft name is
    /// empty after trimming; the profile is left unchanged.
    pub fn apply_profile(
        &mut self,
        draft: ProfileDraft,
        clock: &impl Clock,
    ) -> Result<(), BloggerDomainError> {
        let name = validated_name(draft.name)?;
        self.name = name;
        self.tone_of_voice = draft.tone_of_voice;
        self.theme = draft.theme;
        self.voice_id = draft.voice_id;
        self.touch(clock);
        Ok(())
    }

    /// Appends a preset location to the catalogue.
    pub fn add_location(&mut self, location: PresetLocation, clock: &impl Clock) {
        self.locations.push(location);
        self.touch(clock);
    }

    /// Removes the preset location at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BloggerDomainError::LocationIndexOutOfRange`] when no
    /// location exists at that index.
    pub fn remove_location(
        &mut self,
        index: usize,
        clock: &impl Clock,
    ) -> Result<PresetLocation, BloggerDomainError> {
        if index >= self.locations.len() {
            return Err(BloggerDomainError::LocationIndexOutOfRange(index));
        }
        let removed = self.locations.remove(index);
        self.touch(clock);
        Ok(removed)
    }

    /// Appends an outfit to the catalogue.
    pub fn add_outfit(&mut self, outfit: Outfit, clock: &impl Clock) {
        self.outfits.push(outfit);
        self.touch(clock);
    }

    /// Removes the outfit at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BloggerDomainError::OutfitIndexOutOfRange`] when no outfit
    /// exists at that index.
    pub fn remove_outfit(
        &mut self,
        index: usize,
        clock: &impl Clock,
    ) -> Result<Outfit, BloggerDomainError> {
        if index >= self.outfits.len() {
            return Err(BloggerDomainError::OutfitIndexOutOfRange(index));
        }
        let removed = self.outfits.remove(index);
        self.touch(clock);
        Ok(removed)
    }

    /// Replaces the animation frame catalogue.
    pub fn set_animation_frames(&mut self, frames: Vec<AnimationFrame>, clock: &impl Clock) {
        self.animation_frames = frames;
        self.touch(clock);
    }

    /// Sets the weekly posting schedule.
    pub fn set_schedule(&mut self, schedule: WeeklySchedule, clock: &impl Clock) {
        self.schedule = Some(schedule);
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Trims and validates a blogger display name.
fn validated_name(name: impl Into<String>) -> Result<String, BloggerDomainError> {
    let raw = name.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BloggerDomainError::EmptyName);
    }
    Ok(trimmed.to_owned())
}
