//! Default generation-instruction templates, rendered from setup fields.

use crate::task::domain::{ArtifactSlot, LocationChoice, TaskSetup};
use minijinja::{Environment, context};
use thiserror::Error;

const FASHION_MAIN: &str = "Full-height fashion photograph, 9:16 portrait. \
Location: {{ location }}. Outfit: {{ outfit }}. \
Professional quality, consistent styling and lighting.";

const FASHION_ANGLE: &str = "Angle variation of the approved main frame, 4:5. \
{{ angle }}. Keep the same outfit, style, lighting and location.";

const PODCASTER_AUDIO: &str =
    "Voiceover narration in the blogger's synthesised voice. Text: {{ voiceover }}";

const PODCASTER_VIDEO: &str = "Lip-sync video over the generated voiceover, using \
{{ frame_count }} selected animation frame(s){% if location %} in {{ location }}{% endif %}.";

const ANGLE_CLOSE_UP: &str = "Close-up shot focusing on upper body and face";
const ANGLE_MEDIUM: &str = "Medium shot from waist up, slightly angled to the side";
const ANGLE_DETAIL: &str = "Detail shot focusing on outfit accessories and styling details";

/// Errors raised while rendering generation instructions.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Template registration or rendering failed.
    #[error("instruction template error: {0}")]
    Template(#[from] minijinja::Error),

    /// The slot's family does not match the setup block.
    #[error("no instruction template for slot {0} with this setup")]
    UnsupportedSlot(ArtifactSlot),
}

/// Renders the default generation instructions for each artifact slot.
pub struct PromptBuilder {
    environment: Environment<'static>,
}

impl PromptBuilder {
    /// Creates a builder with the stock templates registered.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Template`] when a stock template fails to
    /// parse.
    pub fn new() -> Result<Self, PromptError> {
        let mut environment = Environment::new();
        environment.add_template("fashion_main", FASHION_MAIN)?;
        environment.add_template("fashion_angle", FASHION_ANGLE)?;
        environment.add_template("podcaster_audio", PODCASTER_AUDIO)?;
        environment.add_template("podcaster_video", PODCASTER_VIDEO)?;
        Ok(Self { environment })
    }

    /// Renders the default instructions for `slot` from the setup fields.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::UnsupportedSlot`] when the slot belongs to
    /// the other family, or [`PromptError::Template`] when rendering fails.
    pub fn instructions(&self, slot: ArtifactSlot, setup: &TaskSetup) -> Result<String, PromptError> {
        match (slot, setup) {
            (ArtifactSlot::Main, TaskSetup::Fashion(fashion)) => {
                let location = fashion
                    .location
                    .as_ref()
                    .map_or("", |choice| choice.description());
                let outfit = fashion
                    .outfit
                    .as_ref()
                    .map_or_else(|| "as styled".to_owned(), |outfit| outfit.describe());
                let rendered = self
                    .environment
                    .get_template("fashion_main")?
                    .render(context! { location, outfit })?;
                Ok(rendered)
            }
            (
                ArtifactSlot::Angle1 | ArtifactSlot::Angle2 | ArtifactSlot::Angle3,
                TaskSetup::Fashion(_),
            ) => {
                let angle = match slot {
                    ArtifactSlot::Angle2 => ANGLE_MEDIUM,
                    ArtifactSlot::Angle3 => ANGLE_DETAIL,
                    _ => ANGLE_CLOSE_UP,
                };
                let rendered = self
                    .environment
                    .get_template("fashion_angle")?
                    .render(context! { angle })?;
                Ok(rendered)
            }
            (ArtifactSlot::Audio, TaskSetup::Podcaster(podcaster)) => {
                let rendered = self
                    .environment
                    .get_template("podcaster_audio")?
                    .render(context! { voiceover => podcaster.voiceover_text })?;
                Ok(rendered)
            }
            (ArtifactSlot::Video, TaskSetup::Podcaster(podcaster)) => {
                let location = podcaster
                    .selected_location
                    .as_ref()
                    .map(LocationChoice::description);
                let rendered = self.environment.get_template("podcaster_video")?.render(
                    context! { frame_count => podcaster.selected_frames.len(), location },
                )?;
                Ok(rendered)
            }
            _ => Err(PromptError::UnsupportedSlot(slot)),
        }
    }
}
