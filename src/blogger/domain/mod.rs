//! Domain model for blogger profiles.
//!
//! Bloggers carry the static configuration a content task draws on: which
//! content family they produce, the reusable location/outfit/frame
//! catalogues, the synthesis voice, and the weekly posting frequency used by
//! auto-planning.

mod catalogue;
mod error;
mod family;
mod ids;
mod profile;

pub use catalogue::{AnimationFrame, Outfit, OutfitPieceKind, PieceRef, PresetLocation};
pub use error::{BloggerDomainError, ParseFamilyError};
pub use family::BloggerFamily;
pub use ids::BloggerId;
pub use profile::{Blogger, PersistedBloggerData, ProfileDraft, WeeklySchedule};
