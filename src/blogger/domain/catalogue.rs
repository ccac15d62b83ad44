//! Reusable catalogue entries referenced by task setup editors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A preset shooting location in a blogger's catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetLocation {
    /// Short display title.
    pub title: String,
    /// Free-text description used when building generation context.
    pub description: String,
    /// Optional previously generated reference image.
    pub image_url: Option<String>,
}

/// An animation frame with an optional emotion label, selectable for
/// lip-sync video generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationFrame {
    /// Frame image reference.
    pub image_url: String,
    /// Emotion depicted in the frame, if labelled.
    pub emotion: Option<String>,
}

/// Outfit slot an individual garment reference occupies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OutfitPieceKind {
    /// Upper-body garment.
    Top,
    /// Lower-body garment.
    Bottom,
    /// Footwear.
    Shoes,
    /// Bags, jewellery and other accessories.
    Accessories,
}

impl OutfitPieceKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Shoes => "shoes",
            Self::Accessories => "accessories",
        }
    }
}

impl fmt::Display for OutfitPieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a single outfit piece: either an uploaded image or a
/// textual description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PieceRef {
    /// Image reference usable as a generation reference input.
    Url(String),
    /// Free-text description of the piece.
    Text(String),
}

impl PieceRef {
    /// Returns the image URL when the piece is image-backed.
    #[must_use]
    pub const fn as_url(&self) -> Option<&String> {
        match self {
            Self::Url(url) => Some(url),
            Self::Text(_) => None,
        }
    }
}

/// A composed outfit: named pieces keyed by slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outfit {
    /// Optional outfit name.
    pub name: Option<String>,
    /// Garment references keyed by outfit slot.
    pub pieces: BTreeMap<OutfitPieceKind, PieceRef>,
}

impl Outfit {
    /// Returns whether no pieces have been chosen yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Returns the first image-backed piece, usable as a generation
    /// reference image.
    #[must_use]
    pub fn reference_image(&self) -> Option<&str> {
        self.pieces
            .values()
            .find_map(|piece| piece.as_url().map(String::as_str))
    }

    /// Renders a short textual summary of the outfit for generation
    /// instructions.
    #[must_use]
    pub fn describe(&self) -> String {
        let parts: Vec<String> = self
            .pieces
            .iter()
            .map(|(kind, piece)| match piece {
                PieceRef::Url(_) => format!("{kind} from reference image"),
                PieceRef::Text(text) => format!("{kind}: {text}"),
            })
            .collect();
        parts.join(", ")
    }
}
