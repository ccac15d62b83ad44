//! Content family variants.

use super::ParseFamilyError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Content family a blogger produces.
///
/// The family decides the task pipeline: which stages apply, which artifact
/// slots exist and which status enumeration is in force. Adding a family
/// means adding a variant here and extending the tagged unions that match on
/// it, never editing scattered string comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BloggerFamily {
    /// Podcast episodes: script, voiceover audio and a lip-sync video.
    Podcaster,
    /// Fashion posts: a main frame plus angle variations.
    Fashion,
}

impl BloggerFamily {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Podcaster => "podcaster",
            Self::Fashion => "fashion",
        }
    }
}

impl TryFrom<&str> for BloggerFamily {
    type Error = ParseFamilyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "podcaster" => Ok(Self::Podcaster),
            "fashion" => Ok(Self::Fashion),
            _ => Err(ParseFamilyError(value.to_owned())),
        }
    }
}

impl fmt::Display for BloggerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
