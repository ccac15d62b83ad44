//! Error types for blogger domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or mutating blogger profiles.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BloggerDomainError {
    /// The blogger name is empty after trimming.
    #[error("blogger name must not be empty")]
    EmptyName,

    /// The weekly posting frequency is outside the supported range.
    #[error("invalid posting frequency {0}, expected between 1 and 7 posts per week")]
    InvalidPostingFrequency(u8),

    /// No preset location exists at the given catalogue index.
    #[error("no preset location at index {0}")]
    LocationIndexOutOfRange(usize),

    /// No outfit exists at the given catalogue index.
    #[error("no outfit at index {0}")]
    OutfitIndexOutOfRange(usize),
}

/// Error returned while parsing content families from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown content family: {0}")]
pub struct ParseFamilyError(pub String);
