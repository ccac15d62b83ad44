//! Repository port for blogger profile persistence.

use crate::blogger::domain::{Blogger, BloggerId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for blogger repository operations.
pub type BloggerRepositoryResult<T> = Result<T, BloggerRepositoryError>;

/// Blogger persistence contract.
#[async_trait]
pub trait BloggerRepository: Send + Sync {
    /// Stores a new blogger profile.
    ///
    /// # Errors
    ///
    /// Returns [`BloggerRepositoryError::DuplicateBlogger`] when the
    /// identifier already exists.
    async fn store(&self, blogger: &Blogger) -> BloggerRepositoryResult<()>;

    /// Persists changes to an existing blogger profile.
    ///
    /// # Errors
    ///
    /// Returns [`BloggerRepositoryError::NotFound`] when the blogger does
    /// not exist.
    async fn update(&self, blogger: &Blogger) -> BloggerRepositoryResult<()>;

    /// Finds a blogger by identifier.
    ///
    /// Returns `None` when the blogger does not exist.
    async fn find_by_id(&self, id: BloggerId) -> BloggerRepositoryResult<Option<Blogger>>;

    /// Returns all blogger profiles.
    async fn list(&self) -> BloggerRepositoryResult<Vec<Blogger>>;

    /// Deletes a blogger profile.
    ///
    /// # Errors
    ///
    /// Returns [`BloggerRepositoryError::NotFound`] when the blogger does
    /// not exist.
    async fn delete(&self, id: BloggerId) -> BloggerRepositoryResult<()>;
}

/// Errors returned by blogger repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BloggerRepositoryError {
    /// A blogger with the same identifier already exists.
    #[error("duplicate blogger identifier: {0}")]
    DuplicateBlogger(BloggerId),

    /// The blogger was not found.
    #[error("blogger not found: {0}")]
    NotFound(BloggerId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BloggerRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
