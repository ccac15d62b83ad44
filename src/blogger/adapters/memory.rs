//! In-memory repository for blogger profile tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::blogger::{
    domain::{Blogger, BloggerId},
    ports::{BloggerRepository, BloggerRepositoryError, BloggerRepositoryResult},
};

/// Thread-safe in-memory blogger repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBloggerRepository {
    state: Arc<RwLock<HashMap<BloggerId, Blogger>>>,
}

impl InMemoryBloggerRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BloggerRepository for InMemoryBloggerRepository {
    async fn store(&self, blogger: &Blogger) -> BloggerRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            BloggerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.contains_key(&blogger.id()) {
            return Err(BloggerRepositoryError::DuplicateBlogger(blogger.id()));
        }
        state.insert(blogger.id(), blogger.clone());
        Ok(())
    }

    async fn update(&self, blogger: &Blogger) -> BloggerRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            BloggerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.contains_key(&blogger.id()) {
            return Err(BloggerRepositoryError::NotFound(blogger.id()));
        }
        state.insert(blogger.id(), blogger.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: BloggerId) -> BloggerRepositoryResult<Option<Blogger>> {
        let state = self.state.read().map_err(|err| {
            BloggerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&id).cloned())
    }

    async fn list(&self) -> BloggerRepositoryResult<Vec<Blogger>> {
        let state = self.state.read().map_err(|err| {
            BloggerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.values().cloned().collect())
    }

    async fn delete(&self, id: BloggerId) -> BloggerRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            BloggerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state
            .remove(&id)
            .map(|_| ())
            .ok_or(BloggerRepositoryError::NotFound(id))
    }
}
