//! Port contracts for blogger profile management.

mod repository;

pub use repository::{BloggerRepository, BloggerRepositoryError, BloggerRepositoryResult};
