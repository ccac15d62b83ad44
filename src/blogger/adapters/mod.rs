//! Adapter implementations for blogger ports.

mod autosave;
mod memory;

pub use autosave::ProfileSaver;
pub use memory::InMemoryBloggerRepository;
