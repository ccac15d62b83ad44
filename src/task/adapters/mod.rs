//! Adapter implementations for task ports.

mod autosave;
mod memory;

pub use autosave::SetupSaver;
pub use memory::InMemoryTaskRepository;
