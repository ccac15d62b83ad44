//! Atelier: workflow engine for AI-generated social content production.
//!
//! This crate provides the core coordination logic for producing scheduled
//! content tasks (podcast episodes, fashion posts) through their dependent
//! production stages: idea, script, setup, asset generation, approval and
//! publication.
//!
//! # Architecture
//!
//! Atelier follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory stores,
//!   autosave writers)
//!
//! # Modules
//!
//! - [`blogger`]: Blogger profiles, catalogues and posting schedules
//! - [`task`]: Task lifecycle, artifact store, stage graph and workflow
//!   orchestration
//! - [`sync`]: Debounced snapshot synchronisation for editor autosave

pub mod blogger;
pub mod sync;
pub mod task;
