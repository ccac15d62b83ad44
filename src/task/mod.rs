//! Stage/artifact workflow engine for content production tasks.
//!
//! A task moves through a content-family-specific pipeline: idea, script,
//! setup (reference selection), asset generation, approval. This module
//! holds the lifecycle state machines for both families, the per-task
//! artifact store, the stage unlock rules, and the orchestrating services.
//! It follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
