//! Blogger profile management.
//!
//! A blogger is the owner of scheduled content tasks: their family decides
//! which production pipeline applies, and their catalogues (preset
//! locations, outfits, animation frames) feed the task setup editors. The
//! profile editor autosaves through the same debounced synchronisation
//! primitive as the task editors.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
