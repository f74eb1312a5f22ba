//! World collaborator interface and in-memory reference world for Reap.
//!
//! The harvest engine never owns world state. It reads and mutates cells
//! through the [`World`] trait, which hosts implement on top of their own
//! block storage, drop tables, and sound playback.
//!
//! # Modules
//!
//! - [`world`] -- The [`World`] trait consumed by the harvest engine.
//! - [`grid`] -- [`GridWorld`], a sparse in-memory world that journals every
//!   mutation as a [`WorldEffect`].
//! - [`catalog`] -- Crop definitions (age range, drops, replant item, sound)
//!   for the vanilla crops and a few modded lookalikes.
//! - [`error`] -- Error types for building reference worlds.

pub mod catalog;
pub mod error;
pub mod grid;
pub mod world;

// Re-export primary types at crate root.
pub use catalog::{CropCatalog, CropDefinition};
pub use error::WorldError;
pub use grid::{GridWorld, WorldEffect};
pub use world::World;
