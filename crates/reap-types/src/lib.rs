//! Shared type definitions for the Reap right-click harvesting engine.
//!
//! This crate is the single source of truth for the value types that flow
//! between the world collaborator, the event bus, and the harvest engine.
//!
//! # Modules
//!
//! - [`ids`] -- Typed identifiers: actor UUIDs and namespaced block, item,
//!   and world keys.
//! - [`geometry`] -- Cell positions, faces, and hit details.
//! - [`cell`] -- Cell states, their property sets, and the age property.
//! - [`item`] -- Item stacks, tool descriptors, and drop sets.
//! - [`actor`] -- The acting entity: game mode, posture, and hands.

pub mod actor;
pub mod cell;
pub mod geometry;
pub mod ids;
pub mod item;

// Re-export all public types at crate root for convenience.
pub use actor::{Actor, GameMode, Hand};
pub use cell::{AGE_PROPERTY, AgeLookupError, AgeProperty, BlockKind, CellState, Property, PropertyValue};
pub use geometry::{BlockPos, Direction, HitResult};
pub use ids::{ActorId, BlockId, ItemId, WorldKey};
pub use item::{DropSet, ItemStack, SoundDescriptor, ToolInfo, ToolKind};
