//! Shared type definitions for the Sugarscape simulation.
//!
//! This crate is the single source of truth for the plain data types used
//! across the workspace. It carries no simulation logic: growback lives in
//! `sugarscape-world`, the foraging decision in `sugarscape-agents`, and the
//! step scheduler in `sugarscape-core`.
//!
//! # Modules
//!
//! - [`ids`] -- Sequential identifiers for patches and traders
//! - [`enums`] -- Resource kinds and neighborhood kinds
//! - [`structs`] -- Grid positions and trader state

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{NeighborhoodKind, ResourceKind};
pub use ids::{IdSequence, PatchId, TraderId};
pub use structs::{Position, Trader};
