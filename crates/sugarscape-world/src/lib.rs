//! Geography and resources for the Sugarscape simulation.
//!
//! This crate models the physical world: a bounded rectangular grid whose
//! cells may carry a sugar patch, a spice patch, both, or neither, plus the
//! index of which trader stands where.
//!
//! # Modules
//!
//! - [`error`] -- Error types for grid and landscape operations.
//! - [`grid`] -- [`Grid`]: patches, trader occupancy, and vision
//!   neighborhoods with a deterministic ordering.
//! - [`landscape`] -- [`Landscape`]: capacity matrices read from a text
//!   file, with spice mirrored from sugar.
//! - [`resource`] -- [`ResourcePatch`]: growback and harvest.

pub mod error;
pub mod grid;
pub mod landscape;
pub mod resource;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use grid::{CellContents, Grid, Harvest};
pub use landscape::Landscape;
pub use resource::{GROWBACK_PER_STEP, ResourcePatch};
