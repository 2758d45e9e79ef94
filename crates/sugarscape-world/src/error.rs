//! Error types for the `sugarscape-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type alias.

use std::path::PathBuf;

use sugarscape_types::{Position, ResourceKind, TraderId};

/// Errors that can occur during grid and landscape operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A grid must have at least one row and one column.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested number of rows.
        width: usize,
        /// Requested number of columns.
        height: usize,
    },

    /// A position lies outside the grid.
    #[error("position {position} is outside the {width}x{height} grid")]
    OutOfBounds {
        /// The offending position.
        position: Position,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },

    /// Another trader already stands on the target cell.
    #[error("cell {position} is already occupied by trader {occupant}")]
    CellOccupied {
        /// The contested cell.
        position: Position,
        /// The trader currently on it.
        occupant: TraderId,
    },

    /// The trader is already on the grid and must be removed before placing.
    #[error("trader {trader} is already placed at {position}")]
    TraderAlreadyPlaced {
        /// The trader.
        trader: TraderId,
        /// Where it currently stands.
        position: Position,
    },

    /// The trader has no position on the grid.
    #[error("trader {0} is not on the grid")]
    TraderNotPlaced(TraderId),

    /// A patch of this kind already exists at the position.
    #[error("duplicate {kind} patch at {position}")]
    DuplicatePatch {
        /// Resource kind.
        kind: ResourceKind,
        /// The cell holding the existing patch.
        position: Position,
    },

    /// A capacity was negative or not a finite number.
    #[error("invalid patch capacity {0}")]
    InvalidCapacity(f64),

    /// A patch amount was outside `[0, capacity]`.
    #[error("patch amount {amount} outside [0, {capacity}]")]
    InvalidAmount {
        /// The requested amount.
        amount: f64,
        /// The patch capacity.
        capacity: f64,
    },

    /// The landscape file could not be read.
    #[error("failed to read landscape {path}: {source}")]
    LandscapeIo {
        /// Path that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A landscape entry is not a number.
    #[error("landscape line {line}, column {column}: cannot parse {token:?} as a number")]
    LandscapeParse {
        /// One-based line number in the source text.
        line: usize,
        /// One-based column (token index) within the line.
        column: usize,
        /// The offending token.
        token: String,
    },

    /// A landscape row has a different length than the first row.
    #[error("landscape row {row} has {found} columns, expected {expected}")]
    LandscapeRagged {
        /// Zero-based row index.
        row: usize,
        /// Column count of the first row.
        expected: usize,
        /// Column count of this row.
        found: usize,
    },

    /// The landscape contains no rows.
    #[error("landscape is empty")]
    LandscapeEmpty,

    /// The landscape shape does not match the configured grid size.
    #[error("landscape is {width}x{height} but the grid is configured as {expected_width}x{expected_height}")]
    LandscapeShape {
        /// Configured width.
        expected_width: u32,
        /// Configured height.
        expected_height: u32,
        /// Landscape rows.
        width: u32,
        /// Landscape columns.
        height: u32,
    },
}
