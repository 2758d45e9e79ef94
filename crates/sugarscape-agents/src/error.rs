//! Error types for the sugarscape-agents crate.
//!
//! All operations that can fail return typed errors rather than panicking.

use sugarscape_types::{Position, TraderId};
use sugarscape_world::WorldError;

/// Errors that can occur while a trader takes its turn.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Both metabolism rates are zero, so welfare weights are undefined.
    #[error("trader {trader} has zero total metabolism; welfare is undefined")]
    DegenerateMetabolism {
        /// The offending trader.
        trader: TraderId,
    },

    /// The trader's recorded position disagrees with the grid index.
    #[error("trader {trader} believes it is at {recorded} but the grid has it at {indexed:?}")]
    PositionMismatch {
        /// The trader.
        trader: TraderId,
        /// Position stored on the trader.
        recorded: Position,
        /// Position stored in the grid, if any.
        indexed: Option<Position>,
    },

    /// A grid operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },
}
