//! Death by exhaustion.
//!
//! A trader dies at the end of its turn when its sugar or its spice is at or
//! below zero. The dead trader is taken off the grid and never scheduled
//! again. Whatever it held is lost; nothing is dropped on the cell.

use sugarscape_types::{Position, Trader, TraderId};

/// Which stock ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeathCause {
    /// Sugar reached zero or below.
    SugarExhausted,
    /// Spice reached zero or below.
    SpiceExhausted,
    /// Both stocks reached zero or below in the same turn.
    BothExhausted,
}

impl core::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::SugarExhausted => write!(f, "sugar_exhausted"),
            Self::SpiceExhausted => write!(f, "spice_exhausted"),
            Self::BothExhausted => write!(f, "both_exhausted"),
        }
    }
}

/// Check whether a trader meets a death condition.
///
/// Returns `Some(cause)` if the trader is dead. Only inspects state.
pub const fn check_death(trader: &Trader) -> Option<DeathCause> {
    match (trader.sugar <= 0.0, trader.spice <= 0.0) {
        (true, true) => Some(DeathCause::BothExhausted),
        (true, false) => Some(DeathCause::SugarExhausted),
        (false, true) => Some(DeathCause::SpiceExhausted),
        (false, false) => None,
    }
}

/// Record of a trader's death, for logging and for the scheduler's
/// bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct DeathConsequences {
    /// The trader who died.
    pub trader_id: TraderId,
    /// Why it died.
    pub cause: DeathCause,
    /// The cell it died on.
    pub position: Position,
    /// Sugar held at death.
    pub final_sugar: f64,
    /// Spice held at death.
    pub final_spice: f64,
}

impl DeathConsequences {
    /// Capture the consequences for a trader that has died of `cause`.
    pub const fn new(trader: &Trader, cause: DeathCause) -> Self {
        Self {
            trader_id: trader.id,
            cause,
            position: trader.position,
            final_sugar: trader.sugar,
            final_spice: trader.spice,
        }
    }
}
