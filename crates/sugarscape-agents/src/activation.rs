//! One full trader turn.
//!
//! # Order of operations
//!
//! 1. Choose a destination ([`crate::decision::choose_destination`])
//! 2. Move there on the grid
//! 3. Harvest every patch on the destination cell
//! 4. Metabolize
//! 5. Check for death; a dead trader is removed from the grid
//!
//! The grid is live: a trader acting later in the same step sees the moves
//! and harvests of every trader that acted before it.

use sugarscape_types::{Position, Trader, TraderId};
use sugarscape_world::{Grid, Harvest};
use tracing::{debug, info};

use crate::death::{DeathConsequences, check_death};
use crate::decision::choose_destination;
use crate::error::AgentError;
use crate::metabolism::{MetabolismResult, metabolize};

/// Outcome of a single trader turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Activation {
    /// The trader that acted.
    pub trader_id: TraderId,
    /// Cell at the start of the turn.
    pub from: Position,
    /// Cell at the end of the turn.
    pub to: Position,
    /// Welfare of the chosen cell at decision time.
    pub welfare: f64,
    /// What was harvested on arrival.
    pub harvest: Harvest,
    /// Holdings change from metabolism.
    pub metabolism: MetabolismResult,
    /// Set when the trader died at the end of this turn.
    pub death: Option<DeathConsequences>,
}

impl Activation {
    /// Whether the trader survived its turn.
    pub const fn survived(&self) -> bool {
        self.death.is_none()
    }

    /// Whether the trader changed cells.
    pub fn moved(&self) -> bool {
        self.from != self.to
    }
}

/// Run one turn for a trader against the live grid.
///
/// On death the trader is removed from the grid; the caller must also drop
/// it from its own registry so it is never scheduled again.
///
/// # Errors
///
/// Returns [`AgentError`] if the trader is not where the grid says it is,
/// if its welfare is undefined, or if a grid mutation fails. The grid may be
/// partially updated when a later stage fails.
pub fn activate(trader: &mut Trader, grid: &mut Grid) -> Result<Activation, AgentError> {
    let from = trader.position;
    let choice = choose_destination(trader, grid)?;

    grid.move_trader(trader.id, choice.position)?;
    trader.position = choice.position;

    let harvest = grid.harvest_at(trader.position)?;
    trader.sugar += harvest.sugar;
    trader.spice += harvest.spice;

    let metabolism = metabolize(trader);

    debug!(
        trader = %trader.id,
        from = %from,
        to = %trader.position,
        welfare = choice.welfare,
        harvested_sugar = harvest.sugar,
        harvested_spice = harvest.spice,
        sugar = trader.sugar,
        spice = trader.spice,
        "Trader acted"
    );

    let death = match check_death(trader) {
        Some(cause) => {
            grid.remove(trader.id)?;
            let record = DeathConsequences::new(trader, cause);
            info!(
                trader = %trader.id,
                cause = %cause,
                position = %trader.position,
                sugar = trader.sugar,
                spice = trader.spice,
                "Trader died"
            );
            Some(record)
        }
        None => None,
    };

    Ok(Activation {
        trader_id: trader.id,
        from,
        to: trader.position,
        welfare: choice.welfare,
        harvest,
        metabolism,
        death,
    })
}
