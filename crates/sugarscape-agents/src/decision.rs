//! Foraging decision: where a trader moves this step.
//!
//! 1. **Candidates** -- every cell within vision (own cell included) that no
//!    other trader stands on.
//! 2. **Welfare** -- for each candidate, the welfare of current holdings plus
//!    whatever sugar and spice lie on that cell.
//! 3. **Selection** -- highest welfare wins. Ties go to the candidate closest
//!    to the trader under its neighborhood metric, then to the one that comes
//!    first in [`Grid::neighborhood`] order.
//!
//! Welfare is compared exactly. A candidate with strictly lower welfare is
//! never chosen over a better one, whatever its distance.

use core::cmp::Ordering;

use sugarscape_types::{Position, ResourceKind, Trader};
use sugarscape_world::Grid;

use crate::error::AgentError;
use crate::welfare::WelfareWeights;

/// A cell the trader could move to, with its evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// The cell.
    pub position: Position,
    /// Sugar the trader would harvest there.
    pub sugar_gain: f64,
    /// Spice the trader would harvest there.
    pub spice_gain: f64,
    /// Welfare of holdings after harvesting there.
    pub welfare: f64,
    /// Distance from the trader's current cell.
    pub distance: u32,
}

/// Evaluate every cell the trader may move to, in neighborhood order.
///
/// # Errors
///
/// Returns [`AgentError::PositionMismatch`] if the grid does not have the
/// trader where the trader thinks it is, and
/// [`AgentError::DegenerateMetabolism`] if welfare is undefined.
pub fn candidates(trader: &Trader, grid: &Grid) -> Result<Vec<Candidate>, AgentError> {
    let indexed = grid.position_of(trader.id);
    if indexed != Some(trader.position) {
        return Err(AgentError::PositionMismatch {
            trader: trader.id,
            recorded: trader.position,
            indexed,
        });
    }

    let weights = WelfareWeights::for_trader(trader)?;
    let evaluated = grid
        .neighborhood(trader.position, trader.neighborhood, true, trader.vision)
        .into_iter()
        .filter(|&cell| !grid.is_occupied_by_trader(cell, Some(trader.id)))
        .map(|cell| {
            let sugar_gain = grid.amount_at(ResourceKind::Sugar, cell);
            let spice_gain = grid.amount_at(ResourceKind::Spice, cell);
            Candidate {
                position: cell,
                sugar_gain,
                spice_gain,
                welfare: weights.welfare(trader.sugar + sugar_gain, trader.spice + spice_gain),
                distance: trader.neighborhood.distance(trader.position, cell),
            }
        })
        .collect();
    Ok(evaluated)
}

/// Pick the best candidate: max welfare, then min distance, then first.
pub fn select(candidates: &[Candidate]) -> Option<&Candidate> {
    let mut iter = candidates.iter();
    let mut best = iter.next()?;
    for candidate in iter {
        let better = match candidate.welfare.total_cmp(&best.welfare) {
            Ordering::Greater => true,
            Ordering::Equal => candidate.distance < best.distance,
            Ordering::Less => false,
        };
        if better {
            best = candidate;
        }
    }
    Some(best)
}

/// Decide where the trader moves this step.
///
/// The trader's own cell is always a candidate, so a decision always
/// exists for a trader that is on the grid.
///
/// # Errors
///
/// Propagates errors from [`candidates`].
pub fn choose_destination(trader: &Trader, grid: &Grid) -> Result<Candidate, AgentError> {
    let options = candidates(trader, grid)?;
    select(&options)
        .copied()
        .ok_or_else(|| AgentError::PositionMismatch {
            trader: trader.id,
            recorded: trader.position,
            indexed: grid.position_of(trader.id),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sugarscape_types::{NeighborhoodKind, PatchId, TraderId};
    use sugarscape_world::ResourcePatch;

    use super::*;

    fn p(x: u32, y: u32) -> Position {
        Position::new(x, y)
    }

    fn make_trader(id: u64, position: Position) -> Trader {
        Trader {
            id: TraderId::new(id),
            position,
            sugar: 5.0,
            spice: 5.0,
            metabolism_sugar: 1,
            metabolism_spice: 1,
            vision: 1,
            neighborhood: NeighborhoodKind::VonNeumann,
        }
    }

    fn add_patch(grid: &mut Grid, id: u64, kind: ResourceKind, at: Position, amount: f64) {
        let patch = ResourcePatch::new(PatchId::new(id), kind, at, amount).unwrap();
        grid.add_patch(patch).unwrap();
    }

    fn candidate(x: u32, welfare: f64, distance: u32) -> Candidate {
        Candidate {
            position: p(x, 0),
            sugar_gain: 0.0,
            spice_gain: 0.0,
            welfare,
            distance,
        }
    }

    #[test]
    fn own_cell_always_candidate() {
        let mut grid = Grid::new(3, 3).unwrap();
        let trader = make_trader(1, p(1, 1));
        grid.place(trader.id, trader.position).unwrap();
        // Surround the trader on every side.
        for (id, cell) in (10..).zip([p(0, 1), p(1, 0), p(1, 2), p(2, 1)]) {
            grid.place(TraderId::new(id), cell).unwrap();
        }

        let options = candidates(&trader, &grid).unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options.first().map(|c| c.position), Some(p(1, 1)));
        let choice = choose_destination(&trader, &grid).unwrap();
        assert_eq!(choice.position, p(1, 1));
    }

    #[test]
    fn occupied_cells_are_filtered() {
        let mut grid = Grid::new(3, 3).unwrap();
        let trader = make_trader(1, p(1, 1));
        grid.place(trader.id, trader.position).unwrap();
        add_patch(&mut grid, 100, ResourceKind::Sugar, p(2, 1), 4.0);
        grid.place(TraderId::new(2), p(2, 1)).unwrap();

        let options = candidates(&trader, &grid).unwrap();
        assert!(options.iter().all(|c| c.position != p(2, 1)));
        let choice = choose_destination(&trader, &grid).unwrap();
        assert_ne!(choice.position, p(2, 1));
    }

    #[test]
    fn higher_welfare_beats_distance() {
        let options = [candidate(0, 6.0, 0), candidate(1, 6.5, 3), candidate(2, 6.4, 1)];
        assert_eq!(select(&options).map(|c| c.position), Some(p(1, 0)));
    }

    #[test]
    fn ties_go_to_nearest() {
        let options = [candidate(0, 7.0, 2), candidate(1, 7.0, 1), candidate(2, 7.0, 3)];
        assert_eq!(select(&options).map(|c| c.position), Some(p(1, 0)));
    }

    #[test]
    fn full_ties_go_to_first() {
        let options = [candidate(0, 7.0, 1), candidate(1, 7.0, 1)];
        assert_eq!(select(&options).map(|c| c.position), Some(p(0, 0)));
    }

    #[test]
    fn empty_candidates_select_nothing() {
        assert!(select(&[]).is_none());
    }

    #[test]
    fn symmetric_offers_resolve_by_neighborhood_order() {
        // Equal metabolism, holdings (5, 5), vision 1. One neighbor offers
        // +3 sugar, another +3 spice: W = 8^0.5 * 5^0.5 either way. Both are
        // at distance 1, so the one listed first in neighborhood order wins.
        // Ring 1 around (2, 2) is ordered (1,2), (2,1), (2,3), (3,2).
        let mut grid = Grid::new(5, 5).unwrap();
        let trader = make_trader(1, p(2, 2));
        grid.place(trader.id, trader.position).unwrap();
        add_patch(&mut grid, 100, ResourceKind::Sugar, p(3, 2), 3.0);
        add_patch(&mut grid, 101, ResourceKind::Spice, p(2, 3), 3.0);

        let options = candidates(&trader, &grid).unwrap();
        let sugar_cell = options.iter().find(|c| c.position == p(3, 2)).unwrap();
        let spice_cell = options.iter().find(|c| c.position == p(2, 3)).unwrap();
        assert_eq!(
            sugar_cell.welfare.total_cmp(&spice_cell.welfare),
            Ordering::Equal
        );
        let stay = options.first().unwrap();
        assert_eq!(stay.position, p(2, 2));
        assert!(stay.welfare < spice_cell.welfare);

        let choice = choose_destination(&trader, &grid).unwrap();
        assert_eq!(choice.position, p(2, 3));
        assert!((choice.spice_gain - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn nearer_of_equal_offers_wins() {
        let mut grid = Grid::new(7, 7).unwrap();
        let mut trader = make_trader(1, p(3, 3));
        trader.vision = 3;
        grid.place(trader.id, trader.position).unwrap();
        add_patch(&mut grid, 100, ResourceKind::Sugar, p(0, 3), 2.0);
        add_patch(&mut grid, 101, ResourceKind::Sugar, p(3, 5), 2.0);

        let choice = choose_destination(&trader, &grid).unwrap();
        assert_eq!(choice.position, p(3, 5));
        assert_eq!(choice.distance, 2);
    }

    #[test]
    fn vision_limits_candidates() {
        let mut grid = Grid::new(7, 1).unwrap();
        let trader = make_trader(1, p(0, 0));
        grid.place(trader.id, trader.position).unwrap();
        add_patch(&mut grid, 100, ResourceKind::Sugar, p(3, 0), 4.0);

        let choice = choose_destination(&trader, &grid).unwrap();
        assert_eq!(choice.position, p(0, 0));
    }

    #[test]
    fn mismatched_position_is_an_error() {
        let mut grid = Grid::new(3, 3).unwrap();
        let trader = make_trader(1, p(1, 1));
        grid.place(trader.id, p(0, 0)).unwrap();
        assert!(matches!(
            candidates(&trader, &grid),
            Err(AgentError::PositionMismatch { .. })
        ));
    }

    #[test]
    fn zero_metabolism_trader_cannot_rank_cells() {
        let mut grid = Grid::new(3, 3).unwrap();
        let mut trader = make_trader(1, p(1, 1));
        trader.metabolism_sugar = 0;
        trader.metabolism_spice = 0;
        grid.place(trader.id, trader.position).unwrap();
        assert!(matches!(
            candidates(&trader, &grid),
            Err(AgentError::DegenerateMetabolism { .. })
        ));
        assert!(choose_destination(&trader, &grid).is_err());
    }
}
