//! Per-step resource consumption.
//!
//! Metabolism runs after the trader has moved and harvested. Holdings may
//! drop to zero or below here; the death check that follows removes such a
//! trader before anything else can observe it.

use sugarscape_types::Trader;

/// Holdings before and after one metabolism step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetabolismResult {
    /// Sugar consumed.
    pub sugar_burned: f64,
    /// Spice consumed.
    pub spice_burned: f64,
    /// Sugar left afterwards. May be zero or negative.
    pub sugar_after: f64,
    /// Spice left afterwards. May be zero or negative.
    pub spice_after: f64,
}

/// Subtract one step of metabolism from the trader's holdings.
pub fn metabolize(trader: &mut Trader) -> MetabolismResult {
    let sugar_burned = f64::from(trader.metabolism_sugar);
    let spice_burned = f64::from(trader.metabolism_spice);
    trader.sugar -= sugar_burned;
    trader.spice -= spice_burned;
    MetabolismResult {
        sugar_burned,
        spice_burned,
        sugar_after: trader.sugar,
        spice_after: trader.spice,
    }
}

#[cfg(test)]
mod tests {
    use sugarscape_types::{NeighborhoodKind, Position, TraderId};

    use super::*;

    fn make_trader(sugar: f64, spice: f64, ms: u32, mp: u32) -> Trader {
        Trader {
            id: TraderId::new(1),
            position: Position::new(0, 0),
            sugar,
            spice,
            metabolism_sugar: ms,
            metabolism_spice: mp,
            vision: 1,
            neighborhood: NeighborhoodKind::VonNeumann,
        }
    }

    #[test]
    fn subtracts_each_rate() {
        let mut trader = make_trader(10.0, 7.0, 3, 2);
        let result = metabolize(&mut trader);
        assert!((trader.sugar - 7.0).abs() < f64::EPSILON);
        assert!((trader.spice - 5.0).abs() < f64::EPSILON);
        assert!((result.sugar_burned - 3.0).abs() < f64::EPSILON);
        assert!((result.spice_after - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn can_go_negative() {
        let mut trader = make_trader(1.0, 1.0, 2, 0);
        let result = metabolize(&mut trader);
        assert!((result.sugar_after + 1.0).abs() < f64::EPSILON);
        assert!((result.spice_after - 1.0).abs() < f64::EPSILON);
    }
}
