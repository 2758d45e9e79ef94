//! Cobb-Douglas welfare used to rank candidate cells.
//!
//! A trader values a bundle of sugar `s` and spice `p` as
//!
//! ```text
//! W(s, p) = s^(ms / (ms + mp)) * p^(mp / (ms + mp))
//! ```
//!
//! where `ms` and `mp` are its sugar and spice metabolism. The resource it
//! burns faster weighs more. The exponents sum to one, and `0^x = 0` for any
//! positive exponent, so a bundle missing a needed good is worth nothing.

use sugarscape_types::Trader;

use crate::error::AgentError;

/// Exponents of the welfare function for one trader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WelfareWeights {
    /// Exponent applied to sugar, `ms / (ms + mp)`.
    pub sugar: f64,
    /// Exponent applied to spice, `mp / (ms + mp)`.
    pub spice: f64,
}

impl WelfareWeights {
    /// Derive the exponents from metabolism rates.
    ///
    /// Returns `None` when both rates are zero.
    pub fn from_metabolism(metabolism_sugar: u32, metabolism_spice: u32) -> Option<Self> {
        if metabolism_sugar == 0 && metabolism_spice == 0 {
            return None;
        }
        // Both rates fit in f64 exactly, and so does their sum.
        let total = f64::from(metabolism_sugar) + f64::from(metabolism_spice);
        Some(Self {
            sugar: f64::from(metabolism_sugar) / total,
            spice: f64::from(metabolism_spice) / total,
        })
    }

    /// Weights for a trader.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::DegenerateMetabolism`] if both of the trader's
    /// metabolism rates are zero.
    pub fn for_trader(trader: &Trader) -> Result<Self, AgentError> {
        Self::from_metabolism(trader.metabolism_sugar, trader.metabolism_spice)
            .ok_or(AgentError::DegenerateMetabolism { trader: trader.id })
    }

    /// Evaluate the welfare of a bundle.
    ///
    /// Negative quantities are treated as zero.
    pub fn welfare(self, sugar: f64, spice: f64) -> f64 {
        sugar.max(0.0).powf(self.sugar) * spice.max(0.0).powf(self.spice)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sugarscape_types::{NeighborhoodKind, Position, TraderId};

    use super::*;

    fn weights(ms: u32, mp: u32) -> WelfareWeights {
        WelfareWeights::from_metabolism(ms, mp).unwrap()
    }

    #[test]
    fn exponents_sum_to_one() {
        let w = weights(2, 3);
        assert!((w.sugar - 0.4).abs() < 1e-12);
        assert!((w.spice - 0.6).abs() < 1e-12);
        assert!((w.sugar + w.spice - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_total_metabolism_has_no_weights() {
        assert!(WelfareWeights::from_metabolism(0, 0).is_none());
    }

    #[test]
    fn equal_weights_is_geometric_mean() {
        let w = weights(1, 1);
        assert!((w.welfare(8.0, 2.0) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn symmetric_bundles_tie_exactly() {
        let w = weights(1, 1);
        assert_eq!(
            w.welfare(8.0, 5.0).total_cmp(&w.welfare(5.0, 8.0)),
            core::cmp::Ordering::Equal
        );
    }

    #[test]
    fn missing_good_is_worthless() {
        let w = weights(2, 3);
        assert!(w.welfare(0.0, 7.0).abs() < f64::EPSILON);
        assert!(w.welfare(7.0, 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn strictly_increasing_in_each_good() {
        let w = weights(3, 1);
        let mut previous = w.welfare(1.0, 4.0);
        for s in 2..20 {
            let next = w.welfare(f64::from(s), 4.0);
            assert!(next > previous);
            previous = next;
        }
        let mut previous = w.welfare(4.0, 1.0);
        for p in 2..20 {
            let next = w.welfare(4.0, f64::from(p));
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn zero_spice_metabolism_ignores_spice() {
        // Exponent 0 on spice: p^0 = 1.
        let w = weights(2, 0);
        assert!((w.welfare(9.0, 0.0) - 9.0).abs() < 1e-12);
        assert!((w.welfare(9.0, 100.0) - 9.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_trader_reports_error() {
        let trader = Trader {
            id: TraderId::new(4),
            position: Position::new(0, 0),
            sugar: 1.0,
            spice: 1.0,
            metabolism_sugar: 0,
            metabolism_spice: 0,
            vision: 1,
            neighborhood: NeighborhoodKind::VonNeumann,
        };
        assert!(matches!(
            WelfareWeights::for_trader(&trader),
            Err(AgentError::DegenerateMetabolism { .. })
        ));
    }
}
