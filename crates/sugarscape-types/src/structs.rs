//! Core entity structs: grid positions and trader state.

use serde::{Deserialize, Serialize};

use crate::enums::{NeighborhoodKind, ResourceKind};
use crate::ids::TraderId;

/// A cell coordinate on the bounded grid.
///
/// `x` is the row index and `y` the column index of the landscape matrix.
/// The derived ordering compares `x` first, which is the row-major order
/// used to break ties between equally distant cells.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Row index, in `[0, width)`.
    pub x: u32,
    /// Column index, in `[0, height)`.
    pub y: u32,
}

impl Position {
    /// Create a position from its coordinates.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Mutable state of a single trader.
///
/// Holdings are kept as `f64` because landscape capacities are read as
/// arbitrary non-negative numbers. A trader whose sugar or spice drops to
/// zero or below is removed from the simulation at the end of its turn, so
/// a registered trader always holds positive stocks between steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trader {
    /// Stable identifier.
    pub id: TraderId,
    /// Current cell.
    pub position: Position,
    /// Accumulated sugar.
    pub sugar: f64,
    /// Accumulated spice.
    pub spice: f64,
    /// Sugar consumed per step.
    pub metabolism_sugar: u32,
    /// Spice consumed per step.
    pub metabolism_spice: u32,
    /// Radius of the cells the trader can evaluate.
    pub vision: u32,
    /// Adjacency used for vision and distance.
    pub neighborhood: NeighborhoodKind,
}

impl Trader {
    /// Current holding of the given resource.
    pub const fn holding(&self, kind: ResourceKind) -> f64 {
        match kind {
            ResourceKind::Sugar => self.sugar,
            ResourceKind::Spice => self.spice,
        }
    }

    /// Per-step consumption of the given resource.
    pub const fn metabolism(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Sugar => self.metabolism_sugar,
            ResourceKind::Spice => self.metabolism_spice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trader() -> Trader {
        Trader {
            id: TraderId::new(3),
            position: Position::new(1, 2),
            sugar: 10.0,
            spice: 4.0,
            metabolism_sugar: 2,
            metabolism_spice: 1,
            vision: 3,
            neighborhood: NeighborhoodKind::Moore,
        }
    }

    #[test]
    fn positions_order_row_major() {
        let mut cells = vec![
            Position::new(1, 0),
            Position::new(0, 2),
            Position::new(0, 1),
        ];
        cells.sort();
        assert_eq!(
            cells,
            vec![
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(1, 0)
            ]
        );
    }

    #[test]
    fn holding_and_metabolism_by_kind() {
        let t = trader();
        assert!((t.holding(ResourceKind::Sugar) - 10.0).abs() < f64::EPSILON);
        assert!((t.holding(ResourceKind::Spice) - 4.0).abs() < f64::EPSILON);
        assert_eq!(t.metabolism(ResourceKind::Sugar), 2);
        assert_eq!(t.metabolism(ResourceKind::Spice), 1);
    }

    #[test]
    fn trader_roundtrip_serde() {
        let original = trader();
        let json = serde_json::to_string(&original).ok();
        assert!(json.is_some());
        let restored: Result<Trader, _> = serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(original));
    }
}
