//! Enumeration types shared across the simulation.

use serde::{Deserialize, Serialize};

use crate::structs::Position;

/// The two renewable resources on the landscape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Sugar, read directly from the landscape file.
    Sugar,
    /// Spice, the sugar landscape mirrored along the y axis.
    Spice,
}

impl ResourceKind {
    /// Both kinds in growback order.
    pub const ALL: [Self; 2] = [Self::Sugar, Self::Spice];
}

impl core::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Sugar => write!(f, "sugar"),
            Self::Spice => write!(f, "spice"),
        }
    }
}

/// Grid adjacency used for vision and for distance tie-breaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborhoodKind {
    /// Axis-aligned steps only; distance is Manhattan.
    #[default]
    VonNeumann,
    /// Axis-aligned and diagonal steps; distance is Chebyshev.
    Moore,
}

impl NeighborhoodKind {
    /// Distance between two positions under this neighborhood's metric.
    pub const fn distance(self, a: Position, b: Position) -> u32 {
        let dx = a.x.abs_diff(b.x);
        let dy = a.y.abs_diff(b.y);
        match self {
            Self::VonNeumann => dx.saturating_add(dy),
            Self::Moore => {
                if dx > dy {
                    dx
                } else {
                    dy
                }
            }
        }
    }
}

impl core::fmt::Display for NeighborhoodKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::VonNeumann => write!(f, "von_neumann"),
            Self::Moore => write!(f, "moore"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn von_neumann_distance_is_manhattan() {
        let a = Position::new(2, 2);
        let b = Position::new(4, 5);
        assert_eq!(NeighborhoodKind::VonNeumann.distance(a, b), 5);
        assert_eq!(NeighborhoodKind::VonNeumann.distance(b, a), 5);
    }

    #[test]
    fn moore_distance_is_chebyshev() {
        let a = Position::new(2, 2);
        let b = Position::new(4, 5);
        assert_eq!(NeighborhoodKind::Moore.distance(a, b), 3);
        assert_eq!(NeighborhoodKind::Moore.distance(a, a), 0);
    }

    #[test]
    fn neighborhood_serde_names() {
        let parsed: Result<NeighborhoodKind, _> = serde_json::from_str("\"moore\"");
        assert_eq!(parsed.ok(), Some(NeighborhoodKind::Moore));
        let json = serde_json::to_string(&NeighborhoodKind::VonNeumann).ok();
        assert_eq!(json.as_deref(), Some("\"von_neumann\""));
    }
}
