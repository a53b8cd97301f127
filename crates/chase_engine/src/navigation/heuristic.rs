//! Distance estimates for grid search

use serde::{Serialize, Deserialize};

use super::grid::{Cell, Connectivity};

/// Admissible distance estimate between two cells
///
/// Every step costs at least 1 (orthogonal) or `sqrt(2)` (diagonal), so each
/// variant never overestimates when paired with a connectivity it supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceHeuristic {
    /// `|dx| + |dz|`; admissible for four-connected grids only
    Manhattan,
    /// Straight-line distance; admissible for both connectivities
    Euclidean,
    /// `max + (sqrt(2) - 1) * min`; the exact free-space cost on eight-connected grids
    Octile,
}

impl DistanceHeuristic {
    /// Tightest admissible heuristic for a connectivity
    pub fn for_connectivity(connectivity: Connectivity) -> Self {
        match connectivity {
            Connectivity::Four => Self::Manhattan,
            Connectivity::Eight => Self::Octile,
        }
    }

    /// Whether this heuristic never overestimates under `connectivity`
    pub fn is_admissible_for(self, connectivity: Connectivity) -> bool {
        !(self == Self::Manhattan && connectivity == Connectivity::Eight)
    }

    /// Estimated cost from `a` to `b`
    pub fn estimate(self, a: Cell, b: Cell) -> f32 {
        let dx = (a.x - b.x).unsigned_abs() as f32;
        let dz = (a.z - b.z).unsigned_abs() as f32;
        match self {
            Self::Manhattan => dx + dz,
            Self::Euclidean => dx.hypot(dz),
            Self::Octile => dx.max(dz) + (std::f32::consts::SQRT_2 - 1.0) * dx.min(dz),
        }
    }
}
