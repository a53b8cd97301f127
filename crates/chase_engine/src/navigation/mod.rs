//! Grid navigation
//!
//! - [`grid`] - Walkability grid with optional traversal cost
//! - [`heuristic`] - Admissible distance estimates
//! - [`astar`] - Stateless A* path search

pub mod grid;
pub mod heuristic;
pub mod astar;

pub use grid::{Cell, Connectivity, NavGrid, Tile};
pub use heuristic::DistanceHeuristic;
pub use astar::PathSearch;
