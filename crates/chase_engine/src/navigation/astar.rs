//! A* path search over a [`NavGrid`]
//!
//! Every call is a complete, independent search: nothing is cached between
//! calls, so the grid and endpoints may change freely from one tick to the
//! next.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::core::config::NavigationConfig;
use super::grid::{Cell, Connectivity, NavGrid};
use super::heuristic::DistanceHeuristic;

/// Path cost usable as a heap key
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cost(f32);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Grid path search
#[derive(Debug, Clone, PartialEq)]
pub struct PathSearch {
    connectivity: Connectivity,
    heuristic: DistanceHeuristic,
    max_expansions: usize,
}

impl Default for PathSearch {
    fn default() -> Self {
        Self::new(Connectivity::Four)
    }
}

impl PathSearch {
    /// Default expansion budget
    pub const DEFAULT_MAX_EXPANSIONS: usize = 4096;

    /// Search with the tightest admissible heuristic for `connectivity`
    pub fn new(connectivity: Connectivity) -> Self {
        Self {
            connectivity,
            heuristic: DistanceHeuristic::for_connectivity(connectivity),
            max_expansions: Self::DEFAULT_MAX_EXPANSIONS,
        }
    }

    /// Build from configuration
    pub fn from_config(config: &NavigationConfig) -> Self {
        let search = Self::new(config.connectivity).with_max_expansions(config.max_expansions);
        match config.heuristic {
            Some(heuristic) => search.with_heuristic(heuristic),
            None => search,
        }
    }

    /// Builder: override the heuristic
    #[must_use]
    pub fn with_heuristic(mut self, heuristic: DistanceHeuristic) -> Self {
        if !heuristic.is_admissible_for(self.connectivity) {
            log::warn!(
                "{heuristic:?} overestimates on {:?} grids; paths may not be shortest",
                self.connectivity
            );
        }
        self.heuristic = heuristic;
        self
    }

    /// Builder: bound the number of node expansions per search
    #[must_use]
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions.max(1);
        self
    }

    /// Connectivity in use
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Heuristic in use
    pub fn heuristic(&self) -> DistanceHeuristic {
        self.heuristic
    }

    /// Shortest path from `start` to `goal`
    ///
    /// The returned cells exclude `start` and end with `goal`. The path is
    /// empty when either endpoint is blocked or outside the grid, when they
    /// coincide, when the goal is unreachable, or when the expansion budget
    /// runs out.
    pub fn find_path(&self, grid: &NavGrid, start: Cell, goal: Cell) -> Vec<Cell> {
        if start == goal || !grid.is_walkable(start) || !grid.is_walkable(goal) {
            return Vec::new();
        }

        // Ordered by lowest f, then lowest h
        let mut open = BinaryHeap::<(Reverse<Cost>, Reverse<Cost>, Cell)>::new();
        let mut g_scores = HashMap::<Cell, f32>::new();
        let mut came_from = HashMap::<Cell, Cell>::new();
        let mut closed = HashSet::<Cell>::new();

        let start_h = self.heuristic.estimate(start, goal);
        g_scores.insert(start, 0.0);
        open.push((Reverse(Cost(start_h)), Reverse(Cost(start_h)), start));

        let mut expansions = 0;
        while let Some((_f_score, _h_score, cell)) = open.pop() {
            if !closed.insert(cell) {
                // Stale entry superseded by a cheaper route
                continue;
            }
            if cell == goal {
                log::trace!("Path {start:?} -> {goal:?} found after {expansions} expansions");
                return reconstruct_path(start, goal, &came_from);
            }

            expansions += 1;
            if expansions > self.max_expansions {
                log::trace!("Path {start:?} -> {goal:?} abandoned after {expansions} expansions");
                return Vec::new();
            }

            let g = g_scores.get(&cell).copied().unwrap_or(f32::INFINITY);
            for (next, step) in grid.neighbours(cell, self.connectivity) {
                if closed.contains(&next) {
                    continue;
                }
                let tentative_g = g + step;
                let known_g = g_scores.get(&next).copied().unwrap_or(f32::INFINITY);
                if tentative_g >= known_g {
                    continue;
                }
                came_from.insert(next, cell);
                g_scores.insert(next, tentative_g);
                let next_h = self.heuristic.estimate(next, goal);
                open.push((Reverse(Cost(tentative_g + next_h)), Reverse(Cost(next_h)), next));
            }
        }

        log::trace!("No path {start:?} -> {goal:?}");
        Vec::new()
    }

    /// Total cost of walking `path` from `start`, `None` if a step is illegal
    pub fn path_cost(&self, grid: &NavGrid, start: Cell, path: &[Cell]) -> Option<f32> {
        let mut from = start;
        let mut total = 0.0;
        for &to in path {
            total += grid.step_cost(from, to, self.connectivity)?;
            from = to;
        }
        Some(total)
    }
}

/// Walk `came_from` back from the goal, excluding the start
fn reconstruct_path(start: Cell, goal: Cell, came_from: &HashMap<Cell, Cell>) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut cursor = goal;
    while let Some(&previous) = came_from.get(&cursor) {
        if previous == start {
            break;
        }
        path.push(previous);
        cursor = previous;
    }
    path.reverse();
    path
}
