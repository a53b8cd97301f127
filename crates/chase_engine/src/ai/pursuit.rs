//! Path-following pursuit
//!
//! Converts the first cell of a fresh grid path into a per-tick movement
//! vector and facing. The controller never moves anything itself; the agent
//! applies the step through its own collision-resolved move.

use crate::core::config::{AgentConfig, NavigationConfig};
use crate::foundation::math::{utils, Quat, Vec3};
use crate::navigation::{Cell, NavGrid, PathSearch};

/// Movement for one tick
#[derive(Debug, Clone, PartialEq)]
pub struct PursuitStep {
    /// Displacement to apply this tick (XZ only)
    pub displacement: Vec3,
    /// Orientation the agent should turn towards
    pub facing_target: Quat,
    /// Maximum turn this tick in radians
    pub turn_step: f32,
    /// Cell the agent is heading for
    pub next_cell: Cell,
}

/// Chases a target across the navigation grid
#[derive(Debug, Clone)]
pub struct PursuitController {
    config: AgentConfig,
    search: PathSearch,
    cell_size: f32,
    path: Vec<Cell>,
    since_plan: f32,
}

impl PursuitController {
    /// Create a controller for a level with the given cell size
    pub fn new(config: AgentConfig, navigation: &NavigationConfig, cell_size: f32) -> Self {
        Self {
            config,
            search: PathSearch::from_config(navigation),
            cell_size,
            path: Vec::new(),
            since_plan: 0.0,
        }
    }

    /// Current planned path (start excluded)
    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    /// Plan this tick's movement towards `target`
    ///
    /// Returns `None` when there is no path, in which case the agent idles.
    pub fn plan(&mut self, delta_time: f32, agent: Vec3, target: Vec3, grid: &NavGrid) -> Option<PursuitStep> {
        let start = Cell::from_world(&agent, self.cell_size);
        let goal = Cell::from_world(&target, self.cell_size);

        self.since_plan += delta_time;
        let interval = self.config.replan_interval;
        let stale = self.path.last() != Some(&goal);
        if interval <= 0.0 || self.since_plan >= interval || stale {
            self.path = self.search.find_path(grid, start, goal);
            self.since_plan = 0.0;
        } else {
            // Drop cells already reached since the last plan
            if let Some(reached) = self.path.iter().position(|&cell| cell == start) {
                self.path.drain(..=reached);
            }
        }

        let next_cell = *self.path.first()?;
        let here = Vec3::new(agent.x / self.cell_size, 0.0, agent.z / self.cell_size);
        let towards = Vec3::new(next_cell.x as f32, 0.0, next_cell.z as f32) - here;
        let direction = towards.try_normalize(f32::EPSILON)?;

        let heading = direction.x.atan2(direction.z);
        Some(PursuitStep {
            displacement: direction * self.config.walk_speed * delta_time,
            facing_target: utils::yaw_rotation(heading + self.config.facing_offset),
            turn_step: self.config.turn_step,
            next_cell,
        })
    }
}
