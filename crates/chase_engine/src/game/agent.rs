//! Pursuing agent

use crate::ai::{PursuitController, PursuitStep};
use crate::core::config::{AgentConfig, NavigationConfig};
use crate::foundation::math::{Transform, Vec3};
use crate::level::Level;
use crate::physics::{CollisionLayers, DynamicBody, MoveOutcome};

/// The non-player chaser
#[derive(Debug, Clone)]
pub struct Agent {
    body: DynamicBody,
    pursuit: PursuitController,
    last_step: Option<PursuitStep>,
}

impl Agent {
    /// Place the agent at `position` in a level with the given cell size
    pub fn new(position: Vec3, config: AgentConfig, navigation: &NavigationConfig, cell_size: f32) -> Self {
        Self {
            body: DynamicBody::new(
                Transform::from_position(position),
                CollisionLayers::AGENT,
                CollisionLayers::MOVEMENT_BLOCKERS,
            ),
            pursuit: PursuitController::new(config, navigation, cell_size),
            last_step: None,
        }
    }

    /// Collision body
    pub fn body(&self) -> &DynamicBody {
        &self.body
    }

    /// Mutable collision body (geometry assignment)
    pub fn body_mut(&mut self) -> &mut DynamicBody {
        &mut self.body
    }

    /// World position
    pub fn position(&self) -> Vec3 {
        self.body.position()
    }

    /// Path currently being followed
    pub fn pursuit(&self) -> &PursuitController {
        &self.pursuit
    }

    /// Step applied on the last update, `None` when idle
    pub fn last_step(&self) -> Option<&PursuitStep> {
        self.last_step.as_ref()
    }

    /// Chase `target` for one tick
    ///
    /// Idles when the body is not ready or no path exists.
    pub fn update(&mut self, delta_time: f32, target: Vec3, level: &Level) -> MoveOutcome {
        if !self.body.is_ready() {
            return MoveOutcome::NotReady;
        }
        self.last_step = self.pursuit.plan(delta_time, self.body.position(), target, level.grid());
        let Some(step) = &self.last_step else {
            return MoveOutcome::Moved { applied: Vec3::zeros(), blocked_x: false, blocked_z: false };
        };
        self.body.rotate_towards(&step.facing_target, step.turn_step);
        self.body.move_and_collide(step.displacement, level.statics())
    }
}
