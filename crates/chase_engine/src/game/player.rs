//! Player avatar driven by movement keys relative to the camera

use crate::camera::CameraRig;
use crate::core::config::PlayerConfig;
use crate::foundation::math::{constants::PI, utils, Transform, Vec3};
use crate::input::{MovementAction, MovementKeys};
use crate::physics::{CollisionLayers, DynamicBody, MoveOutcome, StaticBodySet};

/// The player-controlled body
#[derive(Debug, Clone)]
pub struct Player {
    body: DynamicBody,
    config: PlayerConfig,
    action: MovementAction,
}

impl Player {
    /// Place the player at `position`; it stays inert until geometry arrives
    pub fn new(position: Vec3, config: PlayerConfig) -> Self {
        Self {
            body: DynamicBody::new(
                Transform::from_position(position),
                CollisionLayers::PLAYER,
                CollisionLayers::MOVEMENT_BLOCKERS,
            ),
            config,
            action: MovementAction::Idle,
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

    /// Locomotion chosen on the last update
    pub fn action(&self) -> MovementAction {
        self.action
    }

    /// Speed for an action in world units per second
    pub fn speed_for(&self, action: MovementAction) -> f32 {
        match action {
            MovementAction::Idle => 0.0,
            MovementAction::Walk => self.config.walk_speed,
            MovementAction::Run => self.config.run_speed,
        }
    }

    /// Turn and move for one tick
    ///
    /// The held direction is interpreted relative to where the camera looks.
    /// The avatar turns to face away from the camera plus the key offset and
    /// walks along the camera's ground heading rotated by the same offset.
    pub fn update(
        &mut self,
        delta_time: f32,
        keys: &MovementKeys,
        camera: &CameraRig,
        statics: &StaticBodySet,
    ) -> MoveOutcome {
        if !self.body.is_ready() {
            return MoveOutcome::NotReady;
        }
        self.action = keys.action();
        let Some(offset) = keys.direction_offset() else {
            return MoveOutcome::Moved { applied: Vec3::zeros(), blocked_x: false, blocked_z: false };
        };

        let facing = utils::yaw_rotation(camera.heading() + offset + PI);
        self.body.rotate_towards(&facing, self.config.turn_step);

        let direction = utils::yaw_rotation(offset) * camera.flat_forward();
        let displacement = direction * self.speed_for(self.action) * delta_time;
        self.body.move_and_collide(displacement, statics)
    }
}
