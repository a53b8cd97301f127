//! Third-person camera rig with wall avoidance
//!
//! The rig is a small hierarchy: a yaw pivot placed `height` above the
//! player, a pitch pivot attached to it, and the camera sitting `distance`
//! units along the pitch pivot's local +Z. The camera looks back along -Z at
//! the pivot.
//!
//! Each tick the camera is first put back at its nominal distance, then a
//! ray from the pivot towards the camera is tested against geometry tagged
//! [`CollisionLayers::CAMERA_BLOCKER`]. If something is in the way the
//! camera is pulled in to sit `clearance` units in front of it, so walls
//! never come between the camera and the player.

use crate::core::config::CameraRigConfig;
use crate::foundation::math::{utils, Quat, Transform, Vec2, Vec3};
use crate::physics::{CollisionLayers, Ray, StaticBodySet};

/// Yaw/pitch camera rig following the player
#[derive(Debug, Clone)]
pub struct CameraRig {
    config: CameraRigConfig,
    pivot: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
}

impl CameraRig {
    /// Create a rig looking along -Z from behind the origin
    pub fn new(config: CameraRigConfig) -> Self {
        let distance = config.distance;
        Self {
            pivot: Vec3::new(0.0, config.height, 0.0),
            config,
            yaw: 0.0,
            pitch: 0.0,
            distance,
        }
    }

    /// Advance the rig by one tick
    ///
    /// `look_delta` is the pointer motion since the last tick (zero while
    /// the pointer is not locked).
    pub fn update(&mut self, delta_time: f32, player_position: Vec3, look_delta: Vec2, statics: &StaticBodySet) {
        self.distance = self.config.distance;
        self.rotate(delta_time, look_delta);
        self.pivot = player_position + Vec3::new(0.0, self.config.height, 0.0);
        self.avoid_walls(statics);
    }

    fn rotate(&mut self, delta_time: f32, look_delta: Vec2) {
        let scale = delta_time * self.config.sensitivity;
        self.yaw = utils::wrap_angle(self.yaw - look_delta.x * scale);
        self.pitch = utils::clamp(
            self.pitch - look_delta.y * scale,
            self.config.min_pitch,
            self.config.max_pitch,
        );
    }

    fn avoid_walls(&mut self, statics: &StaticBodySet) {
        let Some(ray) = Ray::new(self.pivot, self.orientation() * Vec3::z()) else {
            return;
        };
        let nominal = self.config.distance;
        if let Some(hit) = statics.raycast(&ray, nominal, CollisionLayers::CAMERA_BLOCKER) {
            if hit.distance < nominal {
                self.distance = (hit.distance - self.config.clearance).max(self.config.min_distance);
                log::trace!("Camera pulled in to {:.2} (blocked at {:.2})", self.distance, hit.distance);
            }
        }
    }

    /// Combined yaw then pitch orientation of the camera
    pub fn orientation(&self) -> Quat {
        utils::yaw_rotation(self.yaw) * Quat::from_axis_angle(&Vec3::x_axis(), self.pitch)
    }

    /// World position of the pivot
    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    /// World position of the camera
    pub fn position(&self) -> Vec3 {
        self.pivot + self.orientation() * Vec3::new(0.0, 0.0, self.distance)
    }

    /// Unit view direction (from the camera towards the pivot)
    pub fn forward(&self) -> Vec3 {
        self.orientation() * -Vec3::z()
    }

    /// View direction projected onto the ground plane
    ///
    /// Depends on yaw only, so it stays defined when looking straight down.
    pub fn flat_forward(&self) -> Vec3 {
        utils::yaw_rotation(self.yaw) * -Vec3::z()
    }

    /// Heading of the view direction around +Y
    pub fn heading(&self) -> f32 {
        let forward = self.flat_forward();
        forward.x.atan2(forward.z)
    }

    /// Camera transform for a renderer
    pub fn transform(&self) -> Transform {
        Transform::from_position(self.position()).with_rotation(self.orientation())
    }

    /// Current yaw in radians
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current pitch in radians
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Current camera distance after wall avoidance
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Rig configuration
    pub fn config(&self) -> &CameraRigConfig {
        &self.config
    }
}
