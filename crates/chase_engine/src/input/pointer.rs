//! Pointer-lock look input
//!
//! Motion deltas are accumulated between ticks and only while the pointer is
//! locked. Losing the lock pauses the camera and discards pending motion;
//! regaining it resumes input.

use crate::events::GameEvent;
use crate::foundation::math::Vec2;

/// Accumulated relative pointer motion plus lock state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerInput {
    locked: bool,
    delta: Vec2,
}

impl PointerInput {
    /// Create an unlocked pointer with no pending motion
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether look input is currently accepted
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// The host acquired pointer lock
    ///
    /// Returns the resume notification when the state changed.
    pub fn lock_acquired(&mut self) -> Option<GameEvent> {
        if self.locked {
            return None;
        }
        self.locked = true;
        log::info!("Pointer locked, camera input resumed");
        Some(GameEvent::CameraResumed)
    }

    /// The host lost pointer lock
    ///
    /// Pending motion is discarded. Returns the pause notification when the
    /// state changed.
    pub fn lock_lost(&mut self) -> Option<GameEvent> {
        if !self.locked {
            return None;
        }
        self.locked = false;
        self.delta = Vec2::zeros();
        log::info!("Pointer lock lost, camera paused");
        Some(GameEvent::CameraPaused)
    }

    /// Relative pointer motion in pixels; ignored while unlocked
    pub fn motion(&mut self, dx: f32, dy: f32) {
        if self.locked {
            self.delta += Vec2::new(dx, dy);
        }
    }

    /// Motion accumulated since the last call
    pub fn take_delta(&mut self) -> Vec2 {
        std::mem::replace(&mut self.delta, Vec2::zeros())
    }
}
