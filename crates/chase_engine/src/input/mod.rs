//! Input state for the chase game
//!
//! The host forwards raw key and pointer events; the game reads the
//! resulting state once per tick. Nothing here blocks or polls a device.

pub mod pointer;

pub use pointer::PointerInput;

/// Key codes the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// W key
    W,
    /// A key
    A,
    /// S key
    S,
    /// D key
    D,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Left shift
    LeftShift,
    /// Right shift
    RightShift,
    /// Escape key
    Escape,
}

/// Locomotion the player asked for this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementAction {
    /// No direction held
    Idle,
    /// Direction held
    Walk,
    /// Direction held with the run modifier
    Run,
}

/// Held state of the movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    /// Forward (W / up)
    pub forward: bool,
    /// Backward (S / down)
    pub back: bool,
    /// Strafe left (A / left)
    pub left: bool,
    /// Strafe right (D / right)
    pub right: bool,
    /// Run modifier (shift)
    pub run: bool,
}

impl MovementKeys {
    /// Update from a key event; returns `false` for keys that do not steer
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        let slot = match key {
            KeyCode::W | KeyCode::Up => &mut self.forward,
            KeyCode::S | KeyCode::Down => &mut self.back,
            KeyCode::A | KeyCode::Left => &mut self.left,
            KeyCode::D | KeyCode::Right => &mut self.right,
            KeyCode::LeftShift | KeyCode::RightShift => &mut self.run,
            KeyCode::Escape => return false,
        };
        *slot = pressed;
        true
    }

    /// Release every key
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Heading offset of the held direction relative to camera-forward
    ///
    /// Zero is straight ahead and positive angles turn left. Opposing keys
    /// cancel; `None` means no direction is held.
    pub fn direction_offset(&self) -> Option<f32> {
        let forward = f32::from(u8::from(self.forward)) - f32::from(u8::from(self.back));
        let left = f32::from(u8::from(self.left)) - f32::from(u8::from(self.right));
        if forward == 0.0 && left == 0.0 {
            None
        } else {
            Some(left.atan2(forward))
        }
    }

    /// Action implied by the held keys
    pub fn action(&self) -> MovementAction {
        match (self.direction_offset(), self.run) {
            (None, _) => MovementAction::Idle,
            (Some(_), false) => MovementAction::Walk,
            (Some(_), true) => MovementAction::Run,
        }
    }
}
