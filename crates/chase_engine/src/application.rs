//! Application trait and lifecycle management

use crate::config::ConfigError;
use crate::engine::{Engine, EngineError};
use crate::input::KeyCode;
use crate::level::LevelError;
use crate::physics::ExtentError;
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to drive a game session from the engine loop.
pub trait Application {
    /// Initialize the application
    ///
    /// Called once before the first frame. Use this to load the level and
    /// build the session.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Update the application
    ///
    /// Called every frame after pending host events were delivered.
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `delta_time` - Time since last frame in seconds
    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError>;

    /// Handle a host event (keys, pointer, close requests)
    fn handle_event(&mut self, engine: &mut Engine, event: AppEvent) -> Result<(), AppError> {
        // Default implementation forwards to engine
        engine.handle_event(&event);
        Ok(())
    }

    /// Cleanup the application
    ///
    /// Called once when the loop ends.
    fn cleanup(&mut self, engine: &mut Engine);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Level could not be loaded or built
    #[error("Level error: {0}")]
    Level(#[from] LevelError),

    /// Model geometry was unusable
    #[error("Geometry error: {0}")]
    Geometry(#[from] ExtentError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Game logic error
    #[error("Game logic error: {0}")]
    GameLogic(String),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}

/// Events the host feeds into the loop
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Close requested
    CloseRequested,

    /// Key input event
    KeyInput {
        /// The key that was pressed/released
        key: KeyCode,
        /// Whether the key was pressed (true) or released (false)
        pressed: bool,
    },

    /// Relative pointer motion
    PointerMoved {
        /// Horizontal motion in pixels
        dx: f32,
        /// Vertical motion in pixels
        dy: f32,
    },

    /// Pointer lock acquired
    PointerLocked,

    /// Pointer lock lost
    PointerUnlocked,
}
