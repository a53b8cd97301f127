//! # Chase Engine
//!
//! Simulation core for a third-person chase game: a player walks a grid
//! level collecting coins while an agent hunts them down.
//!
//! ## Features
//!
//! - **Collision**: axis-aligned bounding boxes with per-axis wall sliding
//! - **Camera Rig**: yaw/pitch follow camera that never ends up behind a wall
//! - **Navigation**: A* over the level grid with pluggable heuristics
//! - **Pursuit**: path following for the chasing agent
//! - **Headless**: hosts feed input and geometry, then read transforms back
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chase_engine::prelude::*;
//!
//! struct Chase {
//!     game: Option<Game>,
//! }
//!
//! impl Application for Chase {
//!     fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
//!         let level = Level::build(&LevelLayout::default())?;
//!         let mut game = Game::new(GameConfig::default(), level);
//!         game.on_player_geometry(&MeshData::cuboid(Vec3::new(2.0, 4.0, 2.0)))?;
//!         self.game = Some(game);
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
//!         if let Some(game) = &mut self.game {
//!             game.tick(delta_time, engine.total_time(), &FrameInput::default());
//!         }
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig { max_frames: Some(600), ..EngineConfig::default() };
//!     Engine::run(config, &mut Chase { game: None })?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;
pub mod foundation;

// Simulation
pub mod physics;
pub mod navigation;
pub mod ai;
pub mod camera;
pub mod input;
pub mod events;
pub mod level;
pub mod game;

mod application;
mod engine;

pub use application::{AppError, AppEvent, Application};
pub use engine::{Engine, EngineConfig, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        AppError, AppEvent, Application,
        Engine, EngineConfig, EngineError,
        camera::CameraRig,
        config::Config,
        core::config::GameConfig,
        events::{BodyKind, Event, EventType, GameEvent},
        foundation::{
            math::{Vec2, Vec3, Quat, Transform},
            time::{Timer, Stopwatch},
        },
        game::{FrameInput, Game},
        input::{KeyCode, MovementKeys},
        level::{Level, LevelError, LevelLayout},
        navigation::{Cell, Connectivity, NavGrid, PathSearch},
        physics::{Aabb, Collidable, CollisionLayers, DynamicBody, MeshData, StaticBody, StaticBodySet},
    };
}

#[cfg(test)]
mod tests;
