//! # Game Configuration
//!
//! All tunables of the chase simulation live here, grouped by the subsystem
//! that reads them. Every struct has defaults matching the shipped game feel,
//! so a partial TOML or RON file only needs to name what it overrides.
//!
//! ## Configuration Categories
//!
//! - **Player**: walk/run speed and turn rate of the player avatar
//! - **Agent**: pursuit speed, turn rate and replanning cadence
//! - **Camera**: third-person rig geometry, look sensitivity and clipping
//! - **Navigation**: grid connectivity, heuristic and search budget
//! - **Coins**: pickup height, spin and bob

use serde::{Serialize, Deserialize};

use crate::foundation::math::constants::HALF_PI;
use crate::navigation::{Connectivity, DistanceHeuristic};

pub use crate::config::{Config, ConfigError};

/// Root configuration for a chase session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Player locomotion settings
    pub player: PlayerConfig,
    /// Pursuing agent settings
    pub agent: AgentConfig,
    /// Camera rig settings
    pub camera: CameraRigConfig,
    /// Path search settings
    pub navigation: NavigationConfig,
    /// Coin pickup settings
    pub coins: CoinConfig,
}

impl Config for GameConfig {}

/// # Player Configuration
///
/// Speeds are world units per second. `turn_step` bounds how far the avatar
/// may turn towards its movement direction in one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Speed while walking
    pub walk_speed: f32,
    /// Speed while the run modifier is held
    pub run_speed: f32,
    /// Maximum facing change per tick in radians
    pub turn_step: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            walk_speed: 6.0,
            run_speed: 20.0,
            turn_step: 0.2,
        }
    }
}

/// # Agent Configuration
///
/// The agent re-plans its path from scratch every `replan_interval` seconds;
/// zero means every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Walking speed in world units per second
    pub walk_speed: f32,
    /// Maximum facing change per tick in radians
    pub turn_step: f32,
    /// Offset added to the heading of the movement direction to get the
    /// model's facing (the agent model faces +X at rest)
    pub facing_offset: f32,
    /// Seconds between path searches; zero searches every tick
    pub replan_interval: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            walk_speed: 8.0,
            turn_step: 0.2,
            facing_offset: -HALF_PI,
            replan_interval: 0.0,
        }
    }
}

/// # Camera Rig Configuration
///
/// The rig is a yaw pivot at `height` above the player, a pitch pivot on
/// top of it, and the camera `distance` units behind the pitch pivot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraRigConfig {
    /// Height of the pivot above the player position
    pub height: f32,
    /// Nominal distance between pivot and camera
    pub distance: f32,
    /// Pointer sensitivity applied as `delta * dt * sensitivity`
    pub sensitivity: f32,
    /// Lowest pitch (looking down)
    pub min_pitch: f32,
    /// Highest pitch (looking up)
    pub max_pitch: f32,
    /// Gap kept between the camera and a blocking surface
    pub clearance: f32,
    /// Closest the camera may be pulled towards the pivot
    pub min_distance: f32,
}

impl Default for CameraRigConfig {
    fn default() -> Self {
        Self {
            height: 2.0,
            distance: 12.0,
            sensitivity: 0.25,
            min_pitch: -HALF_PI,
            max_pitch: 0.16,
            clearance: 1.0,
            min_distance: 0.0,
        }
    }
}

/// Path search settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Neighbourhood used when expanding cells
    pub connectivity: Connectivity,
    /// Distance estimate; `None` picks the tightest admissible one for the
    /// connectivity
    pub heuristic: Option<DistanceHeuristic>,
    /// Upper bound on node expansions per search
    pub max_expansions: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::Four,
            heuristic: None,
            max_expansions: 4096,
        }
    }
}

/// Coin pickup settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinConfig {
    /// Height coins are placed at
    pub spawn_height: f32,
    /// Centre height of the bob motion
    pub bob_base: f32,
    /// Bob amplitude
    pub bob_amplitude: f32,
    /// Spin rate around +Y in radians per second
    pub spin_speed: f32,
}

impl Default for CoinConfig {
    fn default() -> Self {
        Self {
            spawn_height: 2.0,
            bob_base: 1.5,
            bob_amplitude: 0.5,
            spin_speed: 0.5,
        }
    }
}
