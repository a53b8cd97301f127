//! # Core Module
//!
//! Shared configuration for every subsystem of the chase simulation.
//!
//! ## Organization
//!
//! - **Config**: Tunables for player, agent, camera, navigation and coins

pub mod config;

// Re-export commonly used config types
pub use config::{
    GameConfig,
    PlayerConfig,
    AgentConfig,
    CameraRigConfig,
    NavigationConfig,
    CoinConfig,
    Config,
    ConfigError,
};
