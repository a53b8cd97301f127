//! Physics module for collision detection and response
//!
//! Provides axis-aligned bounding volumes, static and dynamic bodies,
//! per-axis sliding resolution and layer-filtered ray casts.

pub mod body;
pub mod collision;
pub mod collision_layers;
pub mod collision_system;

pub use body::{BodyState, Collidable, DynamicBody, MoveOutcome, StaticBody};
pub use collision::{
    compute_local_extents,
    Aabb,
    ExtentError,
    MeshData,
    Ray,
    RayHit,
};
pub use collision_layers::CollisionLayers;
pub use collision_system::{StaticBodyKey, StaticBodySet};
