//! Collision geometry
//!
//! Shapes are stored in model space and transformed to world space only when
//! a test needs them (GEA 13.3.4).
//!
//! # Module Organization
//!
//! - [`primitives`] - Rays and axis-aligned boxes with their intersection tests
//! - [`extents`] - Geometry hand-off and local extent calculation

pub mod primitives;
pub mod extents;

// Re-export commonly used types
pub use primitives::{Aabb, Ray, RayHit};
pub use extents::{compute_local_extents, ExtentError, MeshData};
