//! Geometry hand-off and local extent calculation
//!
//! Bodies receive their geometry as plain vertex/index buffers once a model
//! has been decoded elsewhere. The only thing collision needs from it is
//! the local-space bounding box, computed once per assignment.

use thiserror::Error;

use crate::foundation::math::Vec3;
use super::primitives::Aabb;

/// Errors raised while deriving extents from geometry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtentError {
    /// The vertex buffer was empty
    #[error("geometry has no vertices")]
    EmptyGeometry,

    /// A vertex contained NaN or an infinity
    #[error("vertex {index} is not finite")]
    NonFiniteVertex {
        /// Position of the offending vertex in the buffer
        index: usize,
    },
}

/// Compute the tight local-space box enclosing every vertex
pub fn compute_local_extents(vertices: &[Vec3]) -> Result<Aabb, ExtentError> {
    if let Some(index) = vertices.iter().position(|v| !v.iter().all(|c| c.is_finite())) {
        return Err(ExtentError::NonFiniteVertex { index });
    }
    Aabb::from_points(vertices).ok_or(ExtentError::EmptyGeometry)
}

/// Raw triangle geometry handed to a body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions in model space
    pub vertices: Vec<Vec3>,
    /// Triangle list indices into `vertices`
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Create mesh data from buffers
    pub fn new(vertices: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Axis-aligned box centred on the origin with the given full size
    ///
    /// 8 shared corners, 12 triangles wound counter-clockwise from outside.
    pub fn cuboid(size: Vec3) -> Self {
        let h = size * 0.5;
        let vertices = vec![
            Vec3::new(-h.x, -h.y,  h.z),
            Vec3::new( h.x, -h.y,  h.z),
            Vec3::new( h.x,  h.y,  h.z),
            Vec3::new(-h.x,  h.y,  h.z),
            Vec3::new(-h.x, -h.y, -h.z),
            Vec3::new( h.x, -h.y, -h.z),
            Vec3::new( h.x,  h.y, -h.z),
            Vec3::new(-h.x,  h.y, -h.z),
        ];
        let indices = vec![
            0, 1, 2, 2, 3, 0, // front
            5, 4, 7, 7, 6, 5, // back
            4, 0, 3, 3, 7, 4, // left
            1, 5, 6, 6, 2, 1, // right
            3, 2, 6, 6, 7, 3, // top
            4, 5, 1, 1, 0, 4, // bottom
        ];
        Self { vertices, indices }
    }

    /// Local extents of this geometry
    pub fn local_extents(&self) -> Result<Aabb, ExtentError> {
        compute_local_extents(&self.vertices)
    }

    /// Number of triangles described by the index buffer
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
