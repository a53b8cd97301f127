//! Math utilities and types
//!
//! Provides the vector, quaternion and transform types shared by the
//! collision, navigation and camera code. The world is Y-up; the level
//! grid lies in the XZ plane.

pub use nalgebra::{
    Vector2, Vector3,
    Matrix4,
    Quaternion,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and non-uniform scale
    pub fn from_position_scale(position: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            scale,
            ..Default::default()
        }
    }

    /// Builder: replace the rotation
    #[must_use]
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Convert to a transformation matrix for a renderer to consume
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        self.to_matrix().transform_point(&point)
    }

    /// Heading of this transform around +Y, in radians
    pub fn yaw(&self) -> f32 {
        let forward = self.rotation * Vec3::z();
        forward.x.atan2(forward.z)
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Pi / 4
    pub const QUARTER_PI: f32 = PI * 0.25;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Quat, Vec3};

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min { min } else if value > max { max } else { value }
    }

    /// Wrap an angle into `(-PI, PI]`
    pub fn wrap_angle(angle: f32) -> f32 {
        let wrapped = (angle + constants::PI).rem_euclid(constants::TAU) - constants::PI;
        if wrapped <= -constants::PI { wrapped + constants::TAU } else { wrapped }
    }

    /// Rotation of `angle` radians about the world +Y axis
    pub fn yaw_rotation(angle: f32) -> Quat {
        Quat::from_axis_angle(&Vec3::y_axis(), angle)
    }

    /// Rotate `current` towards `target` by at most `max_step` radians
    ///
    /// Returns `target` once it is within one step. Opposite orientations
    /// have no unique great arc, so the step is taken about +Y instead.
    pub fn rotate_towards(current: &Quat, target: &Quat, max_step: f32) -> Quat {
        let angle = current.angle_to(target);
        if angle <= max_step || angle <= f32::EPSILON {
            return *target;
        }
        let t = max_step / angle;
        current
            .try_slerp(target, t, 1.0e-6)
            .unwrap_or_else(|| yaw_rotation(max_step) * current)
    }

    /// Project a vector onto the XZ plane and normalise it
    ///
    /// Vectors with no horizontal component map to zero.
    pub fn flatten_xz(v: &Vec3) -> Vec3 {
        let flat = Vec3::new(v.x, 0.0, v.z);
        flat.try_normalize(f32::EPSILON).unwrap_or_else(Vec3::zeros)
    }
}
