//! Primitive collision shapes and intersection algorithms
//!
//! Provides rays and axis-aligned bounding boxes with the overlap and
//! ray-box tests used by movement resolution and camera clipping.

use crate::foundation::math::Vec3;

/// A ray for ray casting
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    ///
    /// Returns `None` when `direction` has no length.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize(f32::EPSILON)?;
        Some(Self { origin, direction })
    }

    /// Creates a ray from `origin` through `target`
    pub fn towards(origin: Vec3, target: Vec3) -> Option<Self> {
        Self::new(origin, target - origin)
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Result of a ray intersection test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit<K> {
    /// The body that was hit
    pub body: K,
    /// The distance from the ray origin to the hit point
    pub distance: f32,
    /// The point of intersection in world space
    pub point: Vec3,
    /// The surface normal at the intersection point
    pub normal: Vec3,
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given extents (half-size)
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Tightest box around a set of points, `None` when there are none
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;
        Some(points.fold(Self::new(first, first), |acc, p| Self {
            min: acc.min.inf(p),
            max: acc.max.sup(p),
        }))
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Full edge lengths
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Box scaled component-wise about the origin
    ///
    /// Negative scale factors swap the corners so `min <= max` still holds.
    #[must_use]
    pub fn scaled(&self, scale: &Vec3) -> Self {
        let a = self.min.component_mul(scale);
        let b = self.max.component_mul(scale);
        Self::new(a.inf(&b), a.sup(&b))
    }

    /// Box moved by `offset`
    #[must_use]
    pub fn translated(&self, offset: &Vec3) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }

    /// Check if this AABB contains a point (inclusive)
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if this AABB overlaps another AABB
    ///
    /// The test is strict on every axis: boxes that only share a face, edge
    /// or corner do not overlap, so a body resting flush against a wall can
    /// still slide along it.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.x < other.max.x && other.min.x < self.max.x &&
        self.min.y < other.max.y && other.min.y < self.max.y &&
        self.min.z < other.max.z && other.min.z < self.max.z
    }

    /// Test ray intersection with this AABB using the slab method
    ///
    /// Returns the entry distance and the normal of the entered face. A ray
    /// starting inside the box hits at distance zero facing back along the
    /// ray. Based on "An Efficient and Robust Ray–Box Intersection Algorithm".
    pub fn intersect_ray(&self, ray: &Ray) -> Option<(f32, Vec3)> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut enter_axis = 0;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            if dir.abs() <= f32::EPSILON {
                // Parallel to this slab: must already lie between its planes
                if origin < self.min[axis] || origin > self.max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / dir;
            let t1 = (self.min[axis] - origin) * inv;
            let t2 = (self.max[axis] - origin) * inv;
            let (near, far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
            if near > t_enter {
                t_enter = near;
                enter_axis = axis;
            }
            t_exit = t_exit.min(far);
        }

        if t_exit < t_enter.max(0.0) {
            return None;
        }
        if t_enter < 0.0 {
            return Some((0.0, -ray.direction));
        }
        let mut normal = Vec3::zeros();
        normal[enter_axis] = -ray.direction[enter_axis].signum();
        Some((t_enter, normal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn unit_box_at(x: f32, y: f32, z: f32) -> Aabb {
        Aabb::from_center_extents(Vec3::new(x, y, z), Vec3::new(0.5, 0.5, 0.5))
    }

    fn random_box(rng: &mut StdRng) -> Aabb {
        let center = Vec3::new(
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
        );
        let extents = Vec3::new(
            rng.gen_range(0.1..4.0),
            rng.gen_range(0.1..4.0),
            rng.gen_range(0.1..4.0),
        );
        Aabb::from_center_extents(center, extents)
    }

    #[test]
    fn test_touching_faces_do_not_overlap() {
        let a = unit_box_at(0.0, 0.0, 0.0);
        let b = unit_box_at(1.0, 0.0, 0.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&unit_box_at(0.9, 0.0, 0.0)));
    }

    #[test]
    fn test_overlap_is_commutative_and_exact() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..2000 {
            let a = random_box(&mut rng);
            let b = random_box(&mut rng);
            assert_eq!(a.overlaps(&b), b.overlaps(&a));

            // Separated on some axis means never overlapping
            let separated = (0..3).any(|i| a.min[i] >= b.max[i] || b.min[i] >= a.max[i]);
            assert_eq!(a.overlaps(&b), !separated);
        }
    }

    #[test]
    fn test_from_points() {
        let points = [
            Vec3::new(1.0, -2.0, 3.0),
            Vec3::new(-1.0, 4.0, 0.0),
            Vec3::new(0.5, 0.0, -3.0),
        ];
        let aabb = Aabb::from_points(&points).unwrap();
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 4.0, 3.0));
        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn test_scaled_then_translated() {
        let aabb = unit_box_at(0.0, 0.0, 0.0)
            .scaled(&Vec3::new(2.0, -1.0, 1.0))
            .translated(&Vec3::new(10.0, 0.0, 0.0));
        assert_relative_eq!(aabb.min.x, 9.0);
        assert_relative_eq!(aabb.max.x, 11.0);
        assert!(aabb.min.y <= aabb.max.y);
    }

    #[test]
    fn test_ray_hits_near_face() {
        let aabb = Aabb::new(Vec3::new(4.0, -1.0, -1.0), Vec3::new(6.0, 1.0, 1.0));
        let ray = Ray::new(Vec3::zeros(), Vec3::x()).unwrap();
        let (distance, normal) = aabb.intersect_ray(&ray).unwrap();
        assert_relative_eq!(distance, 4.0);
        assert_eq!(normal, Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_misses_and_behind() {
        let aabb = Aabb::new(Vec3::new(4.0, -1.0, -1.0), Vec3::new(6.0, 1.0, 1.0));
        let up = Ray::new(Vec3::zeros(), Vec3::y()).unwrap();
        assert!(aabb.intersect_ray(&up).is_none());
        let back = Ray::new(Vec3::zeros(), -Vec3::x()).unwrap();
        assert!(aabb.intersect_ray(&back).is_none());
    }

    #[test]
    fn test_ray_from_inside() {
        let aabb = unit_box_at(0.0, 0.0, 0.0);
        let ray = Ray::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 0.0)).unwrap();
        let (distance, _) = aabb.intersect_ray(&ray).unwrap();
        assert_relative_eq!(distance, 0.0);
    }

    #[test]
    fn test_zero_direction_ray() {
        assert!(Ray::new(Vec3::zeros(), Vec3::zeros()).is_none());
    }
}
