//! Static collision world
//!
//! Based on Game Engine Architecture 3rd Edition, Chapter 13. The level's
//! immovable geometry is registered once at build time and afterwards only
//! queried: overlap tests for movement resolution and layer-filtered ray
//! casts for camera clipping. A level holds a few hundred boxes at most, so
//! queries are a linear sweep.

use slotmap::{new_key_type, SlotMap};

use super::body::StaticBody;
use super::collision::{Aabb, Ray, RayHit};
use super::collision_layers::CollisionLayers;
use crate::physics::body::Collidable;

new_key_type! {
    /// Handle to a static body in a [`StaticBodySet`]
    pub struct StaticBodyKey;
}

/// Registry of the level's static bodies
#[derive(Debug, Clone, Default)]
pub struct StaticBodySet {
    bodies: SlotMap<StaticBodyKey, StaticBody>,
}

impl StaticBodySet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a body
    pub fn insert(&mut self, body: StaticBody) -> StaticBodyKey {
        self.bodies.insert(body)
    }

    /// Look up a body
    pub fn get(&self, key: StaticBodyKey) -> Option<&StaticBody> {
        self.bodies.get(key)
    }

    /// Number of registered bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Iterate over all bodies
    pub fn iter(&self) -> impl Iterator<Item = (StaticBodyKey, &StaticBody)> {
        self.bodies.iter()
    }

    /// Bodies on layers in `mask` whose world box overlaps `aabb`
    pub fn overlapping<'a>(
        &'a self,
        aabb: &'a Aabb,
        mask: CollisionLayers,
    ) -> impl Iterator<Item = StaticBodyKey> + 'a {
        self.bodies
            .iter()
            .filter(move |(_, body)| body.layers().matches(mask) && body.world_bounds().overlaps(aabb))
            .map(|(key, _)| key)
    }

    /// Whether moving from `start` to `candidate` runs into a body in `mask`
    ///
    /// Bodies already overlapping `start` do not count.
    pub fn is_blocked(&self, candidate: &Aabb, start: &Aabb, mask: CollisionLayers) -> bool {
        self.overlapping(candidate, mask)
            .filter_map(|key| self.bodies.get(key))
            .any(|body| !body.world_bounds().overlaps(start))
    }

    /// Closest hit along `ray` within `max_distance` among bodies in `mask`
    pub fn raycast(
        &self,
        ray: &Ray,
        max_distance: f32,
        mask: CollisionLayers,
    ) -> Option<RayHit<StaticBodyKey>> {
        self.bodies
            .iter()
            .filter(|(_, body)| body.layers().matches(mask))
            .filter_map(|(key, body)| {
                let (distance, normal) = body.world_bounds().intersect_ray(ray)?;
                (distance <= max_distance).then(|| RayHit {
                    body: key,
                    distance,
                    point: ray.point_at(distance),
                    normal,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}
