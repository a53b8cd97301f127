//! Static and dynamic collidable bodies
//!
//! Bodies store their bounding box in model space and derive the world box
//! on demand from the current transform (GEA 13.3.4), so moving a body never
//! leaves a stale volume behind. Rotation is ignored: boxes stay axis-aligned
//! and only position and scale affect the world box.

use crate::foundation::math::{utils, Quat, Transform, Vec3};
use super::collision::{Aabb, ExtentError, MeshData};
use super::collision_layers::CollisionLayers;
use super::collision_system::StaticBodySet;

/// World-space box for a local box under `transform`
pub fn world_bounds(local: &Aabb, transform: &Transform) -> Aabb {
    local.scaled(&transform.scale).translated(&transform.position)
}

/// Shared capability of everything that takes part in collision tests
pub trait Collidable {
    /// Current transform
    fn transform(&self) -> &Transform;

    /// Model-space bounding box, `None` while the geometry is unknown
    fn local_bounds(&self) -> Option<&Aabb>;

    /// Layers this body lives on
    fn layers(&self) -> CollisionLayers;

    /// World-space bounding box, recomputed from the current transform
    fn bounding_volume_world(&self) -> Option<Aabb> {
        self.local_bounds().map(|local| world_bounds(local, self.transform()))
    }

    /// Whether both bodies have volumes and those volumes overlap
    fn overlaps<C: Collidable + ?Sized>(&self, other: &C) -> bool
    where
        Self: Sized,
    {
        match (self.bounding_volume_world(), other.bounding_volume_world()) {
            (Some(a), Some(b)) => a.overlaps(&b),
            _ => false,
        }
    }
}

/// Immovable level geometry
#[derive(Debug, Clone)]
pub struct StaticBody {
    transform: Transform,
    local_bounds: Aabb,
    layers: CollisionLayers,
}

impl StaticBody {
    /// Create a static body from an already known local box
    pub fn new(transform: Transform, local_bounds: Aabb, layers: CollisionLayers) -> Self {
        Self { transform, local_bounds, layers }
    }

    /// Create a static body from geometry
    pub fn from_mesh(
        transform: Transform,
        mesh: &MeshData,
        layers: CollisionLayers,
    ) -> Result<Self, ExtentError> {
        Ok(Self::new(transform, mesh.local_extents()?, layers))
    }

    /// World box; static bodies always have one
    pub fn world_bounds(&self) -> Aabb {
        world_bounds(&self.local_bounds, &self.transform)
    }
}

impl Collidable for StaticBody {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn local_bounds(&self) -> Option<&Aabb> {
        Some(&self.local_bounds)
    }

    fn layers(&self) -> CollisionLayers {
        self.layers
    }
}

/// Loading state of a dynamic body's geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyState {
    /// Geometry has not arrived yet
    Pending,
    /// Extents are known; the body takes part in collision
    Ready,
    /// The last geometry handed over was unusable
    Failed,
}

/// Result of a resolved move
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveOutcome {
    /// The body has no extents; nothing happened
    NotReady,
    /// The move was applied, possibly with blocked axes removed
    Moved {
        /// Displacement actually applied
        applied: Vec3,
        /// The X component was removed by a collision
        blocked_x: bool,
        /// The Z component was removed by a collision
        blocked_z: bool,
    },
}

impl MoveOutcome {
    /// Displacement actually applied (zero when not ready)
    pub fn applied(&self) -> Vec3 {
        match self {
            Self::NotReady => Vec3::zeros(),
            Self::Moved { applied, .. } => *applied,
        }
    }

    /// Whether any component of the requested move was blocked
    pub fn was_blocked(&self) -> bool {
        matches!(self, Self::Moved { blocked_x: true, .. } | Self::Moved { blocked_z: true, .. })
    }
}

/// Movable collidable: player, agent or coin
#[derive(Debug, Clone)]
pub struct DynamicBody {
    transform: Transform,
    local_bounds: Option<Aabb>,
    layers: CollisionLayers,
    mask: CollisionLayers,
    state: BodyState,
}

impl DynamicBody {
    /// Create a body that waits for its geometry
    ///
    /// `mask` names the static layers that block this body's movement.
    pub fn new(transform: Transform, layers: CollisionLayers, mask: CollisionLayers) -> Self {
        Self {
            transform,
            local_bounds: None,
            layers,
            mask,
            state: BodyState::Pending,
        }
    }

    /// Hand geometry to the body, computing and caching its local extents
    ///
    /// On failure the body drops any previous extents and stays out of
    /// collision until usable geometry is assigned.
    pub fn assign_geometry(&mut self, mesh: &MeshData) -> Result<(), ExtentError> {
        self.assign_bounds(mesh.local_extents())
    }

    /// Set the local extents directly
    pub fn assign_bounds(&mut self, bounds: Result<Aabb, ExtentError>) -> Result<(), ExtentError> {
        match bounds {
            Ok(aabb) => {
                self.local_bounds = Some(aabb);
                self.state = BodyState::Ready;
                log::debug!("Body on {:?} ready with extents {:?}", self.layers, aabb.size());
                Ok(())
            }
            Err(e) => {
                self.local_bounds = None;
                self.state = BodyState::Failed;
                log::error!("Body on {:?} rejected geometry: {e}", self.layers);
                Err(e)
            }
        }
    }

    /// Whether extents are known
    pub fn is_ready(&self) -> bool {
        self.state == BodyState::Ready
    }

    /// Loading state
    pub fn state(&self) -> BodyState {
        self.state
    }

    /// Movement mask
    pub fn mask(&self) -> CollisionLayers {
        self.mask
    }

    /// Current world position
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Current facing
    pub fn rotation(&self) -> &Quat {
        &self.transform.rotation
    }

    /// Teleport the body
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    /// Replace the facing
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
    }

    /// Turn towards `target` by at most `max_step` radians
    pub fn rotate_towards(&mut self, target: &Quat, max_step: f32) {
        self.transform.rotation = utils::rotate_towards(&self.transform.rotation, target, max_step);
    }

    /// Spin about +Y by `angle` radians
    pub fn rotate_yaw(&mut self, angle: f32) {
        self.transform.rotation = utils::yaw_rotation(angle) * self.transform.rotation;
    }

    /// Apply a displacement without any collision resolution
    pub fn translate(&mut self, displacement: Vec3) {
        self.transform.position += displacement;
    }

    /// Apply a displacement, sliding along static bodies in the movement mask
    ///
    /// X and Z are tested independently from the starting position and any
    /// axis whose isolated move would overlap is dropped; the union of all
    /// blocked axes applies. If the remaining diagonal still clips a corner,
    /// only the longer free axis is kept. Obstacles the body already overlaps
    /// before moving are ignored so a body spawned inside a wall can leave it.
    pub fn move_and_collide(&mut self, displacement: Vec3, obstacles: &StaticBodySet) -> MoveOutcome {
        let Some(start) = self.bounding_volume_world() else {
            log::trace!("Ignoring move for non-ready body on {:?}", self.layers);
            return MoveOutcome::NotReady;
        };

        let mask = self.mask;
        let blocked = |offset: Vec3| obstacles.is_blocked(&start.translated(&offset), &start, mask);

        if !blocked(displacement) {
            self.translate(displacement);
            return MoveOutcome::Moved { applied: displacement, blocked_x: false, blocked_z: false };
        }

        let blocked_x = displacement.x != 0.0 && blocked(Vec3::new(displacement.x, 0.0, 0.0));
        let blocked_z = displacement.z != 0.0 && blocked(Vec3::new(0.0, 0.0, displacement.z));

        let filtered = Vec3::new(
            if blocked_x { 0.0 } else { displacement.x },
            displacement.y,
            if blocked_z { 0.0 } else { displacement.z },
        );

        let (applied, blocked_x, blocked_z) = if blocked(filtered) {
            // Corner case: each axis is free on its own but the diagonal is not
            let keep_x = filtered.x.abs() >= filtered.z.abs();
            let single = if keep_x {
                Vec3::new(filtered.x, displacement.y, 0.0)
            } else {
                Vec3::new(0.0, displacement.y, filtered.z)
            };
            if blocked(single) {
                (Vec3::zeros(), displacement.x != 0.0, displacement.z != 0.0)
            } else {
                (single, blocked_x || !keep_x, blocked_z || keep_x)
            }
        } else {
            (filtered, blocked_x, blocked_z)
        };

        log::trace!(
            "Resolved move {:?} -> {:?} (blocked x: {blocked_x}, z: {blocked_z})",
            displacement, applied
        );
        self.translate(applied);
        MoveOutcome::Moved { applied, blocked_x, blocked_z }
    }
}

impl Collidable for DynamicBody {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn local_bounds(&self) -> Option<&Aabb> {
        if self.is_ready() { self.local_bounds.as_ref() } else { None }
    }

    fn layers(&self) -> CollisionLayers {
        self.layers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_cube() -> MeshData {
        MeshData::cuboid(Vec3::new(1.0, 1.0, 1.0))
    }

    fn player_at(position: Vec3) -> DynamicBody {
        let mut body = DynamicBody::new(
            Transform::from_position(position),
            CollisionLayers::PLAYER,
            CollisionLayers::MOVEMENT_BLOCKERS,
        );
        body.assign_geometry(&unit_cube()).unwrap();
        body
    }

    fn wall(min: Vec3, max: Vec3) -> StaticBody {
        StaticBody::new(Transform::identity(), Aabb::new(min, max), CollisionLayers::WALL)
    }

    #[test]
    fn test_world_bounds_follow_transform() {
        let mut body = player_at(Vec3::new(3.0, 0.0, 0.0));
        let aabb = body.bounding_volume_world().unwrap();
        assert_relative_eq!(aabb.center().x, 3.0);

        body.translate(Vec3::new(1.0, 0.0, 2.0));
        let aabb = body.bounding_volume_world().unwrap();
        assert_relative_eq!(aabb.center().x, 4.0);
        assert_relative_eq!(aabb.center().z, 2.0);
    }

    #[test]
    fn test_world_bounds_apply_scale() {
        let body = StaticBody::new(
            Transform::from_position_scale(Vec3::new(0.0, 0.0, 5.0), Vec3::new(4.0, 1.0, 1.0)),
            Aabb::from_center_extents(Vec3::zeros(), Vec3::new(0.5, 0.5, 0.5)),
            CollisionLayers::WALL,
        );
        let aabb = body.world_bounds();
        assert_relative_eq!(aabb.min.x, -2.0);
        assert_relative_eq!(aabb.max.x, 2.0);
        assert_relative_eq!(aabb.center().z, 5.0);
    }

    #[test]
    fn test_pending_body_does_not_collide_or_move() {
        let mut body = DynamicBody::new(
            Transform::from_position(Vec3::new(1.0, 0.0, 1.0)),
            CollisionLayers::AGENT,
            CollisionLayers::MOVEMENT_BLOCKERS,
        );
        assert_eq!(body.state(), BodyState::Pending);
        assert!(!body.is_ready());
        assert!(body.bounding_volume_world().is_none());

        let other = player_at(Vec3::new(1.0, 0.0, 1.0));
        assert!(!body.overlaps(&other));
        assert!(!other.overlaps(&body));

        let mut statics = StaticBodySet::new();
        statics.insert(wall(Vec3::new(5.0, -1.0, -5.0), Vec3::new(6.0, 1.0, 5.0)));
        assert_eq!(body.move_and_collide(Vec3::new(2.0, 0.0, 0.0), &statics), MoveOutcome::NotReady);
        assert_eq!(body.move_and_collide(Vec3::zeros(), &statics), MoveOutcome::NotReady);
        assert_eq!(body.position(), Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(body.state(), BodyState::Pending);
    }

    #[test]
    fn test_failed_geometry_body_is_not_ready() {
        let mut body = DynamicBody::new(
            Transform::identity(),
            CollisionLayers::AGENT,
            CollisionLayers::MOVEMENT_BLOCKERS,
        );
        assert_eq!(body.state(), BodyState::Pending);
        assert!(body.assign_geometry(&MeshData::default()).is_err());
        assert_eq!(body.state(), BodyState::Failed);
        assert!(!body.is_ready());
        assert!(body.bounding_volume_world().is_none());

        let other = player_at(Vec3::zeros());
        assert!(!body.overlaps(&other));
        assert!(!other.overlaps(&body));

        let statics = StaticBodySet::new();
        assert_eq!(body.move_and_collide(Vec3::x(), &statics), MoveOutcome::NotReady);
        assert_eq!(body.position(), Vec3::zeros());
    }

    #[test]
    fn test_failed_geometry_clears_previous_extents() {
        let mut body = player_at(Vec3::zeros());
        assert!(body.is_ready());
        assert!(body.assign_geometry(&MeshData::default()).is_err());
        assert!(body.bounding_volume_world().is_none());
    }

    #[test]
    fn test_free_move_is_applied_in_full() {
        let mut body = player_at(Vec3::zeros());
        let statics = StaticBodySet::new();
        let outcome = body.move_and_collide(Vec3::new(1.0, 0.0, 1.0), &statics);
        assert!(!outcome.was_blocked());
        assert_eq!(body.position(), Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_diagonal_move_slides_along_wall() {
        // Wall occupies x in [0.5, 1.5]; the player's right face touches it
        let mut statics = StaticBodySet::new();
        statics.insert(wall(Vec3::new(0.5, -1.0, -10.0), Vec3::new(1.5, 1.0, 10.0)));

        let mut body = player_at(Vec3::zeros());
        let outcome = body.move_and_collide(Vec3::new(1.0, 0.0, 1.0), &statics);

        assert_eq!(
            outcome,
            MoveOutcome::Moved { applied: Vec3::new(0.0, 0.0, 1.0), blocked_x: true, blocked_z: false }
        );
        assert_relative_eq!(body.position().x, 0.0);
        assert_relative_eq!(body.position().z, 1.0);
    }

    #[test]
    fn test_blocks_union_across_obstacles() {
        let mut statics = StaticBodySet::new();
        statics.insert(wall(Vec3::new(0.5, -1.0, -10.0), Vec3::new(1.5, 1.0, 10.0)));
        statics.insert(wall(Vec3::new(-10.0, -1.0, 0.5), Vec3::new(10.0, 1.0, 1.5)));

        let mut body = player_at(Vec3::zeros());
        let outcome = body.move_and_collide(Vec3::new(1.0, 0.0, 1.0), &statics);
        assert_eq!(outcome.applied(), Vec3::zeros());
        assert_eq!(body.position(), Vec3::zeros());
    }

    #[test]
    fn test_corner_keeps_longer_free_axis() {
        // A pillar diagonally ahead: each axis alone is clear, the diagonal is not
        let mut statics = StaticBodySet::new();
        statics.insert(wall(Vec3::new(0.75, -1.0, 0.75), Vec3::new(2.0, 1.0, 2.0)));

        let mut body = player_at(Vec3::zeros());
        let outcome = body.move_and_collide(Vec3::new(0.5, 0.0, 0.4), &statics);
        assert_eq!(
            outcome,
            MoveOutcome::Moved { applied: Vec3::new(0.5, 0.0, 0.0), blocked_x: false, blocked_z: true }
        );
    }

    #[test]
    fn test_mask_filters_obstacles() {
        let mut statics = StaticBodySet::new();
        statics.insert(StaticBody::new(
            Transform::identity(),
            Aabb::new(Vec3::new(-10.0, -1.0, -10.0), Vec3::new(10.0, 0.0, 10.0)),
            CollisionLayers::FLOOR | CollisionLayers::CAMERA_BLOCKER,
        ));

        // Body sinks into the floor slab but floors are not movement blockers
        let mut body = player_at(Vec3::zeros());
        let outcome = body.move_and_collide(Vec3::new(2.0, 0.0, 0.0), &statics);
        assert!(!outcome.was_blocked());
        assert_relative_eq!(body.position().x, 2.0);
    }

    #[test]
    fn test_body_starting_inside_wall_can_leave() {
        let mut statics = StaticBodySet::new();
        statics.insert(wall(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0)));

        let mut body = player_at(Vec3::zeros());
        let outcome = body.move_and_collide(Vec3::new(0.0, 0.0, 3.0), &statics);
        assert!(!outcome.was_blocked());
        assert_relative_eq!(body.position().z, 3.0);
    }
}
