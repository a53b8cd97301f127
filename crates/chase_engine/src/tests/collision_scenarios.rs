//! Collision and navigation scenarios across physics, level and search
//!
//! Randomized checks use a seeded generator so failures reproduce.

use crate::foundation::math::{Transform, Vec3};
use crate::level::{Level, LevelLayout};
use crate::navigation::{Cell, Connectivity, NavGrid, PathSearch};
use crate::physics::{Aabb, Collidable, CollisionLayers, DynamicBody, MeshData, StaticBody, StaticBodySet};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn unit_body(position: Vec3) -> DynamicBody {
        let mut body = DynamicBody::new(
            Transform::from_position(position),
            CollisionLayers::PLAYER,
            CollisionLayers::MOVEMENT_BLOCKERS,
        );
        body.assign_geometry(&MeshData::cuboid(Vec3::new(1.0, 1.0, 1.0))).unwrap();
        body
    }

    #[test]
    fn test_diagonal_move_keeps_free_axis() {
        // Wall occupies x in [0.5, 1.5]; a unit body at the origin moves (1, 0, 1)
        let mut statics = StaticBodySet::new();
        statics.insert(StaticBody::new(
            Transform::from_position(Vec3::new(1.0, 0.0, 0.0)),
            Aabb::from_center_extents(Vec3::zeros(), Vec3::new(0.5, 5.0, 50.0)),
            CollisionLayers::WALL,
        ));
        let mut body = unit_body(Vec3::zeros());

        let outcome = body.move_and_collide(Vec3::new(1.0, 0.0, 1.0), &statics);
        assert!(outcome.was_blocked());
        assert_relative_eq!(body.position().x, 0.0);
        assert_relative_eq!(body.position().z, 1.0);
    }

    #[test]
    fn test_bodies_never_end_inside_walls() {
        let level = Level::build(&LevelLayout::default()).unwrap();
        let statics = level.statics();
        let mut rng = StdRng::seed_from_u64(7);

        let start = level.cell_to_world(level.player_spawn(), 0.0);
        let mut body = unit_body(start);
        for _ in 0..2_000 {
            let step = Vec3::new(rng.gen_range(-1.5..1.5), 0.0, rng.gen_range(-1.5..1.5));
            body.move_and_collide(step, statics);
            let bounds = body.bounding_volume_world().unwrap();
            assert!(
                statics.overlapping(&bounds, CollisionLayers::WALL).next().is_none(),
                "body ended inside a wall at {:?}",
                body.position()
            );
        }
    }

    fn random_box(rng: &mut StdRng) -> Aabb {
        let center = Vec3::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0));
        let extents = Vec3::new(rng.gen_range(0.1..3.0), rng.gen_range(0.1..3.0), rng.gen_range(0.1..3.0));
        Aabb::from_center_extents(center, extents)
    }

    #[test]
    fn test_random_overlap_is_symmetric() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let a = random_box(&mut rng);
            let b = random_box(&mut rng);
            assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }
    }

    #[test]
    fn test_level_paths_avoid_walls() {
        let level = Level::build(&LevelLayout::default()).unwrap();
        let search = PathSearch::new(Connectivity::Four);
        let path = search.find_path(level.grid(), level.agent_spawn(), level.player_spawn());

        assert_eq!(path.last(), Some(&level.player_spawn()));
        assert!(path.iter().all(|&cell| level.grid().is_walkable(cell)));
        // Consecutive cells are orthogonal neighbours
        let mut previous = level.agent_spawn();
        for &cell in &path {
            assert_eq!((cell.x - previous.x).abs() + (cell.z - previous.z).abs(), 1);
            previous = cell;
        }
        // (5,5) -> (1,1) needs at least the Manhattan distance
        assert_eq!(path.len(), 8);
    }

    #[test]
    fn test_five_by_five_wall_detour() {
        let mut grid = NavGrid::new(5, 5);
        grid.set_blocked(Cell::new(2, 2));
        grid.set_blocked(Cell::new(2, 3));
        let path = PathSearch::new(Connectivity::Four).find_path(&grid, Cell::new(0, 0), Cell::new(4, 4));
        assert_eq!(path.len(), 8);
        assert!(!path.contains(&Cell::new(2, 2)) && !path.contains(&Cell::new(2, 3)));
    }
}
