//! Collectible coins

use crate::core::config::CoinConfig;
use crate::foundation::math::{Transform, Vec3};
use crate::navigation::Cell;
use crate::physics::{Collidable, CollisionLayers, DynamicBody};

/// A spinning, bobbing pickup
#[derive(Debug, Clone)]
pub struct Coin {
    index: usize,
    cell: Cell,
    body: DynamicBody,
    config: CoinConfig,
    collected: bool,
}

impl Coin {
    /// Spawn coin `index` above `cell`
    pub fn new(index: usize, cell: Cell, cell_size: f32, config: CoinConfig) -> Self {
        let position = cell.to_world(cell_size, config.spawn_height);
        Self {
            index,
            cell,
            body: DynamicBody::new(
                Transform::from_position(position),
                CollisionLayers::PICKUP,
                CollisionLayers::empty(),
            ),
            config,
            collected: false,
        }
    }

    /// Spawn index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Cell the coin sits in
    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Collision body
    pub fn body(&self) -> &DynamicBody {
        &self.body
    }

    /// Mutable collision body (geometry assignment)
    pub fn body_mut(&mut self) -> &mut DynamicBody {
        &mut self.body
    }

    /// Whether the coin was picked up
    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Spin and bob; `elapsed` is the session time in seconds
    pub fn animate(&mut self, delta_time: f32, elapsed: f32) {
        if self.collected || !self.body.is_ready() {
            return;
        }
        self.body.rotate_yaw(self.config.spin_speed * delta_time);
        let height = self.config.bob_base + elapsed.sin() * self.config.bob_amplitude;
        let position = self.body.position();
        self.body.translate(Vec3::new(0.0, height - position.y, 0.0));
    }

    /// Pick the coin up if `collector` overlaps it
    ///
    /// Returns `true` only on the tick the coin is collected.
    pub fn try_collect<C: Collidable>(&mut self, collector: &C) -> bool {
        if self.collected || !self.body.overlaps(collector) {
            return false;
        }
        self.collected = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::HALF_PI;
    use crate::physics::MeshData;
    use approx::assert_relative_eq;

    fn ready_coin() -> Coin {
        let mut coin = Coin::new(0, Cell::new(1, 2), 4.0, CoinConfig::default());
        coin.body_mut().assign_geometry(&MeshData::cuboid(Vec3::new(1.0, 1.0, 0.2))).unwrap();
        coin
    }

    #[test]
    fn test_coin_spawns_above_cell() {
        let coin = Coin::new(3, Cell::new(1, 2), 4.0, CoinConfig::default());
        assert_eq!(coin.body().position(), Vec3::new(4.0, 2.0, 8.0));
        assert_eq!(coin.index(), 3);
        assert!(!coin.is_collected());
    }

    #[test]
    fn test_coin_spins_and_bobs() {
        let mut coin = ready_coin();
        coin.animate(1.0, HALF_PI);
        assert_relative_eq!(coin.body().position().y, 2.0, epsilon = 1e-5);
        assert_relative_eq!(coin.body().rotation().angle(), 0.5, epsilon = 1e-5);

        coin.animate(1.0, -HALF_PI);
        assert_relative_eq!(coin.body().position().y, 1.0, epsilon = 1e-5);
        assert_eq!(coin.body().position().x, 4.0);
    }

    #[test]
    fn test_collect_once() {
        let mut coin = ready_coin();
        let mut collector = DynamicBody::new(
            Transform::from_position(Vec3::new(4.0, 1.5, 8.0)),
            CollisionLayers::PLAYER,
            CollisionLayers::MOVEMENT_BLOCKERS,
        );
        assert!(!coin.try_collect(&collector));

        collector.assign_geometry(&MeshData::cuboid(Vec3::new(1.0, 2.0, 1.0))).unwrap();
        assert!(coin.try_collect(&collector));
        assert!(coin.is_collected());
        assert!(!coin.try_collect(&collector));
    }
}
