//! Collision layer system for filtering collision detection
//!
//! Based on Game Engine Architecture 3rd Edition, Section 13.3.8:
//! "Most games need to filter collisions... This is typically done via
//! collision layers or groups."
//!
//! Every body carries a layer set; queries carry a mask and only consider
//! bodies whose layers intersect it. Movement masks name `WALL` only, so the
//! floor the player stands on never blocks walking, while the camera ray
//! mask `CAMERA_BLOCKER` picks up both walls and the floor.

use bitflags::bitflags;

bitflags! {
    /// Collision layer bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionLayers: u32 {
        /// Player avatar
        const PLAYER = 1 << 0;
        /// Pursuing agent
        const AGENT = 1 << 1;
        /// Level walls
        const WALL = 1 << 2;
        /// Level floor
        const FLOOR = 1 << 3;
        /// Coins and other collectibles
        const PICKUP = 1 << 4;
        /// Geometry the third-person camera must not pass through
        const CAMERA_BLOCKER = 1 << 5;
    }
}

impl CollisionLayers {
    /// Layers that stop walking bodies
    pub const MOVEMENT_BLOCKERS: Self = Self::WALL;

    /// Check if two bodies should collide based on their layers and masks
    ///
    /// A's layer must be in B's mask and B's layer must be in A's mask.
    pub fn should_collide(layer_a: Self, mask_a: Self, layer_b: Self, mask_b: Self) -> bool {
        layer_a.intersects(mask_b) && layer_b.intersects(mask_a)
    }

    /// Check whether a body on these layers is visible to a query mask
    pub fn matches(self, mask: Self) -> bool {
        self.intersects(mask)
    }
}
