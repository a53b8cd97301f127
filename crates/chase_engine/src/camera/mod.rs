//! Third-person camera
//!
//! The rig follows the player, turns with pointer-lock input and keeps
//! walls out of the line of sight. Pointer handling itself lives in
//! [`crate::input::pointer`].

pub mod rig;

pub use rig::CameraRig;
