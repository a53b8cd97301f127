//! Gameplay objects and the session that ticks them

pub mod agent;
pub mod coin;
pub mod player;
pub mod session;

pub use agent::Agent;
pub use coin::Coin;
pub use player::Player;
pub use session::{FrameInput, Game};
