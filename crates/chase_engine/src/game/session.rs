//! Game session: owns every simulated object and runs the per-tick order
//!
//! Each tick the player moves first, then the camera follows it, then the
//! agent pursues the player's new position, then coins animate and are
//! collected, and finally player/agent contact is checked. Events raised
//! during the tick are dispatched at its end.

use crate::camera::CameraRig;
use crate::core::config::GameConfig;
use crate::events::{BodyKind, Event, EventHandler, EventSystem, EventType, GameEvent};
use crate::foundation::math::{Vec2, Vec3};
use crate::input::{MovementKeys, PointerInput};
use crate::level::Level;
use crate::physics::{Collidable, ExtentError, MeshData};
use super::{Agent, Coin, Player};

/// Player body sits on the floor plane
const GROUND_HEIGHT: f32 = 0.0;

/// Input sampled by the host for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Held movement keys
    pub keys: MovementKeys,
    /// Pointer motion gathered since the last tick, in pixels
    pub pointer_delta: Vec2,
}

impl From<MovementKeys> for FrameInput {
    fn from(keys: MovementKeys) -> Self {
        Self { keys, pointer_delta: Vec2::zeros() }
    }
}

/// A running chase on one level
pub struct Game {
    config: GameConfig,
    level: Level,
    player: Player,
    agent: Agent,
    coins: Vec<Coin>,
    camera: CameraRig,
    pointer: PointerInput,
    events: EventSystem,
    in_contact: bool,
    ticks: u64,
}

impl Game {
    /// Set up a session; bodies wait for geometry before they take part
    pub fn new(config: GameConfig, level: Level) -> Self {
        let cell_size = level.cell_size();
        let player = Player::new(level.cell_to_world(level.player_spawn(), GROUND_HEIGHT), config.player.clone());
        let agent = Agent::new(
            level.cell_to_world(level.agent_spawn(), GROUND_HEIGHT),
            config.agent.clone(),
            &config.navigation,
            cell_size,
        );
        let coins = level
            .coin_cells()
            .iter()
            .enumerate()
            .map(|(index, &cell)| Coin::new(index, cell, cell_size, config.coins.clone()))
            .collect();
        let mut camera = CameraRig::new(config.camera.clone());
        camera.update(0.0, player.position(), Vec2::zeros(), level.statics());

        log::info!(
            "Session started on '{}' with {} coins",
            level.name(),
            level.coin_cells().len()
        );

        Self {
            config,
            level,
            player,
            agent,
            coins,
            camera,
            pointer: PointerInput::new(),
            events: EventSystem::new(),
            in_contact: false,
            ticks: 0,
        }
    }

    /// Player geometry finished loading
    pub fn on_player_geometry(&mut self, mesh: &MeshData) -> Result<(), ExtentError> {
        self.player.body_mut().assign_geometry(mesh)?;
        self.events.send(GameEvent::BodyReady { body: BodyKind::Player });
        Ok(())
    }

    /// Agent geometry finished loading
    pub fn on_agent_geometry(&mut self, mesh: &MeshData) -> Result<(), ExtentError> {
        self.agent.body_mut().assign_geometry(mesh)?;
        self.events.send(GameEvent::BodyReady { body: BodyKind::Agent });
        Ok(())
    }

    /// Coin geometry finished loading; every coin shares the model
    pub fn on_coin_geometry(&mut self, mesh: &MeshData) -> Result<(), ExtentError> {
        let bounds = mesh.local_extents();
        for coin in &mut self.coins {
            coin.body_mut().assign_bounds(bounds.clone())?;
            self.events.send(GameEvent::BodyReady { body: BodyKind::Coin(coin.index()) });
        }
        Ok(())
    }

    /// Host acquired pointer lock
    pub fn pointer_lock_acquired(&mut self) {
        if let Some(event) = self.pointer.lock_acquired() {
            self.events.send(event);
        }
    }

    /// Host lost pointer lock
    pub fn pointer_lock_lost(&mut self) {
        if let Some(event) = self.pointer.lock_lost() {
            self.events.send(event);
        }
    }

    /// Relative pointer motion in pixels
    pub fn pointer_motion(&mut self, dx: f32, dy: f32) {
        self.pointer.motion(dx, dy);
    }

    /// Advance the simulation
    ///
    /// `elapsed` is the session time in seconds and drives the coin bob and
    /// event timestamps. Nothing moves until the player is ready, but pending
    /// events are still dispatched.
    pub fn tick(&mut self, delta_time: f32, elapsed: f32, input: &FrameInput) {
        self.events.update_time(f64::from(elapsed));
        self.pointer.motion(input.pointer_delta.x, input.pointer_delta.y);
        if self.player.body().is_ready() {
            self.step(delta_time, elapsed, &input.keys);
            self.ticks += 1;
        }
        self.events.dispatch();
    }

    fn step(&mut self, delta_time: f32, elapsed: f32, keys: &MovementKeys) {
        let statics = self.level.statics();

        self.player.update(delta_time, keys, &self.camera, statics);
        let look = self.pointer.take_delta();
        self.camera.update(delta_time, self.player.position(), look, statics);

        self.agent.update(delta_time, self.player.position(), &self.level);

        let mut collected = Vec::new();
        for coin in &mut self.coins {
            coin.animate(delta_time, elapsed);
            if coin.try_collect(self.player.body()) {
                collected.push(coin.index());
            }
        }
        for coin in collected {
            let remaining = self.coins_remaining();
            log::info!("Coin {coin} collected, {remaining} left");
            self.events.send(GameEvent::CoinCollected { coin, remaining });
            if remaining == 0 {
                log::info!("All coins collected");
                self.events.send(GameEvent::AllCoinsCollected);
            }
        }

        let touching = self.player.body().overlaps(self.agent.body());
        if touching && !self.in_contact {
            let (player, agent) = (self.player.position(), self.agent.position());
            log::info!("Agent caught the player at {player:?}");
            self.events.send(GameEvent::PlayerAgentCollision { player, agent });
        }
        self.in_contact = touching;
    }

    /// Register a handler for one event type
    pub fn register_handler(&mut self, event_type: EventType, handler: Box<dyn EventHandler>) {
        self.events.register_handler(event_type, handler);
    }

    /// Take every event dispatched since the last call that no handler consumed
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain()
    }

    /// Coins not yet collected
    pub fn coins_remaining(&self) -> usize {
        self.coins.iter().filter(|coin| !coin.is_collected()).count()
    }

    /// Whether player and agent overlapped on the last tick
    pub fn is_player_caught(&self) -> bool {
        self.in_contact
    }

    /// Ticks simulated since the player became ready
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Session configuration
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The level
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// The player
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable player (tests and scripted setups)
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// The agent
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Mutable agent (tests and scripted setups)
    pub fn agent_mut(&mut self) -> &mut Agent {
        &mut self.agent
    }

    /// All coins, collected or not
    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    /// The camera rig
    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    /// Pointer state
    pub fn pointer(&self) -> &PointerInput {
        &self.pointer
    }

    /// Where the player started
    pub fn player_spawn_position(&self) -> Vec3 {
        self.level.cell_to_world(self.level.player_spawn(), GROUND_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelLayout;

    fn game(rows: &[&str]) -> Game {
        let level = Level::build(&LevelLayout::new("test", 1.0, rows)).unwrap();
        Game::new(GameConfig::default(), level)
    }

    fn box_mesh() -> MeshData {
        MeshData::cuboid(Vec3::new(0.5, 0.5, 0.5))
    }

    #[test]
    fn test_tick_is_noop_until_player_ready() {
        let mut game = game(&["#####", "#P.A#", "#####"]);
        let input = FrameInput::from(MovementKeys { forward: true, ..MovementKeys::default() });
        game.tick(0.1, 0.1, &input);
        assert_eq!(game.player().position(), game.player_spawn_position());
        assert_eq!(game.ticks(), 0);

        game.on_player_geometry(&box_mesh()).unwrap();
        game.tick(0.1, 0.2, &input);
        assert_eq!(game.ticks(), 1);
        let events = game.drain_events();
        assert_eq!(events[0].payload, GameEvent::BodyReady { body: BodyKind::Player });
    }

    #[test]
    fn test_bad_geometry_is_reported() {
        let mut game = game(&["#####", "#P.A#", "#####"]);
        let empty = MeshData::new(Vec::new(), Vec::new());
        assert!(game.on_agent_geometry(&empty).is_err());
        game.tick(0.1, 0.1, &FrameInput::default());
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_pointer_events_are_delivered() {
        let mut game = game(&["#####", "#P.A#", "#####"]);
        game.pointer_lock_acquired();
        game.pointer_motion(40.0, 0.0);
        game.pointer_lock_lost();
        game.tick(0.1, 0.1, &FrameInput::default());
        let kinds: Vec<_> = game.drain_events().iter().map(Event::event_type).collect();
        assert_eq!(kinds, vec![EventType::CameraResumed, EventType::CameraPaused]);
        assert!(!game.pointer().is_locked());
    }

    #[test]
    fn test_contact_event_fires_on_touch_only() {
        let mut game = game(&["####", "#PA#", "####"]);
        game.on_player_geometry(&MeshData::cuboid(Vec3::new(2.0, 1.0, 0.5))).unwrap();
        game.on_agent_geometry(&box_mesh()).unwrap();
        game.drain_events();

        game.tick(0.01, 0.01, &FrameInput::default());
        game.tick(0.01, 0.02, &FrameInput::default());
        let collisions = game
            .drain_events()
            .iter()
            .filter(|event| event.event_type() == EventType::PlayerAgentCollision)
            .count();
        assert_eq!(collisions, 1);
        assert!(game.is_player_caught());
    }
}
