//! Inverted Pac-Man headless demo
//!
//! Loads the game settings and a level, then lets a scripted wanderer play
//! against the chasing agent until it is caught, collects every coin, or the
//! frame limit is reached. Held movement keys delivered as host events take
//! over from the wanderer. Everything is reported through the log.
//!
//! ```text
//! inverted_pacman [--config config/game.toml] [--level levels/courtyard.ron]
//!                 [--frames 3600] [--seed 7]
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use chase_engine::foundation::logging;
use chase_engine::prelude::*;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DEFAULT_CONFIG_PATH: &str = "config/game.toml";
const DEFAULT_FRAMES: u64 = 3600;
const DEFAULT_SEED: u64 = 7;

/// Headless Inverted Pac-Man demo
#[derive(Parser, Debug)]
#[command(name = "inverted_pacman", version)]
struct Args {
    /// Game settings file (TOML or RON)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Level file; the built-in courtyard is used when omitted
    #[arg(long)]
    level: Option<String>,

    /// Frames to simulate before giving up
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    frames: u64,

    /// Seed for the wandering player
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
}

/// Outcome counters filled in by event handlers
#[derive(Debug, Default)]
struct Scoreboard {
    coins: usize,
    caught: bool,
    cleared: bool,
}

/// Picks a new random heading every so often, like a player exploring
struct Wanderer {
    rng: StdRng,
    keys: MovementKeys,
    frames_left: u32,
}

impl Wanderer {
    fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed), keys: MovementKeys::default(), frames_left: 0 }
    }

    fn next_input(&mut self) -> FrameInput {
        if self.frames_left == 0 {
            self.keys = MovementKeys {
                forward: self.rng.gen_bool(0.7),
                back: self.rng.gen_bool(0.1),
                left: self.rng.gen_bool(0.3),
                right: self.rng.gen_bool(0.3),
                run: self.rng.gen_bool(0.2),
            };
            self.frames_left = self.rng.gen_range(20..90);
        }
        self.frames_left -= 1;
        let look = Vec2::new(self.rng.gen_range(-30.0..30.0), self.rng.gen_range(-2.0..2.0));
        FrameInput { keys: self.keys, pointer_delta: look }
    }
}

struct ChaseApp {
    args: Args,
    game: Option<Game>,
    wanderer: Wanderer,
    held: MovementKeys,
    score: Rc<RefCell<Scoreboard>>,
    wall_clock: Stopwatch,
}

impl ChaseApp {
    fn new(args: Args) -> Self {
        let wanderer = Wanderer::new(args.seed);
        Self {
            args,
            game: None,
            wanderer,
            held: MovementKeys::default(),
            score: Rc::default(),
            wall_clock: Stopwatch::new(),
        }
    }

    /// Held keys steer while a direction is down, otherwise the wanderer does
    fn frame_input(&mut self) -> FrameInput {
        if self.held.direction_offset().is_some() {
            FrameInput::from(self.held)
        } else {
            self.wanderer.next_input()
        }
    }

    fn load_level(&self) -> Result<Level, LevelError> {
        match &self.args.level {
            Some(path) => Level::load(path),
            None => {
                log::info!("No level given, using the built-in courtyard");
                Level::build(&LevelLayout::default())
            }
        }
    }

    fn register_handlers(&self, game: &mut Game) {
        let score = Rc::clone(&self.score);
        game.register_handler(
            EventType::CoinCollected,
            Box::new(move |event: &Event| {
                if let GameEvent::CoinCollected { coin, remaining } = event.payload {
                    score.borrow_mut().coins += 1;
                    log::info!("[{:.2}s] coin {coin} picked up, {remaining} to go", event.timestamp);
                }
                true
            }),
        );

        let score = Rc::clone(&self.score);
        game.register_handler(
            EventType::AllCoinsCollected,
            Box::new(move |_: &Event| {
                score.borrow_mut().cleared = true;
                true
            }),
        );

        let score = Rc::clone(&self.score);
        game.register_handler(
            EventType::PlayerAgentCollision,
            Box::new(move |event: &Event| {
                if let GameEvent::PlayerAgentCollision { player, agent } = &event.payload {
                    log::warn!("[{:.2}s] caught at {player:?} by agent at {agent:?}", event.timestamp);
                }
                score.borrow_mut().caught = true;
                true
            }),
        );
    }
}

impl Application for ChaseApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        self.wall_clock.start();
        let config = GameConfig::load_or_default(&self.args.config);
        let level = self.load_level()?;
        let cell = level.cell_size();
        let mut game = Game::new(config, level);
        self.register_handlers(&mut game);

        // Stand-ins for the loaded models, sized to the grid
        game.on_player_geometry(&MeshData::cuboid(Vec3::new(0.6 * cell, cell, 0.6 * cell)))?;
        game.on_agent_geometry(&MeshData::cuboid(Vec3::new(0.6 * cell, cell, 0.6 * cell)))?;
        game.on_coin_geometry(&MeshData::cuboid(Vec3::new(0.4 * cell, 0.4 * cell, 0.1 * cell)))?;

        engine.push_event(AppEvent::PointerLocked);
        self.game = Some(game);
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
        let input = self.frame_input();
        let game = self
            .game
            .as_mut()
            .ok_or_else(|| AppError::GameLogic("update before initialize".to_string()))?;

        game.tick(delta_time, engine.total_time(), &input);

        let score = self.score.borrow();
        if score.caught || score.cleared {
            engine.quit();
        }
        Ok(())
    }

    fn handle_event(&mut self, engine: &mut Engine, event: AppEvent) -> Result<(), AppError> {
        if let AppEvent::KeyInput { key, pressed } = event {
            if !self.held.handle_key(key, pressed) {
                log::debug!("Ignoring non-movement key {key:?}");
            }
        }
        if let Some(game) = &mut self.game {
            match event {
                AppEvent::PointerLocked => game.pointer_lock_acquired(),
                AppEvent::PointerUnlocked => game.pointer_lock_lost(),
                AppEvent::PointerMoved { dx, dy } => game.pointer_motion(dx, dy),
                AppEvent::KeyInput { .. } | AppEvent::CloseRequested => {}
            }
        }
        engine.handle_event(&event);
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        let score = self.score.borrow();
        let outcome = if score.cleared {
            "player collected every coin"
        } else if score.caught {
            "agent caught the player"
        } else {
            "time ran out"
        };
        log::info!(
            "Game over after {:.1}s: {outcome} ({} coins, {:.0} ms wall clock)",
            engine.total_time(),
            score.coins,
            self.wall_clock.elapsed_millis()
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_default("info");

    let args = Args::parse();
    log::info!("Starting Inverted Pac-Man demo with {args:?}");

    let config = EngineConfig { max_frames: Some(args.frames), ..EngineConfig::default() };
    let mut app = ChaseApp::new(args);
    if let Err(e) = Engine::run(config, &mut app) {
        log::error!("Demo failed: {e}");
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn args(list: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("inverted_pacman").chain(list.iter().copied()))
    }

    #[test]
    fn test_args_defaults_and_overrides() {
        let parsed = args(&[]).unwrap();
        assert_eq!(parsed.config, DEFAULT_CONFIG_PATH);
        assert_eq!(parsed.level, None);
        assert_eq!((parsed.frames, parsed.seed), (DEFAULT_FRAMES, DEFAULT_SEED));

        let parsed = args(&["--level", "levels/courtyard.ron", "--frames", "10", "--seed", "3"]).unwrap();
        assert_eq!(parsed.level.as_deref(), Some("levels/courtyard.ron"));
        assert_eq!((parsed.frames, parsed.seed), (10, 3));
    }

    #[test]
    fn test_args_errors() {
        assert_eq!(args(&["--bogus"]).unwrap_err().kind(), ErrorKind::UnknownArgument);
        assert!(args(&["--level"]).is_err());
        assert_eq!(args(&["--frames", "many"]).unwrap_err().kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_held_keys_take_over_from_wanderer() {
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        let mut app = ChaseApp::new(args(&["--seed", "11"]).unwrap());

        app.handle_event(&mut engine, AppEvent::KeyInput { key: KeyCode::W, pressed: true }).unwrap();
        app.handle_event(&mut engine, AppEvent::KeyInput { key: KeyCode::LeftShift, pressed: true })
            .unwrap();
        app.handle_event(&mut engine, AppEvent::KeyInput { key: KeyCode::Escape, pressed: true }).unwrap();
        for _ in 0..5 {
            let input = app.frame_input();
            assert!(input.keys.forward && input.keys.run);
            assert!(!input.keys.back && !input.keys.left && !input.keys.right);
            assert_eq!(input.pointer_delta, Vec2::zeros());
        }

        // Shift alone steers nowhere, so the wanderer is back in charge
        app.handle_event(&mut engine, AppEvent::KeyInput { key: KeyCode::W, pressed: false }).unwrap();
        let mut wanderer = Wanderer::new(11);
        for _ in 0..5 {
            assert_eq!(app.frame_input(), wanderer.next_input());
        }
    }

    #[test]
    fn test_demo_runs_to_completion() {
        let mut app = ChaseApp::new(args(&["--config", "does/not/exist.toml", "--frames", "300"]).unwrap());
        Engine::run(EngineConfig { max_frames: Some(300), ..EngineConfig::default() }, &mut app).unwrap();
        assert!(app.game.is_some());
    }
}
