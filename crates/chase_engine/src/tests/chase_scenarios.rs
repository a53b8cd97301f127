//! End-to-end chase scenarios driven through the game session

use crate::core::config::GameConfig;
use crate::events::{BodyKind, EventType, GameEvent};
use crate::foundation::math::{Vec2, Vec3};
use crate::game::{FrameInput, Game};
use crate::input::MovementKeys;
use crate::level::{Level, LevelLayout};
use crate::physics::MeshData;

const DT: f32 = 1.0 / 60.0;

fn game_on(cell_size: f32, rows: &[&str]) -> Game {
    let level = Level::build(&LevelLayout::new("scenario", cell_size, rows)).unwrap();
    Game::new(GameConfig::default(), level)
}

fn cube(size: f32) -> MeshData {
    MeshData::cuboid(Vec3::new(size, size, size))
}

fn keys(forward: bool, left: bool, right: bool) -> FrameInput {
    FrameInput::from(MovementKeys { forward, left, right, ..MovementKeys::default() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_player_slides_along_wall() {
        let mut game = game_on(2.0, &["#######", "#..P..#", "#.....#", "#A....#", "#######"]);
        game.on_player_geometry(&cube(1.0)).unwrap();

        // Forward-left runs diagonally into the top wall
        let input = keys(true, true, false);
        for tick in 0..5 {
            game.tick(0.1, tick as f32 * 0.1, &input);
        }

        let step = 0.6 * std::f32::consts::FRAC_1_SQRT_2;
        let position = game.player().position();
        assert_relative_eq!(position.z, 2.0 - step, epsilon = 1e-3);
        assert_relative_eq!(position.x, 6.0 - 5.0 * step, epsilon = 1e-3);
    }

    #[test]
    fn test_camera_stays_in_front_of_walls() {
        let mut game = game_on(5.0, &["###", "#P#", "#.#", "#A#", "###"]);
        game.on_player_geometry(&cube(1.0)).unwrap();
        game.tick(DT, DT, &FrameInput::default());

        // Back wall face at z = 17.5, pivot at z = 5: hit at 12.5 is not closer
        // than the nominal 12 so the camera stays out
        assert_relative_eq!(game.camera().distance(), 12.0);

        let mut game = game_on(5.0, &["###", "#P#", "#A#", "###"]);
        game.on_player_geometry(&cube(1.0)).unwrap();
        game.tick(DT, DT, &FrameInput::default());
        // Back wall face at z = 12.5: 7.5 from the pivot, minus clearance
        assert_relative_eq!(game.camera().distance(), 6.5, epsilon = 1e-4);
        assert!(game.camera().position().z < 12.5);
    }

    #[test]
    fn test_coin_waits_for_geometry_then_collects() {
        let mut game = game_on(1.0, &["######", "#Po.A#", "######"]);
        game.on_player_geometry(&MeshData::cuboid(Vec3::new(0.5, 4.0, 0.5))).unwrap();
        game.tick(0.0, 0.0, &FrameInput::default());
        game.drain_events();

        // Walk right through the coin before it has geometry
        let right = keys(false, false, true);
        game.tick(0.1, 0.0, &right);
        assert_eq!(game.coins_remaining(), 1);
        assert!(game.drain_events().is_empty());

        game.on_coin_geometry(&cube(0.5)).unwrap();
        game.tick(0.01, 0.0, &FrameInput::default());

        let events: Vec<_> = game.drain_events().into_iter().map(|event| event.payload).collect();
        assert_eq!(
            events,
            vec![
                GameEvent::BodyReady { body: BodyKind::Coin(0) },
                GameEvent::CoinCollected { coin: 0, remaining: 0 },
                GameEvent::AllCoinsCollected,
            ]
        );
        assert!(game.coins()[0].is_collected());
    }

    #[test]
    fn test_pointer_loss_freezes_camera() {
        let mut game = game_on(2.0, &["#####", "#P.A#", "#####"]);
        game.on_player_geometry(&cube(1.0)).unwrap();

        game.pointer_lock_acquired();
        let look = FrameInput { pointer_delta: Vec2::new(-120.0, 0.0), ..FrameInput::default() };
        game.tick(0.1, 0.1, &look);
        let yaw = game.camera().yaw();
        assert_relative_eq!(yaw, 3.0, epsilon = 1e-4);

        game.pointer_lock_lost();
        game.tick(0.1, 0.2, &look);
        assert_relative_eq!(game.camera().yaw(), yaw);

        let kinds: Vec<_> = game.drain_events().iter().map(|event| event.event_type()).collect();
        assert!(kinds.contains(&EventType::CameraResumed));
        assert_eq!(kinds.last(), Some(&EventType::CameraPaused));
    }

    #[test]
    fn test_agent_catches_idle_player() {
        let mut game = game_on(1.0, &["#########", "#P.....A#", "#########"]);
        game.on_player_geometry(&cube(0.8)).unwrap();
        game.on_agent_geometry(&cube(0.8)).unwrap();

        let start_gap = (game.agent().position() - game.player().position()).magnitude();
        let mut caught_at = None;
        for tick in 0..120 {
            game.tick(DT, tick as f32 * DT, &FrameInput::default());
            let caught = game
                .drain_events()
                .iter()
                .any(|event| event.event_type() == EventType::PlayerAgentCollision);
            if caught {
                caught_at = Some(tick);
                break;
            }
        }

        // Six cells at eight units per second is well under a second
        let tick = caught_at.unwrap_or_else(|| panic!("agent never reached the player"));
        assert!(tick < 60);
        assert!((game.agent().position() - game.player().position()).magnitude() < start_gap);
        assert!(game.is_player_caught());
    }

    #[test]
    fn test_agent_turns_corners_in_courtyard() {
        let mut game = Game::new(GameConfig::default(), Level::build(&LevelLayout::default()).unwrap());
        let cell = game.level().cell_size();
        game.on_player_geometry(&cube(0.6 * cell)).unwrap();
        game.on_agent_geometry(&cube(0.6 * cell)).unwrap();

        let mut caught = false;
        for tick in 0..600 {
            game.tick(DT, tick as f32 * DT, &FrameInput::default());
            if game.is_player_caught() {
                caught = true;
                break;
            }
        }
        assert!(caught, "agent stuck at {:?}", game.agent().position());
    }
}
