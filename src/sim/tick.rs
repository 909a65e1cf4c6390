//! Fixed timestep simulation tick
//!
//! Advances the ball by exactly one step per call.

use super::collision::{BounceAxis, ball_rect_collision, ball_wall_contact, flip};
use super::state::{GameEvent, GamePhase, GameState};

/// Advance the game state by one fixed timestep
///
/// Checks run in a fixed order (walls, island, paddle) and each one edits the
/// direction left by the previous one, so two flips of the same axis in one
/// tick cancel out. All checks test the same candidate position; the final
/// position is stepped from the pre-tick position along the final direction.
pub fn tick(state: &mut GameState) {
    if !state.is_running() {
        return;
    }

    state.time_ticks += 1;

    let speed = state.tuning.ball_speed;
    let diameter = state.ball.diameter;
    let origin = state.ball.pos;
    let candidate = state.ball.step_from(state.ball.dir, speed);
    let mut dir = state.ball.dir;

    // Walls
    let walls = ball_wall_contact(candidate, diameter, &state.arena);
    if walls.floor {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!(
            "Game over after {} ticks, score {}",
            state.time_ticks,
            state.score
        );
    }
    if walls.vertical {
        dir = flip(dir, BounceAxis::Vertical);
    }
    if walls.horizontal {
        dir = flip(dir, BounceAxis::Horizontal);
    }
    if walls.any() {
        state.events.push(GameEvent::WallBounce);
    }

    // Island
    if let Some(axis) = ball_rect_collision(candidate, diameter, origin.x, &state.island) {
        dir = flip(dir, axis);
        state.score += 1;
        state.events.push(GameEvent::IslandHit { score: state.score });
        log::debug!("Island hit ({:?}), score {}", axis, state.score);
    }

    // Paddle, at whatever position the last drag left it
    if let Some(axis) = ball_rect_collision(candidate, diameter, origin.x, &state.paddle.rect) {
        dir = flip(dir, axis);
        state.events.push(GameEvent::PaddleHit);
        log::debug!("Paddle hit ({:?})", axis);
    }

    state.ball.dir = dir;
    state.ball.prev_pos = origin;
    state.ball.pos = state.ball.step_from(dir, speed);
}
