//! Game state and core simulation types
//!
//! A single `GameState` holds everything the loop mutates. It is created once
//! and reset in place on restart.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::sanitize_extent;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball in flight, ticks advance the simulation
    Running,
    /// Session ended (also the idle state before the first start)
    GameOver,
}

/// Something that happened during a tick, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off one or more arena walls
    WallBounce,
    /// Ball hit the island; carries the new score
    IslandHit { score: u64 },
    /// Ball hit the paddle
    PaddleHit,
    /// Ball escaped past the floor line
    GameOver { score: u64 },
    /// Session reset and running
    Restarted,
}

/// Arena bounds, measured from the window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    /// Build arena bounds, clamping unusable extents
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner of the ball's box (authoritative)
    pub pos: Vec2,
    /// Position published on the previous tick, for display interpolation
    pub prev_pos: Vec2,
    /// Unit heading
    pub dir: Vec2,
    pub diameter: f32,
}

impl Ball {
    pub fn new(pos: Vec2, dir: Vec2, diameter: f32) -> Self {
        Self {
            pos,
            prev_pos: pos,
            dir,
            diameter,
        }
    }

    /// Position after one tick along `dir`
    #[inline]
    pub fn step_from(&self, dir: Vec2, speed: f32) -> Vec2 {
        self.pos + dir * speed
    }

    /// Place the ball without animating from its old position
    pub fn place(&mut self, pos: Vec2, dir: Vec2) {
        self.pos = pos;
        self.prev_pos = pos;
        self.dir = dir;
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    /// Drag origin: the x the paddle sits at with zero translation
    pub base_x: f32,
}

impl Paddle {
    /// Paddle at its resting place for `arena`
    pub fn new(arena: &Arena, tuning: &Tuning) -> Self {
        let mut paddle = Self {
            rect: Rect::new(0.0, 0.0, 0.0, tuning.paddle_height),
            base_x: 0.0,
        };
        paddle.measure(arena, tuning);
        paddle.rect.pos.x = paddle.base_x;
        paddle
    }

    /// Re-derive width, base offset and height line from arena size
    pub fn measure(&mut self, arena: &Arena, tuning: &Tuning) {
        self.rect.width = arena.width * tuning.paddle_width_fraction;
        self.rect.height = tuning.paddle_height;
        self.rect.pos.y = arena.height - tuning.paddle_bottom_offset;
        self.base_x = arena.width * tuning.paddle_base_fraction;
    }

    /// Follow a drag: x tracks the gesture's horizontal translation
    pub fn drag_to(&mut self, translation_x: f32, arena: &Arena, tuning: &Tuning) {
        self.rect.pos.x = translation_x + self.base_x;
        self.rect.pos.y = arena.height - tuning.paddle_bottom_offset;
    }

    /// Settle after a drag: keep the paddle fully inside the arena
    pub fn settle(&mut self, arena: &Arena) {
        let max_x = (arena.width - self.rect.width).max(0.0);
        let x = self.rect.pos.x;
        self.rect.pos.x = if x.is_finite() { x.clamp(0.0, max_x) } else { 0.0 };
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Direction RNG
    rng: Pcg32,
    pub tuning: Tuning,
    pub arena: Arena,
    /// Stationary obstacle
    pub island: Rect,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Island hits this session
    pub score: u64,
    pub phase: GamePhase,
    /// Simulation tick counter (this session)
    pub time_ticks: u64,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game (phase `GameOver`) for an arena of the given size
    pub fn new(seed: u64, width: f32, height: f32, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let arena = Arena::new(width, height);
        let mut rng = Pcg32::seed_from_u64(seed);
        let dir = random_direction(&mut rng);

        Self {
            seed,
            rng,
            island: tuning.island.to_rect(),
            ball: Ball::new(arena.center(), dir, tuning.ball_diameter),
            paddle: Paddle::new(&arena, &tuning),
            arena,
            tuning,
            score: 0,
            phase: GamePhase::GameOver,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Idle game with default tuning
    pub fn with_defaults(seed: u64, width: f32, height: f32) -> Self {
        Self::new(seed, width, height, Tuning::default())
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Reset score and ball, then start running
    pub fn restart(&mut self) {
        let dir = random_direction(&mut self.rng);
        self.ball.place(self.arena.center(), dir);
        self.score = 0;
        self.time_ticks = 0;
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Restarted);
        log::info!(
            "Restarted: ball at ({:.1}, {:.1}) heading ({:.3}, {:.3})",
            self.ball.pos.x,
            self.ball.pos.y,
            dir.x,
            dir.y
        );
    }

    /// Apply a new window measurement
    pub fn resize(&mut self, width: f32, height: f32) {
        self.arena = Arena::new(width, height);
        self.paddle.measure(&self.arena, &self.tuning);
        log::debug!(
            "Arena resized to {}x{}, paddle width {}",
            self.arena.width,
            self.arena.height,
            self.paddle.rect.width
        );
    }

    /// Take all events since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Uniformly random unit heading
///
/// Built from an angle so there is no zero-length vector to normalize.
pub fn random_direction(rng: &mut Pcg32) -> Vec2 {
    let theta = rng.random_range(0.0..std::f32::consts::TAU);
    Vec2::from_angle(theta)
}
