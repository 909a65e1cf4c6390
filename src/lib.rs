//! Island Bounce - A single-ball arcade game
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (collisions, score, game state)
//! - `driver`: Scheduler that owns the state and runs ticks at the tick rate
//! - `ui`: Score/game-over bridge and render snapshots for a display surface
//! - `tuning`: Data-driven game constants

pub mod driver;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use driver::LoopDriver;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation tick rate (Hz)
    pub const TICK_RATE_HZ: f32 = 60.0;
    /// Fixed simulation timestep (seconds)
    pub const SIM_DT: f32 = 1.0 / TICK_RATE_HZ;
    /// Maximum ticks per `advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame gap the driver will catch up on (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Ball travel per tick (length units)
    pub const BALL_SPEED: f32 = 20.0;
    /// Ball diameter (its bounding box is a square of this side)
    pub const BALL_DIAMETER: f32 = 25.0;

    /// Island obstacle, top-left corner and size
    pub const ISLAND_X: f32 = 150.0;
    pub const ISLAND_Y: f32 = 11.0;
    pub const ISLAND_WIDTH: f32 = 127.0;
    pub const ISLAND_HEIGHT: f32 = 37.0;

    /// Paddle defaults - width and base offset are fractions of arena width
    pub const PADDLE_HEIGHT: f32 = 37.0;
    pub const PADDLE_BOTTOM_OFFSET: f32 = 150.0;
    pub const PADDLE_WIDTH_FRACTION: f32 = 0.5;
    pub const PADDLE_BASE_FRACTION: f32 = 0.25;

    /// Smallest arena extent accepted from a window measurement
    pub const MIN_ARENA_EXTENT: f32 = 1.0;
}

/// Clamp a measured extent to a finite positive value
///
/// Window sizes of zero, below zero or NaN would otherwise leak into the
/// paddle clamp range and the wall checks.
#[inline]
pub fn sanitize_extent(value: f32) -> f32 {
    if value.is_finite() && value >= consts::MIN_ARENA_EXTENT {
        value
    } else {
        log::warn!(
            "Arena extent {} is not usable, clamping to {}",
            value,
            consts::MIN_ARENA_EXTENT
        );
        consts::MIN_ARENA_EXTENT
    }
}
