//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Input arrives as intents, applied between ticks
//! - No rendering or platform dependencies

pub mod collision;
pub mod intent;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{
    BounceAxis, WallContact, ball_rect_collision, ball_wall_contact, bounce_axis, flip,
};
pub use intent::{Intent, apply_intent};
pub use rect::Rect;
pub use state::{Arena, Ball, GameEvent, GamePhase, GameState, Paddle, random_direction};
pub use tick::tick;
