//! Input intents
//!
//! Gesture and UI handlers never touch `GameState` directly. They queue an
//! `Intent` and the driver applies it between ticks.

use serde::{Deserialize, Serialize};

use super::state::GameState;

/// A queued input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    /// Drag in progress; horizontal translation since the drag began
    DragUpdate { translation_x: f32 },
    /// Drag released
    DragEnd,
    /// Restart button
    Restart,
    /// New window measurement
    Resize { width: f32, height: f32 },
}

/// Apply one intent to the game state
///
/// Paddle intents apply in any phase; the paddle can be moved on the
/// game-over screen.
pub fn apply_intent(state: &mut GameState, intent: Intent) {
    match intent {
        Intent::DragUpdate { translation_x } => {
            state
                .paddle
                .drag_to(translation_x, &state.arena, &state.tuning);
        }
        Intent::DragEnd => {
            state.paddle.settle(&state.arena);
        }
        Intent::Restart => state.restart(),
        Intent::Resize { width, height } => state.resize(width, height),
    }
}
