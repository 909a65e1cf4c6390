//! Presentation bridge
//!
//! The display surface only reads from here. Interpolated positions are for
//! drawing and never flow back into the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{GameEvent, GamePhase, GameState, Rect};

/// Pulse decay per tick (multiplicative)
const PULSE_DECAY: f32 = 0.9;
/// Pulse levels below this snap to zero
const PULSE_FLOOR: f32 = 0.01;

/// Heads-up display state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    /// Game-over overlay (with the restart button) is showing
    pub game_over: bool,
    /// Island pulse level, 1.0 right after a hit, decaying to 0
    pub island_pulse: f32,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            score: 0,
            // Idle start shows the overlay so the player can press restart
            game_over: true,
            island_pulse: 0.0,
        }
    }
}

impl Hud {
    /// Fold one simulation event into the HUD
    pub fn on_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::IslandHit { score } => {
                self.score = score;
                self.island_pulse = 1.0;
            }
            GameEvent::GameOver { score } => {
                self.score = score;
                self.game_over = true;
            }
            GameEvent::Restarted => {
                self.score = 0;
                self.game_over = false;
                self.island_pulse = 0.0;
            }
            GameEvent::WallBounce | GameEvent::PaddleHit => {}
        }
    }

    /// Per-tick decay of transient effects
    pub fn decay(&mut self) {
        self.island_pulse *= PULSE_DECAY;
        if self.island_pulse < PULSE_FLOOR {
            self.island_pulse = 0.0;
        }
    }

    /// Restart button visibility
    pub fn can_restart(&self) -> bool {
        self.game_over
    }
}

/// Everything a display surface needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderFrame {
    /// Ball box top-left published on the previous tick
    pub ball_from: Vec2,
    /// Ball box top-left published on the latest tick
    pub ball_to: Vec2,
    pub ball_diameter: f32,
    /// Fraction of the current tick period already elapsed (0..1)
    pub alpha: f32,
    /// Ball is drawn only while running
    pub ball_visible: bool,
    /// Restart button is shown
    pub restart_visible: bool,
    pub paddle: Rect,
    pub island: Rect,
    pub hud: Hud,
}

impl RenderFrame {
    pub fn build(state: &GameState, hud: &Hud, alpha: f32) -> Self {
        Self {
            ball_from: state.ball.prev_pos,
            ball_to: state.ball.pos,
            ball_diameter: state.ball.diameter,
            alpha: alpha.clamp(0.0, 1.0),
            ball_visible: state.phase == GamePhase::Running,
            restart_visible: hud.can_restart(),
            paddle: state.paddle.rect,
            island: state.island,
            hud: hud.clone(),
        }
    }

    /// Linear interpolation between the last two published positions
    pub fn ball_display_pos(&self) -> Vec2 {
        self.ball_from.lerp(self.ball_to, self.alpha)
    }

    /// Island box scaled up by the current pulse (up to 30% larger)
    pub fn island_display_rect(&self) -> Rect {
        let scale = 1.0 + 0.3 * self.hud.island_pulse;
        let width = self.island.width * scale;
        let height = self.island.height * scale;
        let center = self.island.center();
        Rect::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_follows_events() {
        let mut hud = Hud::default();
        assert!(hud.can_restart());

        hud.on_event(GameEvent::Restarted);
        assert!(!hud.game_over);
        assert_eq!(hud.score, 0);

        hud.on_event(GameEvent::IslandHit { score: 1 });
        assert_eq!(hud.score, 1);
        assert_eq!(hud.island_pulse, 1.0);

        hud.on_event(GameEvent::PaddleHit);
        hud.on_event(GameEvent::GameOver { score: 1 });
        assert!(hud.game_over);
        assert_eq!(hud.score, 1);
    }

    #[test]
    fn test_pulse_decays_to_zero() {
        let mut hud = Hud::default();
        hud.on_event(GameEvent::IslandHit { score: 1 });
        hud.decay();
        assert!((hud.island_pulse - 0.9).abs() < 1e-6);
        for _ in 0..100 {
            hud.decay();
        }
        assert_eq!(hud.island_pulse, 0.0);
    }

    #[test]
    fn test_display_interpolation() {
        let mut state = GameState::with_defaults(1, 400.0, 800.0);
        state.restart();
        state.ball.prev_pos = Vec2::new(100.0, 100.0);
        state.ball.pos = Vec2::new(120.0, 80.0);

        let frame = RenderFrame::build(&state, &Hud::default(), 0.25);
        assert_eq!(frame.ball_display_pos(), Vec2::new(105.0, 95.0));
        assert!(frame.ball_visible);
        // Default HUD is still the idle overlay
        assert!(frame.restart_visible);

        let frame = RenderFrame::build(&state, &Hud::default(), 7.0);
        assert_eq!(frame.alpha, 1.0);
        assert_eq!(frame.ball_display_pos(), state.ball.pos);
    }

    #[test]
    fn test_island_pulse_grows_about_center() {
        let state = GameState::with_defaults(1, 400.0, 800.0);
        let mut hud = Hud::default();
        hud.on_event(GameEvent::IslandHit { score: 1 });

        let frame = RenderFrame::build(&state, &hud, 0.0);
        let rect = frame.island_display_rect();
        assert!((rect.width - 127.0 * 1.3).abs() < 1e-3);
        assert!((rect.center() - state.island.center()).length() < 1e-3);
        assert!(!frame.ball_visible);
        assert!(frame.restart_visible);
    }

    #[test]
    fn test_frame_serializes() {
        let state = GameState::with_defaults(1, 400.0, 800.0);
        let frame = RenderFrame::build(&state, &Hud::default(), 0.0);
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"island_pulse\""));
    }
}
