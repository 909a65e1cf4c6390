//! Fixed timestep loop driver
//!
//! Owns the game state. Callers feed it elapsed wall time and queue intents;
//! the driver applies intents, runs whole ticks at the tick rate and keeps the
//! HUD in step with simulation events.

use std::collections::VecDeque;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};
use crate::sim::{GamePhase, GameState, Intent, apply_intent, tick};
use crate::tuning::Tuning;
use crate::ui::{Hud, RenderFrame};

/// Handle for the repeating tick task
///
/// Exists only while the game is running; dropping it is the cancellation.
#[derive(Debug, Clone)]
struct RepeatingTask {
    /// Tick period (seconds)
    period: f32,
    /// Time carried toward the next tick (seconds)
    accumulator: f32,
    /// Ticks fired since the task started
    fired: u64,
}

impl RepeatingTask {
    fn new(period: f32) -> Self {
        Self {
            period,
            accumulator: 0.0,
            fired: 0,
        }
    }
}

/// Drives the simulation at a fixed rate
#[derive(Debug)]
pub struct LoopDriver {
    state: GameState,
    hud: Hud,
    intents: VecDeque<Intent>,
    task: Option<RepeatingTask>,
}

impl LoopDriver {
    /// Idle driver for an arena of the given size
    pub fn new(seed: u64, width: f32, height: f32, tuning: Tuning) -> Self {
        let state = GameState::new(seed, width, height, tuning);
        log::info!(
            "Driver ready: seed {}, arena {}x{}, {} Hz",
            state.seed,
            state.arena.width,
            state.arena.height,
            state.tuning.tick_rate_hz
        );
        Self {
            state,
            hud: Hud::default(),
            intents: VecDeque::new(),
            task: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    /// Whether the repeating tick task is scheduled
    pub fn is_ticking(&self) -> bool {
        self.task.is_some()
    }

    /// Queue an input for the next `advance`
    pub fn submit(&mut self, intent: Intent) {
        self.intents.push_back(intent);
    }

    /// Queue a restart (the game-over overlay's button)
    pub fn restart(&mut self) {
        self.submit(Intent::Restart);
    }

    /// Cancel the tick task without touching the game phase
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            log::info!("Tick task stopped after {} ticks", task.fired);
        }
    }

    /// Reschedule the tick task after `stop`, keeping score and ball
    ///
    /// No-op when already ticking or when the session has ended.
    pub fn resume(&mut self) {
        if self.task.is_none() && self.state.is_running() {
            self.task = Some(RepeatingTask::new(self.state.tuning.tick_period()));
            log::info!("Tick task resumed at score {}", self.state.score);
        }
    }

    /// Advance by `elapsed` seconds of wall time; returns ticks run
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.apply_intents();

        let Some(task) = self.task.as_mut() else {
            return 0;
        };

        let elapsed = if elapsed.is_finite() {
            elapsed.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        task.accumulator += elapsed;

        let mut substeps = 0;
        while substeps < MAX_SUBSTEPS {
            let Some(task) = self.task.as_mut() else {
                break;
            };
            if task.accumulator < task.period {
                break;
            }
            task.accumulator -= task.period;
            task.fired += 1;
            substeps += 1;

            tick(&mut self.state);
            self.hud.decay();
            self.pump_events();

            if !self.state.is_running() {
                self.stop();
            }
        }

        // Drop backlog the substep cap could not work off
        if substeps == MAX_SUBSTEPS {
            if let Some(task) = self.task.as_mut() {
                if task.accumulator >= task.period {
                    log::debug!(
                        "Dropping {:.4}s of tick backlog",
                        task.accumulator - task.accumulator % task.period
                    );
                    task.accumulator %= task.period;
                }
            }
        }

        substeps
    }

    /// Snapshot for the display surface
    pub fn frame(&self) -> RenderFrame {
        let alpha = self
            .task
            .as_ref()
            .map(|t| t.accumulator / t.period)
            .unwrap_or(1.0);
        RenderFrame::build(&self.state, &self.hud, alpha)
    }

    fn apply_intents(&mut self) {
        while let Some(intent) = self.intents.pop_front() {
            apply_intent(&mut self.state, intent);
            if intent == Intent::Restart {
                // A fresh task: no leftover time from the previous session
                self.task = Some(RepeatingTask::new(self.state.tuning.tick_period()));
            }
        }
        self.pump_events();
    }

    fn pump_events(&mut self) {
        for event in self.state.drain_events() {
            self.hud.on_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use glam::Vec2;

    fn driver() -> LoopDriver {
        LoopDriver::new(42, 400.0, 800.0, Tuning::default())
    }

    #[test]
    fn test_idle_until_restart() {
        let mut driver = driver();
        assert!(!driver.is_ticking());
        assert_eq!(driver.advance(1.0), 0);
        assert_eq!(driver.state().time_ticks, 0);
        assert!(driver.hud().game_over);

        driver.restart();
        assert_eq!(driver.advance(0.0), 0);
        assert!(driver.is_ticking());
        assert!(!driver.hud().game_over);
    }

    #[test]
    fn test_ticks_follow_elapsed_time() {
        let mut driver = driver();
        driver.restart();
        driver.advance(0.0);

        // Half a period: nothing yet
        assert_eq!(driver.advance(SIM_DT * 0.5), 0);
        // Completes the first period
        assert_eq!(driver.advance(SIM_DT * 0.6), 1);
        let frame = driver.frame();
        assert!(frame.alpha > 0.0 && frame.alpha < 0.2);
    }

    #[test]
    fn test_substeps_are_capped() {
        let mut driver = driver();
        driver.restart();
        // Long stall is clamped, then capped
        let ticks = driver.advance(10.0);
        assert!(ticks <= MAX_SUBSTEPS);
        // Leftover is below one period, and bad inputs add nothing
        assert_eq!(driver.advance(f32::NAN), 0);
        assert_eq!(driver.advance(-1.0), 0);
    }

    #[test]
    fn test_intents_apply_before_ticks() {
        let mut driver = driver();
        driver.restart();
        driver.advance(0.0);
        driver.state.ball.place(Vec2::new(20.0, 615.0), Vec2::new(0.0, 1.0));

        // Drag the paddle under the ball; it must be in place for this tick
        driver.submit(Intent::DragUpdate {
            translation_x: -100.0,
        });
        assert_eq!(driver.advance(SIM_DT), 1);
        let dir = driver.state().ball.dir;
        assert!((dir - Vec2::new(0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_game_over_cancels_task_and_restart_resumes() {
        let mut driver = driver();
        driver.restart();
        driver.advance(0.0);
        driver.state.ball.place(Vec2::new(190.0, 760.0), Vec2::new(0.0, 1.0));

        assert_eq!(driver.advance(SIM_DT * 3.0), 1);
        assert!(!driver.is_ticking());
        assert_eq!(driver.state().phase, GamePhase::GameOver);
        assert!(driver.hud().game_over);
        assert!(!driver.frame().ball_visible);

        // Nothing moves until restart
        let frozen = driver.state().ball.pos;
        driver.advance(SIM_DT * 3.0);
        assert_eq!(driver.state().ball.pos, frozen);

        driver.restart();
        driver.advance(0.0);
        assert!(driver.is_ticking());
        assert_eq!(driver.state().score, 0);
        assert_eq!(driver.state().ball.pos, Vec2::new(200.0, 400.0));
    }

    #[test]
    fn test_island_hit_pulses_hud() {
        let mut driver = driver();
        driver.restart();
        driver.advance(0.0);
        driver.state.ball.place(Vec2::new(110.0, 20.0), Vec2::new(1.0, 0.0));

        driver.advance(SIM_DT);
        assert_eq!(driver.hud().score, 1);
        // Pulse set by the event after this tick's decay
        assert_eq!(driver.hud().island_pulse, 1.0);

        driver.advance(SIM_DT);
        assert!(driver.hud().island_pulse < 1.0);
    }

    #[test]
    fn test_backlog_bounded_at_high_tick_rate() {
        let tuning = Tuning {
            tick_rate_hz: 240.0,
            ..Default::default()
        };
        // Tall arena so the ball stays in play for the whole run
        let mut driver = LoopDriver::new(42, 4000.0, 100000.0, tuning);
        driver.restart();
        driver.advance(0.0);

        for _ in 0..100 {
            assert_eq!(driver.advance(0.1), MAX_SUBSTEPS);
            let task = driver.task.as_ref().unwrap();
            assert!(task.accumulator < task.period);
        }
        assert!(driver.frame().alpha < 1.0);
    }

    #[test]
    fn test_resume_after_stop_keeps_score() {
        let mut driver = driver();
        driver.restart();
        driver.advance(0.0);
        driver.state.ball.place(Vec2::new(110.0, 20.0), Vec2::new(1.0, 0.0));
        driver.advance(SIM_DT);
        assert_eq!(driver.state().score, 1);

        driver.stop();
        driver.resume();
        assert!(driver.is_ticking());
        assert_eq!(driver.state().score, 1);
        assert_eq!(driver.advance(SIM_DT), 1);
    }

    #[test]
    fn test_resume_after_game_over_does_nothing() {
        let mut driver = driver();
        driver.resume();
        assert!(!driver.is_ticking());
    }

    #[test]
    fn test_stop_keeps_phase() {
        let mut driver = driver();
        driver.restart();
        driver.advance(0.0);
        driver.stop();
        assert!(!driver.is_ticking());
        assert_eq!(driver.state().phase, GamePhase::Running);
        assert_eq!(driver.advance(SIM_DT * 2.0), 0);
    }
}
