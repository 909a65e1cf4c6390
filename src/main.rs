//! Island Bounce entry point
//!
//! Runs a headless session: an autopilot drags the paddle under the ball while
//! the driver ticks in simulated time. Prints the last frame as JSON.
//!
//! Usage: `island-bounce [seconds] [tuning.json]`

use std::path::Path;

use island_bounce::sim::Intent;
use island_bounce::{LoopDriver, Tuning};

/// Phone-sized portrait arena
const ARENA_WIDTH: f32 = 390.0;
const ARENA_HEIGHT: f32 = 844.0;
/// Display refresh the session is paced at
const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_SECONDS: f32 = 30.0;

fn main() {
    env_logger::init();
    log::info!("Island Bounce (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seconds = match args.next() {
        Some(arg) => arg.parse::<f32>().unwrap_or_else(|_| {
            log::warn!(
                "Ignoring bad duration {:?}, using {}s",
                arg,
                DEFAULT_SECONDS
            );
            DEFAULT_SECONDS
        }),
        None => DEFAULT_SECONDS,
    };
    let tuning = match args.next() {
        Some(path) => Tuning::load(Path::new(&path)),
        None => Tuning::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut driver = LoopDriver::new(seed, ARENA_WIDTH, ARENA_HEIGHT, tuning);
    driver.restart();

    let frames = (seconds.max(0.0) / FRAME_DT) as u64;
    let mut ticks = 0u64;
    let mut dragging = false;

    for _ in 0..frames {
        if let Some(intent) = autopilot(&driver, &mut dragging) {
            driver.submit(intent);
        }
        ticks += u64::from(driver.advance(FRAME_DT));

        if driver.hud().game_over {
            break;
        }
    }

    log::info!(
        "Session finished: {} ticks, score {}, game over: {}",
        ticks,
        driver.hud().score,
        driver.hud().game_over
    );

    match serde_json::to_string_pretty(&driver.frame()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to encode frame: {}", e),
    }
}

/// Keep the paddle centred under the ball; release the drag on the way up
fn autopilot(driver: &LoopDriver, dragging: &mut bool) -> Option<Intent> {
    let state = driver.state();
    let ball = &state.ball;
    let paddle = &state.paddle;

    if ball.dir.y > 0.0 {
        let target_x = ball.pos.x + ball.diameter / 2.0 - paddle.rect.width / 2.0;
        *dragging = true;
        Some(Intent::DragUpdate {
            translation_x: target_x - paddle.base_x,
        })
    } else if *dragging {
        *dragging = false;
        Some(Intent::DragEnd)
    } else {
        None
    }
}
