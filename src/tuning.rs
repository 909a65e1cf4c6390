//! Data-driven game constants
//!
//! Defaults reproduce the fixed constants in [`crate::consts`]. A JSON file
//! may override any subset of them; missing keys keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Rect;

/// Island rectangle as it appears in tuning files
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectSpec {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl RectSpec {
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// Game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Ticks per second
    pub tick_rate_hz: f32,
    /// Ball travel per tick
    pub ball_speed: f32,
    /// Ball diameter
    pub ball_diameter: f32,
    /// Stationary obstacle near the top of the arena
    pub island: RectSpec,

    // === Paddle ===
    pub paddle_height: f32,
    /// Paddle top edge sits this far above the arena bottom
    pub paddle_bottom_offset: f32,
    /// Paddle width as a fraction of arena width
    pub paddle_width_fraction: f32,
    /// Drag origin as a fraction of arena width
    pub paddle_base_fraction: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_rate_hz: TICK_RATE_HZ,
            ball_speed: BALL_SPEED,
            ball_diameter: BALL_DIAMETER,
            island: RectSpec {
                x: ISLAND_X,
                y: ISLAND_Y,
                w: ISLAND_WIDTH,
                h: ISLAND_HEIGHT,
            },
            paddle_height: PADDLE_HEIGHT,
            paddle_bottom_offset: PADDLE_BOTTOM_OFFSET,
            paddle_width_fraction: PADDLE_WIDTH_FRACTION,
            paddle_base_fraction: PADDLE_BASE_FRACTION,
        }
    }
}

impl Tuning {
    /// Fixed tick period in seconds
    pub fn tick_period(&self) -> f32 {
        1.0 / self.tick_rate_hz
    }

    /// Parse tuning from JSON (unsanitized)
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Read and parse a tuning file, sanitizing the result
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        Ok(tuning.sanitized())
    }

    /// Load tuning from a file, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Failed to load tuning from {}: {}", path.display(), e);
                log::info!("Using default tuning");
                Self::default()
            }
        }
    }

    /// Replace non-physical values with their defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        fn positive(value: f32, fallback: f32, name: &str) -> f32 {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                log::warn!(
                    "Tuning {} = {} is not positive, using {}",
                    name,
                    value,
                    fallback
                );
                fallback
            }
        }

        self.tick_rate_hz = positive(self.tick_rate_hz, defaults.tick_rate_hz, "tick_rate_hz");
        self.ball_speed = positive(self.ball_speed, defaults.ball_speed, "ball_speed");
        self.ball_diameter = positive(self.ball_diameter, defaults.ball_diameter, "ball_diameter");
        self.paddle_height = positive(self.paddle_height, defaults.paddle_height, "paddle_height");

        // Fractions must leave the paddle inside the arena
        if !(self.paddle_width_fraction > 0.0 && self.paddle_width_fraction <= 1.0) {
            log::warn!(
                "Tuning paddle_width_fraction = {} out of (0, 1], using {}",
                self.paddle_width_fraction,
                defaults.paddle_width_fraction
            );
            self.paddle_width_fraction = defaults.paddle_width_fraction;
        }
        if !self.paddle_base_fraction.is_finite() {
            self.paddle_base_fraction = defaults.paddle_base_fraction;
        }
        if !self.paddle_bottom_offset.is_finite() {
            self.paddle_bottom_offset = defaults.paddle_bottom_offset;
        }

        let island = self.island;
        if ![island.x, island.y, island.w, island.h].iter().all(|v| v.is_finite())
            || island.w < 0.0
            || island.h < 0.0
        {
            log::warn!("Tuning island {:?} is malformed, using default", island);
            self.island = defaults.island;
        }

        self
    }
}
