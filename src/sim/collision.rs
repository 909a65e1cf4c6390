//! Collision detection and bounce response
//!
//! Everything is an axis-aligned box: the ball is tested as the square of side
//! `diameter` at its candidate position. A bounce negates one component of the
//! direction, so its length never changes.

use glam::Vec2;

use super::rect::Rect;
use super::state::Arena;

/// Which direction component a bounce negates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceAxis {
    /// Side hit: negate x
    Horizontal,
    /// Top/bottom hit: negate y
    Vertical,
}

/// Walls touched by a candidate ball box
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    /// Past the top or the floor line
    pub vertical: bool,
    /// Past the left or right wall
    pub horizontal: bool,
    /// Past the floor line - the ball escaped
    pub floor: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.vertical || self.horizontal
    }
}

/// Check a candidate top-left ball position against the arena bounds
pub fn ball_wall_contact(candidate: Vec2, diameter: f32, arena: &Arena) -> WallContact {
    let floor_line = arena.height - diameter;
    let right_line = arena.width - diameter;
    let floor = candidate.y > floor_line;

    WallContact {
        vertical: candidate.y < 0.0 || floor,
        horizontal: candidate.x < 0.0 || candidate.x > right_line,
        floor,
    }
}

/// Choose the bounce axis from the ball's pre-move x
///
/// A ball that was beside the rectangle bounces sideways; one that was over or
/// under its horizontal span bounces vertically.
pub fn bounce_axis(current_x: f32, rect: &Rect) -> BounceAxis {
    if rect.spans_x(current_x) {
        BounceAxis::Vertical
    } else {
        BounceAxis::Horizontal
    }
}

/// Check a candidate ball box against a rectangle
///
/// Returns the axis to flip on overlap. A single overlap yields a single
/// response no matter how many edges are crossed.
pub fn ball_rect_collision(
    candidate: Vec2,
    diameter: f32,
    current_x: f32,
    rect: &Rect,
) -> Option<BounceAxis> {
    let ball_box = Rect::square(candidate, diameter);
    if ball_box.overlaps(rect) {
        Some(bounce_axis(current_x, rect))
    } else {
        None
    }
}

/// Negate the direction component for `axis`
#[inline]
pub fn flip(direction: Vec2, axis: BounceAxis) -> Vec2 {
    match axis {
        BounceAxis::Horizontal => Vec2::new(-direction.x, direction.y),
        BounceAxis::Vertical => Vec2::new(direction.x, -direction.y),
    }
}
