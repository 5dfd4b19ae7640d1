//! Axis-aligned boxes and the handful of vector helpers the simulation needs.

use glam::Vec2;

use crate::constants::{FIELD_HEIGHT, FIELD_WIDTH};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap; boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// True once the box lies entirely outside the play field on any side.
    pub fn is_off_field(&self) -> bool {
        self.max.x < 0.0
            || self.min.x > FIELD_WIDTH
            || self.max.y < 0.0
            || self.min.y > FIELD_HEIGHT
    }

    /// True once the box lies entirely below the bottom of the play field.
    pub fn is_below_field(&self) -> bool {
        self.min.y > FIELD_HEIGHT
    }
}

/// Unit vector from `from` towards `to`.
///
/// A zero-length offset is treated as distance 1 so the result is the raw
/// offset (zero) rather than NaN.
pub fn aim(from: Vec2, to: Vec2) -> Vec2 {
    let offset = to - from;
    let distance = offset.length();
    let distance = if distance == 0.0 { 1.0 } else { distance };
    offset / distance
}

/// Unit vector for an angle measured in degrees clockwise from straight down.
pub fn direction_from_down(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(-radians.sin(), radians.cos())
}

/// Rotate `v` by `degrees` (screen coordinates, y down).
pub fn rotate(v: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

pub fn clamp_to_field(pos: Vec2, size: Vec2) -> Vec2 {
    let half = size * 0.5;
    Vec2::new(
        pos.x.clamp(half.x, FIELD_WIDTH - half.x),
        pos.y.clamp(half.y, FIELD_HEIGHT - half.y),
    )
}

pub fn vec(size: (f32, f32)) -> Vec2 {
    Vec2::new(size.0, size.1)
}
