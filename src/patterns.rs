//! Movement strategies for regular enemies.
//!
//! A pattern is plain data: the position it yields depends only on the
//! enemy's spawn anchor and its own elapsed-tick counter, so any number of
//! enemies can share the same parameters without sharing state.

use glam::Vec2;

use crate::constants::FIELD_WIDTH;

#[derive(Clone, Debug, PartialEq)]
pub enum MovementPattern {
    /// Constant descent with a sinusoidal horizontal offset.
    SineWave {
        amplitude: f32,
        frequency: f32,
        speed: f32,
    },
    /// Constant descent; the horizontal step flips every `switch_time` ticks.
    ZigZag {
        speed: f32,
        step: f32,
        switch_time: u32,
    },
    /// Orbit around an anchor that itself descends.
    Circular {
        radius: f32,
        angular_speed: f32,
        descent: f32,
    },
    /// Straight dive, diagonal dive, then a diagonal climb back out.
    Swoop {
        from_left: bool,
        speed: f32,
        dive_until: u32,
        turn_at: u32,
    },
    /// Sideways sweep with slow descent, reflecting at the field margins.
    HorizontalWave {
        velocity: f32,
        descent: f32,
        margin: f32,
    },
}

impl MovementPattern {
    pub fn position_at(&self, anchor: Vec2, tick: u32) -> Vec2 {
        let t = tick as f32;
        match *self {
            MovementPattern::SineWave {
                amplitude,
                frequency,
                speed,
            } => Vec2::new(
                anchor.x + amplitude * (t * frequency).sin(),
                anchor.y + speed * t,
            ),
            MovementPattern::ZigZag {
                speed,
                step,
                switch_time,
            } => {
                let offset = triangle_offset(tick, switch_time.max(1)) * step;
                Vec2::new(anchor.x + offset, anchor.y + speed * t)
            }
            MovementPattern::Circular {
                radius,
                angular_speed,
                descent,
            } => {
                let angle = t * angular_speed;
                Vec2::new(
                    anchor.x + radius * angle.cos(),
                    anchor.y + descent * t + radius * angle.sin(),
                )
            }
            MovementPattern::Swoop {
                from_left,
                speed,
                dive_until,
                turn_at,
            } => {
                let sign = if from_left { 1.0 } else { -1.0 };
                let turn_at = turn_at.max(dive_until);
                let dive = tick.min(dive_until) as f32;
                let diagonal = tick.clamp(dive_until, turn_at).saturating_sub(dive_until) as f32;
                let climb = tick.saturating_sub(turn_at) as f32;
                // Diagonal legs move at `speed` along both axes.
                let x = anchor.x + sign * speed * (diagonal + climb);
                let y = anchor.y + speed * (dive + diagonal) - speed * climb;
                Vec2::new(x, y)
            }
            MovementPattern::HorizontalWave {
                velocity,
                descent,
                margin,
            } => {
                let x = reflect(anchor.x + velocity * t, margin, FIELD_WIDTH - margin);
                Vec2::new(x, anchor.y + descent * t)
            }
        }
    }
}

/// Net number of steps taken after `tick` ticks when the direction flips
/// every `period` ticks, starting towards +x.
fn triangle_offset(tick: u32, period: u32) -> f32 {
    let leg = tick / period;
    let within = (tick % period) as f32;
    if leg % 2 == 0 {
        within
    } else {
        period as f32 - within
    }
}

/// Fold an unbounded coordinate into `[low, high]` as if it bounced off
/// both ends.
fn reflect(value: f32, low: f32, high: f32) -> f32 {
    let span = high - low;
    if span <= 0.0 {
        return low;
    }
    let period = span * 2.0;
    let folded = (value - low).rem_euclid(period);
    if folded <= span {
        low + folded
    } else {
        high - (folded - span)
    }
}
