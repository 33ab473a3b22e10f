//! Planar helpers on top of `glam::Vec2`
//!
//! Addition, scaling, length and distances come straight from glam. This
//! module adds the pieces glam doesn't have: polar construction with the
//! field's heading convention, a normalized angle query, and toroidal
//! edge wrapping.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{normalize_angle, polar_to_cartesian};

/// Play-field size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub width: f32,
    pub height: f32,
}

impl Dimension {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn centre(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Vector of length `magnitude` pointing along `direction` (radians)
#[inline]
pub fn from_polar(direction: f32, magnitude: f32) -> Vec2 {
    polar_to_cartesian(magnitude, direction)
}

/// Heading from `from` towards `to`, in [0, 2π)
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    normalize_angle(delta.y.atan2(delta.x))
}

/// Add `delta` to `velocity` and rescale the result so its length never
/// exceeds `max_speed`. Direction is preserved.
pub fn accelerate(velocity: Vec2, delta: Vec2, max_speed: f32) -> Vec2 {
    let next = velocity + delta;
    let speed = next.length();
    if speed > max_speed {
        next * (max_speed / speed)
    } else {
        next
    }
}

/// Teleport a centre position that has fully left the field to just
/// outside the opposite edge. Positions still overlapping the field are
/// left alone, so applying this twice is the same as applying it once.
pub fn wrap(position: Vec2, half_extents: Vec2, field: &Dimension) -> Vec2 {
    let mut wrapped = position;

    if position.x + half_extents.x < 0.0 {
        wrapped.x = field.width + half_extents.x;
    } else if position.x - half_extents.x > field.width {
        wrapped.x = -half_extents.x;
    }

    if position.y + half_extents.y < 0.0 {
        wrapped.y = field.height + half_extents.y;
    } else if position.y - half_extents.y > field.height {
        wrapped.y = -half_extents.y;
    }

    wrapped
}
