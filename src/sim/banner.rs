//! "LEVEL n" banner shown at the start of each level

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Dimension;
use super::timer::Timer;
use crate::consts::{BANNER_DRIFT, BANNER_DURATION};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelBanner {
    pub level: u32,
    pub pos: Vec2,
    timer: Timer,
}

impl LevelBanner {
    pub fn new(level: u32, field: &Dimension) -> Self {
        Self {
            level,
            pos: field.centre(),
            timer: Timer::new(BANNER_DURATION),
        }
    }

    /// Drift upward until the timer runs out
    pub fn update(&mut self) {
        self.timer.update();
        if !self.is_expired() {
            self.pos.y -= BANNER_DRIFT;
        }
    }

    pub fn is_expired(&self) -> bool {
        self.timer.is_ready()
    }

    pub fn text(&self) -> String {
        format!("LEVEL {}", self.level)
    }

    pub fn alpha(&self) -> f32 {
        1.0 - self.timer.percent_complete()
    }
}
