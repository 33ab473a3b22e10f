//! Rock Belt - an asteroid-field arcade simulation
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (entities, collisions, scoring, levels)
//! - `settings`: Per-run configuration loaded from JSON

pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{EventSink, Frame, GameEvent, SimError, TickInput, TickOutcome, World, tick};

use glam::Vec2;

/// Game configuration constants
///
/// Speeds and rates are expressed per tick; durations are wall-clock and get
/// converted to ticks by [`sim::Timer`].
pub mod consts {
    use std::f32::consts::PI;
    use std::time::Duration;

    /// Fixed simulation rate every timer is derived from
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Default play-field size
    pub const FIELD_WIDTH: f32 = 1024.0;
    pub const FIELD_HEIGHT: f32 = 768.0;

    /// Player ship
    pub const SHIP_HALF_WIDTH: f32 = 48.0;
    pub const SHIP_HALF_HEIGHT: f32 = 32.0;
    pub const SHIP_RADIUS: f32 = SHIP_HALF_HEIGHT * 0.75;
    pub const SHIP_MAX_SPEED: f32 = 5.0;
    pub const SHIP_THRUST: f32 = 0.2;
    /// Half a turn per second
    pub const SHIP_TURN_RATE: f32 = PI / TICKS_PER_SECOND as f32;
    /// Distance ahead of the ship centre where bullets appear
    pub const SHIP_NOSE_OFFSET: f32 = 40.0;
    pub const SHIP_SALVO: usize = 3;
    pub const SHIP_ACCURACY: f32 = 1.0;
    pub const SHIP_COOLDOWN: Duration = Duration::from_millis(100);
    pub const DYING_DURATION: Duration = Duration::from_secs(2);
    pub const INVULNERABLE_DURATION: Duration = Duration::from_secs(3);

    /// Invulnerability mode trades accuracy for volume of fire
    pub const RAPID_SALVO: usize = 200;
    pub const RAPID_ACCURACY: f32 = 0.6;
    pub const RAPID_COOLDOWN: Duration = Duration::from_millis(50);

    /// Spin applied to a dying craft (1.5 turns per second)
    pub const DEATH_SPIN_RATE: f32 = 3.0 * PI / TICKS_PER_SECOND as f32;

    /// Alien saucer
    pub const ALIEN_HALF_WIDTH: f32 = 48.0;
    pub const ALIEN_HALF_HEIGHT: f32 = 40.0;
    pub const ALIEN_RADIUS: f32 = ALIEN_HALF_HEIGHT * 0.75;
    pub const ALIEN_THRUST: f32 = 0.3;
    pub const ALIEN_THRUST_CHANCE: f64 = 0.7;
    /// Width of the per-tick random heading perturbation
    pub const ALIEN_WANDER: f32 = 0.6;
    pub const ALIEN_ACCURACY: f32 = 0.8;
    pub const ALIEN_VALUE: u32 = 1000;
    pub const ALIEN_MUZZLE_OFFSET: f32 = 60.0;
    pub const ALIEN_RESPAWN_DURATION: Duration = Duration::from_secs(30);
    pub const ALIEN_FIRST_SHOT: Duration = Duration::from_secs(5);
    pub const ALIEN_COOLDOWN_MIN: Duration = Duration::from_secs(1);
    pub const ALIEN_COOLDOWN_MAX: Duration = Duration::from_secs(8);

    /// Asteroids
    pub const ASTEROID_MAX_SPEED: f32 = 2.0;
    /// Width of the random rotation range, centred on zero
    pub const ASTEROID_SPIN: f32 = 0.05;
    pub const ASTEROID_VARIANTS: u8 = 3;
    /// Collision radius as a fraction of sprite half-height
    pub const ASTEROID_RADIUS_FACTOR: f32 = 0.7;

    /// Bullets
    pub const BULLET_SPEED: f32 = 480.0 / TICKS_PER_SECOND as f32;
    pub const BULLET_HALF_EXTENT: f32 = 16.0;
    pub const BULLET_RADIUS: f32 = BULLET_HALF_EXTENT * 0.5;
    pub const BULLET_LIFETIME: Duration = Duration::from_secs(3);
    pub const BULLET_FADE_START: f32 = 0.75;
    /// Past this fraction of its lifetime a bullet can no longer hit
    pub const BULLET_HIT_CUTOFF: f32 = 0.9;

    /// Level banner drifts upward while it fades
    pub const BANNER_DURATION: Duration = Duration::from_secs(3);
    pub const BANNER_DRIFT: f32 = 0.4;

    /// Spawns must land further than this fraction of the field height
    /// from the player
    pub const SAFE_SPAWN_FRACTION: f32 = 1.0 / 3.0;
}

/// Normalize an angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
