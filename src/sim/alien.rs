//! The alien saucer
//!
//! Hidden for a long respawn delay, then wanders the field taking pot
//! shots at the player. Shot down, it spins out and goes back into hiding.

use std::collections::BTreeMap;
use std::time::Duration;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bullet::{Bullet, BulletKind};
use super::collision::Collider;
use super::events::{EventSink, GameEvent};
use super::geometry::{Dimension, accelerate, angle_to, from_polar, wrap};
use super::timer::{Sequence, Timer};
use crate::consts::*;
use crate::normalize_angle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlienState {
    /// Waiting for the respawn timer; not drawn, not collidable
    Hidden,
    Flying,
    /// Spinning in place after being shot
    Dying,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Phase {
    Hidden,
    Flying,
    Dying(Timer),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alien {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Direction of travel; wanders every tick
    pub direction: f32,
    /// Visual orientation; only changes while spinning out
    pub orientation: f32,
    pub respawn: Timer,
    /// Live bullets keyed by entity id
    pub bullets: BTreeMap<u64, Bullet>,
    phase: Phase,
    cooldown: Timer,
    salvo: usize,
}

impl Alien {
    /// A saucer that will appear at `pos` once its respawn delay runs out
    pub fn new(pos: Vec2, salvo: usize) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            direction: 0.0,
            orientation: 0.0,
            respawn: Timer::new(ALIEN_RESPAWN_DURATION),
            bullets: BTreeMap::new(),
            phase: Phase::Hidden,
            cooldown: Timer::new(ALIEN_FIRST_SHOT),
            salvo,
        }
    }

    pub fn state(&self) -> AlienState {
        match self.phase {
            Phase::Hidden => AlienState::Hidden,
            Phase::Flying => AlienState::Flying,
            Phase::Dying(_) => AlienState::Dying,
        }
    }

    pub fn is_alive(&self) -> bool {
        matches!(self.phase, Phase::Flying)
    }

    pub fn salvo(&self) -> usize {
        self.salvo
    }

    /// Live bullets in id order
    pub fn bullets(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.values()
    }

    /// Points for shooting it down
    pub fn value(&self) -> u32 {
        ALIEN_VALUE
    }

    /// Skip the rest of the respawn delay
    pub fn reveal(&mut self) {
        self.respawn.finish();
        self.phase = Phase::Flying;
    }

    /// Advance one tick. `target` is where the player is this tick.
    pub fn update<R: Rng>(
        &mut self,
        target: Vec2,
        field: &Dimension,
        seq: &mut Sequence,
        rng: &mut R,
        events: &mut dyn EventSink,
    ) {
        for bullet in self.bullets.values_mut() {
            bullet.update(field);
        }
        self.bullets.retain(|_, bullet| !bullet.is_expired());

        match self.phase {
            Phase::Hidden => {
                self.respawn.update();
                if self.respawn.is_ready() {
                    self.phase = Phase::Flying;
                    log::debug!("Alien appeared at {:?}", self.pos);
                }
            }
            Phase::Flying => {
                self.wander(rng);
                self.shoot(target, seq, rng, events);
                self.pos += self.vel;
                self.pos = wrap(
                    self.pos,
                    Vec2::new(ALIEN_HALF_WIDTH, ALIEN_HALF_HEIGHT),
                    field,
                );
            }
            Phase::Dying(ref mut timer) => {
                self.orientation = normalize_angle(self.orientation + DEATH_SPIN_RATE);
                timer.update();
                if timer.is_ready() {
                    self.phase = Phase::Hidden;
                    self.orientation = 0.0;
                    self.respawn.reset();
                }
            }
        }
    }

    fn wander<R: Rng>(&mut self, rng: &mut R) {
        self.direction =
            normalize_angle(self.direction + (rng.random::<f32>() - 0.5) * ALIEN_WANDER);
        if rng.random_bool(ALIEN_THRUST_CHANCE) {
            self.vel = accelerate(self.vel, from_polar(self.direction, ALIEN_THRUST), SHIP_MAX_SPEED);
        }
    }

    fn shoot<R: Rng>(
        &mut self,
        target: Vec2,
        seq: &mut Sequence,
        rng: &mut R,
        events: &mut dyn EventSink,
    ) {
        self.cooldown.update();
        if !self.cooldown.is_ready() || self.bullets.len() >= self.salvo {
            return;
        }
        self.cooldown.reset_target(random_cooldown(rng));

        let jitter = (rng.random::<f32>() - 0.5) * (1.0 - ALIEN_ACCURACY);
        let aim = angle_to(self.pos, target) + jitter;
        let muzzle = self.pos + from_polar(aim, ALIEN_MUZZLE_OFFSET);
        self.bullets
            .insert(seq.next(), Bullet::new(BulletKind::Large, muzzle, aim));
        events.emit(GameEvent::AlienFired);
    }

    /// Shoot the saucer down. Only a flying saucer can be killed.
    pub fn kill(&mut self, events: &mut dyn EventSink) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.phase = Phase::Dying(Timer::new(DYING_DURATION));
        self.vel = Vec2::ZERO;
        events.emit(GameEvent::AlienDestroyed);
        log::debug!("Alien destroyed at {:?}", self.pos);
        true
    }

    pub fn alpha(&self) -> f32 {
        match &self.phase {
            Phase::Hidden => 0.0,
            Phase::Flying => 1.0,
            Phase::Dying(timer) => 1.0 - timer.percent_complete(),
        }
    }
}

/// Uniform pick between the minimum and maximum re-arm delays
fn random_cooldown<R: Rng>(rng: &mut R) -> Duration {
    let min = ALIEN_COOLDOWN_MIN.as_millis() as u64;
    let max = ALIEN_COOLDOWN_MAX.as_millis() as u64;
    Duration::from_millis(rng.random_range(min..max))
}

impl Collider for Alien {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> f32 {
        ALIEN_RADIUS
    }
}
