//! Projectiles fired by the player and the alien

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Collider, collides};
use super::geometry::{Dimension, from_polar, wrap};
use super::timer::Timer;
use crate::consts::*;

/// Which bullet sprite to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletKind {
    /// Player shots
    Small,
    /// Alien shots
    Large,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub kind: BulletKind,
    pos: Vec2,
    vel: Vec2,
    heading: f32,
    timer: Timer,
    /// Set once the bullet has hit something; never cleared
    direct_hit: bool,
}

impl Bullet {
    pub fn new(kind: BulletKind, pos: Vec2, heading: f32) -> Self {
        Self {
            kind,
            pos,
            vel: from_polar(heading, BULLET_SPEED),
            heading,
            timer: Timer::new(BULLET_LIFETIME),
            direct_hit: false,
        }
    }

    /// Move one tick along the fixed heading
    pub fn update(&mut self, field: &Dimension) {
        self.timer.update();
        if !self.is_expired() {
            self.pos += self.vel;
            self.pos = wrap(self.pos, Vec2::splat(BULLET_HALF_EXTENT), field);
        }
    }

    pub fn is_expired(&self) -> bool {
        self.direct_hit || self.timer.is_ready()
    }

    pub fn has_hit(&self) -> bool {
        self.direct_hit
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Whether this bullet can still register a hit
    pub fn is_live(&self) -> bool {
        !self.direct_hit && self.timer.percent_complete() < BULLET_HIT_CUTOFF
    }

    /// Test against a target and, on contact, spend the bullet.
    ///
    /// Returns true at most once over the bullet's lifetime.
    pub fn try_hit<C: Collider + ?Sized>(&mut self, target: &C) -> bool {
        if !self.is_live() || !collides(self, target) {
            return false;
        }
        self.direct_hit = true;
        true
    }

    /// Opacity for rendering; fades out over the last quarter of its life
    pub fn alpha(&self) -> f32 {
        let done = self.timer.percent_complete();
        if done > BULLET_FADE_START {
            (1.0 - done) / (1.0 - BULLET_FADE_START)
        } else {
            1.0
        }
    }
}

impl Collider for Bullet {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> f32 {
        BULLET_RADIUS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::timer::duration_to_ticks;

    struct Target(Vec2);

    impl Collider for Target {
        fn position(&self) -> Vec2 {
            self.0
        }
        fn size(&self) -> f32 {
            10.0
        }
    }

    fn field() -> Dimension {
        Dimension::new(FIELD_WIDTH, FIELD_HEIGHT)
    }

    #[test]
    fn test_bullet_moves_in_straight_line() {
        let mut bullet = Bullet::new(BulletKind::Small, Vec2::new(100.0, 100.0), 0.0);
        bullet.update(&field());
        bullet.update(&field());
        let pos = bullet.position();
        assert!((pos.x - (100.0 + 2.0 * BULLET_SPEED)).abs() < 1e-4);
        assert!((pos.y - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_bullet_wraps_to_opposite_edge() {
        let field = field();
        let mut bullet = Bullet::new(
            BulletKind::Large,
            Vec2::new(field.width + BULLET_HALF_EXTENT - 1.0, 200.0),
            0.0,
        );
        bullet.update(&field);
        assert_eq!(bullet.position().x, -BULLET_HALF_EXTENT);
        assert!((bullet.position().y - 200.0).abs() < 1e-4);

        // Keeps flying in from the left
        bullet.update(&field);
        assert!((bullet.position().x - (BULLET_SPEED - BULLET_HALF_EXTENT)).abs() < 1e-4);
        assert!(!bullet.is_expired());
    }

    #[test]
    fn test_bullet_expires_after_lifetime() {
        let mut bullet = Bullet::new(BulletKind::Large, Vec2::new(100.0, 100.0), 1.0);
        let ticks = duration_to_ticks(BULLET_LIFETIME);
        for _ in 0..ticks - 1 {
            bullet.update(&field());
        }
        assert!(!bullet.is_expired());
        bullet.update(&field());
        assert!(bullet.is_expired());
    }

    #[test]
    fn test_direct_hit_only_counts_once() {
        let mut bullet = Bullet::new(BulletKind::Small, Vec2::new(100.0, 100.0), 0.0);
        let target = Target(Vec2::new(105.0, 100.0));
        assert!(bullet.try_hit(&target));
        assert!(bullet.has_hit());
        assert!(bullet.is_expired());
        assert!(!bullet.try_hit(&target));
    }

    #[test]
    fn test_late_bullet_cannot_hit() {
        let mut bullet = Bullet::new(BulletKind::Small, Vec2::new(100.0, 100.0), 0.0);
        let ticks = duration_to_ticks(BULLET_LIFETIME);
        let cutoff = (ticks as f32 * BULLET_HIT_CUTOFF).ceil() as u32;
        for _ in 0..cutoff {
            bullet.update(&field());
        }
        let target = Target(bullet.position());
        assert!(!bullet.is_live());
        assert!(!bullet.try_hit(&target));
        assert!(!bullet.has_hit());
    }

    #[test]
    fn test_fade_starts_at_three_quarters() {
        let mut bullet = Bullet::new(BulletKind::Small, Vec2::new(100.0, 100.0), 0.0);
        assert_eq!(bullet.alpha(), 1.0);
        let ticks = duration_to_ticks(BULLET_LIFETIME);
        for _ in 0..(ticks * 9 / 10) {
            bullet.update(&field());
        }
        assert!(bullet.alpha() < 1.0);
        assert!(bullet.alpha() > 0.0);
    }
}
