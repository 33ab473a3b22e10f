//! Drifting rocks and their fragmentation rules

use std::collections::BTreeMap;
use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Collider;
use super::geometry::{Dimension, from_polar, wrap};
use super::timer::Sequence;
use crate::consts::*;

/// Size class, which fixes value, radius and what an explosion leaves behind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    /// Points for destroying one; smaller rocks are worth more
    pub fn value(self) -> u32 {
        match self {
            AsteroidSize::Large => 10,
            AsteroidSize::Medium => 25,
            AsteroidSize::Small => 50,
        }
    }

    /// Half of the sprite's width and height
    pub fn half_extents(self) -> Vec2 {
        match self {
            AsteroidSize::Large => Vec2::new(80.0, 80.0),
            AsteroidSize::Medium => Vec2::new(40.0, 48.0),
            AsteroidSize::Small => Vec2::new(32.0, 32.0),
        }
    }

    pub fn radius(self) -> f32 {
        self.half_extents().y * ASTEROID_RADIUS_FACTOR
    }

    /// Size mix for a fresh belt: half large, 30% medium, 20% small
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        match rng.random_range(0..10) {
            0..5 => AsteroidSize::Large,
            5..8 => AsteroidSize::Medium,
            _ => AsteroidSize::Small,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub size: AsteroidSize,
    /// Which of the sprite variants to draw
    pub variant: u8,
    pos: Vec2,
    vel: Vec2,
    /// Visual orientation
    heading: f32,
    /// Radians per tick
    rotation: f32,
    exploded: bool,
}

impl Asteroid {
    /// A rock at `pos` with random heading, speed, spin and sprite
    pub fn new<R: Rng>(size: AsteroidSize, pos: Vec2, rng: &mut R) -> Self {
        let direction = rng.random::<f32>() * TAU;
        let speed = rng.random::<f32>() * ASTEROID_MAX_SPEED;
        Self {
            size,
            variant: rng.random_range(0..ASTEROID_VARIANTS),
            pos,
            vel: from_polar(direction, speed),
            heading: 0.0,
            rotation: (rng.random::<f32>() - 0.5) * ASTEROID_SPIN,
            exploded: false,
        }
    }

    pub fn update(&mut self, field: &Dimension) {
        self.heading += self.rotation;
        self.pos += self.vel;
        self.pos = wrap(self.pos, self.size.half_extents(), field);
    }

    pub fn is_exploded(&self) -> bool {
        self.exploded
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    pub fn value(&self) -> u32 {
        self.size.value()
    }

    /// Mark this rock for removal and return the fragments it breaks into.
    ///
    /// Large: 1-2 medium plus up to 3 minus that many small.
    /// Medium: 2-3 small. Small: nothing.
    pub fn explode<R: Rng>(&mut self, rng: &mut R) -> Vec<Asteroid> {
        self.exploded = true;
        let mut fragments = Vec::new();
        match self.size {
            AsteroidSize::Large => {
                let medium = rng.random_range(1..=2);
                let small = rng.random_range(0..4 - medium);
                self.spawn_fragments(AsteroidSize::Medium, medium, rng, &mut fragments);
                self.spawn_fragments(AsteroidSize::Small, small, rng, &mut fragments);
            }
            AsteroidSize::Medium => {
                let small = rng.random_range(2..=3);
                self.spawn_fragments(AsteroidSize::Small, small, rng, &mut fragments);
            }
            AsteroidSize::Small => {}
        }
        fragments
    }

    fn spawn_fragments<R: Rng>(
        &self,
        size: AsteroidSize,
        count: usize,
        rng: &mut R,
        out: &mut Vec<Asteroid>,
    ) {
        out.extend((0..count).map(|_| Asteroid::new(size, self.pos, rng)));
    }
}

impl Collider for Asteroid {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> f32 {
        self.size.radius()
    }
}

/// Scatter `count` rocks of random size around the field, each placed by
/// `place`
pub fn spawn_belt<R, F>(
    count: u32,
    seq: &mut Sequence,
    rng: &mut R,
    mut place: F,
) -> BTreeMap<u64, Asteroid>
where
    R: Rng,
    F: FnMut(&mut R) -> Vec2,
{
    (0..count)
        .map(|_| {
            let size = AsteroidSize::random(rng);
            let pos = place(rng);
            (seq.next(), Asteroid::new(size, pos, rng))
        })
        .collect()
}
