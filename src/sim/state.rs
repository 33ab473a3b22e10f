//! World state
//!
//! Owns every entity collection plus the shared identifier sequence and
//! RNG. [`tick`](super::tick) is the only thing that advances it.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::alien::Alien;
use super::asteroid::{Asteroid, spawn_belt};
use super::banner::LevelBanner;
use super::error::SimError;
use super::geometry::Dimension;
use super::player::Player;
use super::timer::Sequence;
use crate::consts::SAFE_SPAWN_FRACTION;
use crate::settings::Settings;

/// Whether the world is advancing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Paused,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub settings: Settings,
    pub field: Dimension,
    /// Current level, starting at 1
    pub level: u32,
    pub phase: GamePhase,
    pub player: Player,
    pub alien: Alien,
    /// Live asteroids keyed by entity id
    pub asteroids: BTreeMap<u64, Asteroid>,
    pub banner: LevelBanner,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) seq: Sequence,
    pub(crate) rng: Pcg32,
}

impl World {
    /// Build a world at level 1 from validated settings
    pub fn new(settings: Settings) -> Result<Self, SimError> {
        settings.validate()?;
        let field = settings.field();
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("New world {}x{} with seed {}", field.width, field.height, seed);

        let mut rng = Pcg32::seed_from_u64(seed);
        let mut seq = Sequence::new();
        let player = Player::new(&field, settings.starting_lives, settings.extra_life_threshold);
        let asteroids = spawn_belt(settings.belt_base + 1, &mut seq, &mut rng, |rng| {
            safe_spawn_point(player.pos, &field, rng)
        });
        let alien = Alien::new(
            safe_spawn_point(player.pos, &field, &mut rng),
            alien_salvo(&settings, 1),
        );

        Ok(Self {
            banner: LevelBanner::new(1, &field),
            settings,
            field,
            level: 1,
            phase: GamePhase::Playing,
            player,
            alien,
            asteroids,
            time_ticks: 0,
            seq,
            rng,
        })
    }

    /// Allocate a new entity id
    pub fn next_entity_id(&mut self) -> u64 {
        self.seq.next()
    }

    pub fn is_game_over(&self) -> bool {
        self.player.is_game_over()
    }

    /// Move on to the next level: fresh belt and alien, player re-armed
    pub fn advance_level(&mut self) {
        self.level += 1;
        self.player.prepare();
        self.populate();
        log::info!(
            "Level {}: {} asteroids, alien salvo {}",
            self.level,
            self.asteroids.len(),
            self.alien.salvo()
        );
    }

    /// Start over from level 1 with a new player. The RNG stream and id
    /// sequence carry on.
    pub fn restart(&mut self) {
        self.player = Player::new(
            &self.field,
            self.settings.starting_lives,
            self.settings.extra_life_threshold,
        );
        self.level = 1;
        self.phase = GamePhase::Playing;
        self.populate();
        log::info!("Game restarted");
    }

    /// Spawn the belt and alien for the current level, away from the player
    fn populate(&mut self) {
        let field = self.field;
        let player_pos = self.player.pos;
        self.asteroids = spawn_belt(
            self.settings.belt_base + self.level,
            &mut self.seq,
            &mut self.rng,
            |rng| safe_spawn_point(player_pos, &field, rng),
        );
        self.alien = Alien::new(
            safe_spawn_point(player_pos, &field, &mut self.rng),
            alien_salvo(&self.settings, self.level),
        );
        self.banner = LevelBanner::new(self.level, &field);
    }
}

fn alien_salvo(settings: &Settings, level: u32) -> usize {
    (settings.alien_salvo_base + level) as usize
}

/// Uniform random point that is not too close to `avoid`.
///
/// Rejection sampling with no iteration cap; the exclusion disc covers only
/// a fraction of the field so it ends after a handful of draws.
pub fn safe_spawn_point<R: Rng>(avoid: Vec2, field: &Dimension, rng: &mut R) -> Vec2 {
    let min_dist = field.height * SAFE_SPAWN_FRACTION;
    loop {
        let candidate = Vec2::new(
            rng.random::<f32>() * field.width,
            rng.random::<f32>() * field.height,
        );
        if candidate.distance_squared(avoid) > min_dist * min_dist {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Collider;

    fn world() -> World {
        World::new(Settings::default().with_seed(12345)).expect("default settings are valid")
    }

    #[test]
    fn test_new_world_level_one() {
        let world = world();
        assert_eq!(world.level, 1);
        assert_eq!(world.asteroids.len(), 4);
        assert_eq!(world.alien.salvo(), 4);
        assert_eq!(world.player.lives, 3);
        assert!(!world.is_game_over());
    }

    #[test]
    fn test_spawns_keep_clear_of_player() {
        let world = world();
        let min_dist = world.field.height * SAFE_SPAWN_FRACTION;
        for rock in world.asteroids.values() {
            assert!(rock.position().distance(world.player.pos) > min_dist);
        }
        assert!(world.alien.pos.distance(world.player.pos) > min_dist);
    }

    #[test]
    fn test_ids_never_repeat_across_levels() {
        let mut world = world();
        let first: Vec<u64> = world.asteroids.keys().copied().collect();
        world.advance_level();
        assert_eq!(world.level, 2);
        assert_eq!(world.asteroids.len(), 5);
        assert!(world.asteroids.keys().all(|id| !first.contains(id)));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            starting_lives: 0,
            ..Settings::default()
        };
        assert!(matches!(World::new(settings), Err(SimError::NoStartingLives)));
    }

    #[test]
    fn test_restart_resets_progress() {
        let mut world = world();
        world.advance_level();
        world.player.score = 500;
        world.restart();
        assert_eq!(world.level, 1);
        assert_eq!(world.player.score, 0);
        assert_eq!(world.asteroids.len(), 4);
    }
}
