//! The player's ship
//!
//! Life cycle: flying, hit, a two second death spin, then back at the
//! centre of the field with a short invulnerability window. Losing the last
//! life parks the ship in `GameOver` for good.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bullet::{Bullet, BulletKind};
use super::collision::Collider;
use super::events::{EventSink, GameEvent};
use super::geometry::{Dimension, accelerate, from_polar, wrap};
use super::tick::TickInput;
use super::timer::{Sequence, Timer};
use crate::consts::*;
use crate::normalize_angle;

/// Externally visible state of the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// Normal flight, can be killed
    Flying,
    /// Normal flight inside the post-respawn invulnerability window
    Respawning,
    /// Spinning out after a hit
    Dying,
    /// No lives left
    GameOver,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Phase {
    Alive,
    Dying(Timer),
    GameOver,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing, radians in [0, 2π)
    pub heading: f32,
    /// Thrust was applied this tick (selects the exhaust sprite)
    pub thrusting: bool,
    pub lives: u32,
    pub score: u32,
    /// Runs after every (re)spawn; the ship cannot die until it is ready
    pub invulnerable: Timer,
    /// Live bullets keyed by entity id
    pub bullets: BTreeMap<u64, Bullet>,
    phase: Phase,
    cooldown: Timer,
    extra_life_every: u32,
    /// Invulnerability mode: cannot die, fires fast and loose
    rapid_fire: bool,
    salvo: usize,
    accuracy: f32,
}

impl Player {
    /// A fresh ship at the centre of the field, inside its invulnerability
    /// window.
    ///
    /// # Panics
    ///
    /// Panics if `extra_life_every` is zero.
    pub fn new(field: &Dimension, lives: u32, extra_life_every: u32) -> Self {
        assert!(
            extra_life_every > 0,
            "extra-life threshold must be non-zero"
        );
        Self {
            pos: field.centre(),
            vel: Vec2::ZERO,
            heading: 0.0,
            thrusting: false,
            lives,
            score: 0,
            invulnerable: Timer::new(INVULNERABLE_DURATION),
            bullets: BTreeMap::new(),
            phase: Phase::Alive,
            cooldown: Timer::new(SHIP_COOLDOWN),
            extra_life_every,
            rapid_fire: false,
            salvo: SHIP_SALVO,
            accuracy: SHIP_ACCURACY,
        }
    }

    pub fn state(&self) -> PlayerState {
        match self.phase {
            Phase::GameOver => PlayerState::GameOver,
            Phase::Dying(_) => PlayerState::Dying,
            Phase::Alive if !self.invulnerable.is_ready() => PlayerState::Respawning,
            Phase::Alive => PlayerState::Flying,
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver)
    }

    pub fn is_dying(&self) -> bool {
        matches!(self.phase, Phase::Dying(_))
    }

    /// Flying (invulnerable or not), so projectiles and rocks can touch it
    pub fn is_present(&self) -> bool {
        matches!(self.phase, Phase::Alive)
    }

    pub fn is_invulnerable(&self) -> bool {
        self.rapid_fire || !self.invulnerable.is_ready()
    }

    pub fn is_rapid_fire(&self) -> bool {
        self.rapid_fire
    }

    /// Live bullets in id order
    pub fn bullets(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.values()
    }

    /// Advance one tick: own bullets first, then steering or death spin,
    /// then motion
    pub fn update<R: Rng>(
        &mut self,
        input: &TickInput,
        field: &Dimension,
        seq: &mut Sequence,
        rng: &mut R,
        events: &mut dyn EventSink,
    ) {
        if self.is_game_over() {
            return;
        }

        for bullet in self.bullets.values_mut() {
            bullet.update(field);
        }
        self.bullets.retain(|_, bullet| !bullet.is_expired());

        if input.toggle_invulnerable {
            self.toggle_rapid_fire();
        }

        let spun_out = if let Phase::Dying(ref mut timer) = self.phase {
            self.heading = normalize_angle(self.heading + DEATH_SPIN_RATE);
            timer.update();
            timer.is_ready()
        } else {
            self.steer(input);
            self.shoot(input, seq, rng, events);
            false
        };

        if spun_out {
            self.finish_dying(field, events);
            return;
        }

        self.invulnerable.update();
        self.pos += self.vel;
        self.pos = wrap(
            self.pos,
            Vec2::new(SHIP_HALF_WIDTH, SHIP_HALF_HEIGHT),
            field,
        );
    }

    fn steer(&mut self, input: &TickInput) {
        if input.rotate_left {
            self.heading = normalize_angle(self.heading - SHIP_TURN_RATE);
        } else if input.rotate_right {
            self.heading = normalize_angle(self.heading + SHIP_TURN_RATE);
        }

        self.thrusting = input.thrust;
        if self.thrusting {
            self.vel = accelerate(self.vel, from_polar(self.heading, SHIP_THRUST), SHIP_MAX_SPEED);
        }
    }

    fn shoot<R: Rng>(
        &mut self,
        input: &TickInput,
        seq: &mut Sequence,
        rng: &mut R,
        events: &mut dyn EventSink,
    ) {
        self.cooldown.update();
        if !input.fire || !self.cooldown.is_ready() || self.bullets.len() >= self.salvo {
            return;
        }
        self.cooldown.reset();

        let nose = self.pos + from_polar(self.heading, SHIP_NOSE_OFFSET);
        let jitter = (rng.random::<f32>() - 0.5) * (1.0 - self.accuracy);
        self.bullets
            .insert(seq.next(), Bullet::new(BulletKind::Small, nose, self.heading + jitter));
        events.emit(GameEvent::PlayerFired);
    }

    /// Flip invulnerability mode. While on, the ship cannot die, the
    /// cooldown is halved, the salvo cap is huge and aim gets sloppy.
    pub fn toggle_rapid_fire(&mut self) {
        self.rapid_fire = !self.rapid_fire;
        if self.rapid_fire {
            self.salvo = RAPID_SALVO;
            self.accuracy = RAPID_ACCURACY;
            self.cooldown.reset_target(RAPID_COOLDOWN);
        } else {
            self.salvo = SHIP_SALVO;
            self.accuracy = SHIP_ACCURACY;
            self.cooldown.reset_target(SHIP_COOLDOWN);
        }
        log::info!("Invulnerability mode: {}", self.rapid_fire);
    }

    /// Start the death spin. Returns false when the hit is ignored because
    /// the ship is invulnerable, already dying or out of lives.
    pub fn kill(&mut self, events: &mut dyn EventSink) -> bool {
        if !self.is_present() || self.is_invulnerable() {
            return false;
        }
        self.phase = Phase::Dying(Timer::new(DYING_DURATION));
        self.thrusting = false;
        events.emit(GameEvent::PlayerDestroyed);
        log::debug!("Player hit, {} lives before respawn", self.lives);
        true
    }

    fn finish_dying(&mut self, field: &Dimension, events: &mut dyn EventSink) {
        self.lives = self.lives.saturating_sub(1);
        self.bullets.clear();
        self.invulnerable.reset();

        if self.lives == 0 {
            self.phase = Phase::GameOver;
            events.emit(GameEvent::GameOver);
            log::info!("Game over with score {}", self.score);
            return;
        }

        self.phase = Phase::Alive;
        self.pos = field.centre();
        self.vel = Vec2::ZERO;
        self.heading = 0.0;
        events.emit(GameEvent::PlayerRespawned);
    }

    /// Re-arm for a new level: restart the invulnerability window without
    /// costing a life. A ship mid-death keeps dying.
    pub fn prepare(&mut self) {
        if self.is_present() {
            self.invulnerable.reset();
        }
    }

    /// Add points, granting an extra life whenever the score passes a
    /// multiple of the threshold.
    ///
    /// Crossing is detected by the remainder shrinking, so an award of a
    /// full threshold or more may grant fewer lives than thresholds passed.
    pub fn award(&mut self, value: u32, events: &mut dyn EventSink) -> bool {
        let before = self.score % self.extra_life_every;
        self.score = self.score.saturating_add(value);
        let after = self.score % self.extra_life_every;

        let crossed = after < before;
        if crossed {
            self.lives += 1;
            events.emit(GameEvent::ExtraLife);
            log::info!("Extra life at {} points", self.score);
        }
        crossed
    }

    /// Opacity for rendering: fades out while dying, fades in while
    /// invulnerable
    pub fn alpha(&self) -> f32 {
        match &self.phase {
            Phase::Dying(timer) => 1.0 - timer.percent_complete(),
            Phase::Alive if !self.invulnerable.is_ready() => self.invulnerable.percent_complete(),
            _ => 1.0,
        }
    }
}

impl Collider for Player {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> f32 {
        SHIP_RADIUS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::timer::duration_to_ticks;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct Rig {
        field: Dimension,
        seq: Sequence,
        rng: Pcg32,
        events: Vec<GameEvent>,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                field: Dimension::new(FIELD_WIDTH, FIELD_HEIGHT),
                seq: Sequence::new(),
                rng: Pcg32::seed_from_u64(42),
                events: Vec::new(),
            }
        }

        fn step(&mut self, player: &mut Player, input: &TickInput) {
            player.update(input, &self.field, &mut self.seq, &mut self.rng, &mut self.events);
        }
    }

    fn vulnerable_player(rig: &Rig) -> Player {
        let mut player = Player::new(&rig.field, 3, 10_000);
        player.invulnerable.finish();
        player
    }

    #[test]
    fn test_new_player_starts_invulnerable_at_centre() {
        let rig = Rig::new();
        let mut player = Player::new(&rig.field, 3, 10_000);
        assert_eq!(player.pos, rig.field.centre());
        assert_eq!(player.state(), PlayerState::Respawning);
        assert!(!player.kill(&mut Vec::<GameEvent>::new()));
    }

    #[test]
    #[should_panic(expected = "extra-life threshold must be non-zero")]
    fn test_zero_extra_life_threshold_rejected() {
        let rig = Rig::new();
        let _ = Player::new(&rig.field, 3, 0);
    }

    #[test]
    fn test_thrust_is_capped_by_rescaling() {
        let mut rig = Rig::new();
        let mut player = vulnerable_player(&rig);
        let input = TickInput {
            thrust: true,
            ..Default::default()
        };
        for _ in 0..200 {
            rig.step(&mut player, &input);
        }
        assert!((player.vel.length() - SHIP_MAX_SPEED).abs() < 1e-3);
        assert!(player.thrusting);
    }

    #[test]
    fn test_rotation_rate() {
        let mut rig = Rig::new();
        let mut player = vulnerable_player(&rig);
        let input = TickInput {
            rotate_right: true,
            ..Default::default()
        };
        rig.step(&mut player, &input);
        assert!((player.heading - SHIP_TURN_RATE).abs() < 1e-6);
    }

    #[test]
    fn test_fire_respects_cooldown_and_salvo() {
        let mut rig = Rig::new();
        let mut player = vulnerable_player(&rig);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        let cooldown = duration_to_ticks(SHIP_COOLDOWN);

        for _ in 0..cooldown - 1 {
            rig.step(&mut player, &fire);
        }
        assert!(player.bullets.is_empty());

        rig.step(&mut player, &fire);
        assert_eq!(player.bullets.len(), 1);

        for _ in 0..cooldown * 10 {
            rig.step(&mut player, &fire);
        }
        assert_eq!(player.bullets.len(), SHIP_SALVO);
        let fired = rig
            .events
            .iter()
            .filter(|e| **e == GameEvent::PlayerFired)
            .count();
        assert_eq!(fired, SHIP_SALVO);
    }

    #[test]
    fn test_death_cycle() {
        let mut rig = Rig::new();
        let mut player = vulnerable_player(&rig);
        player.pos = Vec2::new(50.0, 60.0);
        player.vel = Vec2::new(1.0, 1.0);
        player
            .bullets
            .insert(99, Bullet::new(BulletKind::Small, Vec2::new(10.0, 10.0), 0.0));

        assert!(player.kill(&mut rig.events));
        assert_eq!(player.state(), PlayerState::Dying);
        // Already dying, a second hit does nothing
        assert!(!player.kill(&mut rig.events));

        let idle = TickInput::default();
        for _ in 0..duration_to_ticks(DYING_DURATION) {
            rig.step(&mut player, &idle);
        }

        assert_eq!(player.state(), PlayerState::Respawning);
        assert_eq!(player.lives, 2);
        assert_eq!(player.pos, rig.field.centre());
        assert_eq!(player.vel, Vec2::ZERO);
        assert!(player.bullets.is_empty());
        assert!(rig.events.contains(&GameEvent::PlayerRespawned));
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut rig = Rig::new();
        let mut player = Player::new(&rig.field, 1, 10_000);
        player.invulnerable.finish();
        player.pos = Vec2::new(50.0, 60.0);
        assert!(player.kill(&mut rig.events));

        let idle = TickInput::default();
        for _ in 0..duration_to_ticks(DYING_DURATION) {
            rig.step(&mut player, &idle);
        }
        assert_eq!(player.state(), PlayerState::GameOver);
        assert_eq!(player.lives, 0);
        assert!(rig.events.contains(&GameEvent::GameOver));

        // Frozen from here on
        let pos = player.pos;
        rig.step(
            &mut player,
            &TickInput {
                thrust: true,
                ..Default::default()
            },
        );
        assert_eq!(player.pos, pos);
    }

    #[test]
    fn test_rapid_fire_holds_invulnerability() {
        let mut rig = Rig::new();
        let mut player = vulnerable_player(&rig);
        rig.step(
            &mut player,
            &TickInput {
                toggle_invulnerable: true,
                ..Default::default()
            },
        );
        assert!(player.is_rapid_fire());
        assert!(player.is_invulnerable());
        assert!(!player.kill(&mut rig.events));

        rig.step(
            &mut player,
            &TickInput {
                toggle_invulnerable: true,
                ..Default::default()
            },
        );
        assert!(!player.is_invulnerable());
        assert!(player.kill(&mut rig.events));
    }

    #[test]
    fn test_rapid_fire_shortens_cooldown_and_lifts_salvo_cap() {
        let mut rig = Rig::new();
        let mut player = vulnerable_player(&rig);
        player.toggle_rapid_fire();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };

        let cooldown = duration_to_ticks(RAPID_COOLDOWN);
        assert!(cooldown < duration_to_ticks(SHIP_COOLDOWN));
        for _ in 0..cooldown {
            rig.step(&mut player, &fire);
        }
        assert_eq!(player.bullets.len(), 1);

        for _ in 0..cooldown * (SHIP_SALVO as u32 + 2) {
            rig.step(&mut player, &fire);
        }
        assert!(player.bullets.len() > SHIP_SALVO);
    }

    #[test]
    fn test_rapid_fire_scatters_shots() {
        let mut rig = Rig::new();
        let mut player = vulnerable_player(&rig);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        let cooldown = duration_to_ticks(SHIP_COOLDOWN);
        for _ in 0..cooldown {
            rig.step(&mut player, &fire);
        }
        // Full accuracy: dead on the nose
        assert!(player.bullets().all(|b| b.heading() == player.heading));

        player.bullets.clear();
        player.toggle_rapid_fire();
        for _ in 0..duration_to_ticks(RAPID_COOLDOWN) * 20 {
            rig.step(&mut player, &fire);
        }
        let max_jitter = (1.0 - RAPID_ACCURACY) / 2.0;
        assert!(player.bullets().any(|b| b.heading() != player.heading));
        assert!(
            player
                .bullets()
                .all(|b| (b.heading() - player.heading).abs() <= max_jitter + 1e-6)
        );
    }

    #[test]
    fn test_extra_life_threshold() {
        let rig = Rig::new();
        let mut events: Vec<GameEvent> = Vec::new();
        let mut player = Player::new(&rig.field, 3, 10_000);
        player.score = 9_500;
        assert!(player.award(600, &mut events));
        assert_eq!(player.lives, 4);
        assert_eq!(player.score, 10_100);

        player.score = 100;
        assert!(!player.award(600, &mut events));
        assert_eq!(player.lives, 4);
        assert_eq!(events, vec![GameEvent::ExtraLife]);
    }

    #[test]
    fn test_prepare_restarts_invulnerability_without_cost() {
        let rig = Rig::new();
        let mut player = vulnerable_player(&rig);
        player.prepare();
        assert_eq!(player.state(), PlayerState::Respawning);
        assert_eq!(player.lives, 3);
    }
}
