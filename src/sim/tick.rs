//! Fixed timestep simulation tick
//!
//! Core game loop that advances the world by exactly one tick.

use std::f32::consts::PI;

use glam::Vec2;

use super::asteroid::Asteroid;
use super::collision::{Collider, collides};
use super::events::{EventSink, GameEvent};
use super::geometry::angle_to;
use super::state::{GamePhase, World};
use crate::normalize_angle;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub fire: bool,
    /// Flip invulnerability mode (edge-triggered)
    pub toggle_invulnerable: bool,
    /// Pause toggle (edge-triggered)
    pub pause: bool,
    /// Start a new game (edge-triggered)
    pub reset: bool,
    /// Ask the window collaborator to flip fullscreen (edge-triggered)
    pub toggle_fullscreen: bool,
    pub quit: bool,
    /// Demo mode - the ship flies itself
    pub autopilot: bool,
}

/// What the host should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Keep running, and flip fullscreen
    ToggleFullscreen,
    /// Stop the loop
    Quit,
}

/// Advance the world by one fixed timestep
pub fn tick(state: &mut World, input: &TickInput, events: &mut dyn EventSink) -> TickOutcome {
    if input.quit {
        log::info!("Quit requested at tick {}", state.time_ticks);
        return TickOutcome::Quit;
    }

    let outcome = if input.toggle_fullscreen {
        TickOutcome::ToggleFullscreen
    } else {
        TickOutcome::Continue
    };

    if input.reset {
        state.restart();
        events.emit(GameEvent::LevelStarted { level: state.level });
        return outcome;
    }

    if input.pause {
        state.phase = match state.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
        };
    }
    if state.phase == GamePhase::Paused {
        return outcome;
    }

    let mut input = input.clone();
    if input.autopilot {
        steer_autopilot(state, &mut input);
    }
    let input = &input;

    state.time_ticks += 1;
    state.banner.update();

    // 1. Rocks drift; last tick's casualties are pruned and paid out
    advance_asteroids(state, events);

    // 2. Player and its bullets
    let field = state.field;
    state
        .player
        .update(input, &field, &mut state.seq, &mut state.rng, events);

    // 3. Everything that can hit something
    resolve_collisions(state, events);

    // 4. Alien takes aim at where the player is now
    let target = state.player.pos;
    state
        .alien
        .update(target, &field, &mut state.seq, &mut state.rng, events);

    // 5. Field cleared
    if state.asteroids.is_empty() {
        state.advance_level();
        events.emit(GameEvent::LevelStarted { level: state.level });
    }

    outcome
}

fn advance_asteroids(state: &mut World, events: &mut dyn EventSink) {
    let field = state.field;
    let mut spent = Vec::new();
    for (&id, rock) in state.asteroids.iter_mut() {
        if rock.is_exploded() {
            spent.push(id);
        } else {
            rock.update(&field);
        }
    }

    // Removal happens after the walk so the map is never mutated mid-iteration
    for id in spent {
        if let Some(rock) = state.asteroids.remove(&id) {
            state.player.award(rock.value(), events);
        }
    }
}

/// Run every collision check for this tick and apply the results
fn resolve_collisions(state: &mut World, events: &mut dyn EventSink) {
    let World {
        player,
        alien,
        asteroids,
        seq,
        rng,
        ..
    } = state;

    // Player bullets against rocks and the saucer
    let mut fragments: Vec<Asteroid> = Vec::new();
    let mut bounty = 0;
    for bullet in player.bullets.values_mut() {
        for rock in asteroids.values_mut().filter(|rock| !rock.is_exploded()) {
            if bullet.try_hit(&*rock) {
                events.emit(GameEvent::AsteroidExploded { size: rock.size });
                fragments.extend(rock.explode(rng));
                break;
            }
        }

        if alien.is_alive() && bullet.try_hit(&*alien) && alien.kill(events) {
            bounty += alien.value();
        }
    }

    for fragment in fragments {
        asteroids.insert(seq.next(), fragment);
    }
    if bounty > 0 {
        player.award(bounty, events);
    }

    // Alien bullets against the player. A hit is spent even when the ship
    // shrugs it off.
    for bullet in alien.bullets.values_mut() {
        if player.is_present() && bullet.try_hit(&*player) {
            player.kill(events);
        }
    }

    // Direct contact, no score either way
    for rock in asteroids.values().filter(|rock| !rock.is_exploded()) {
        if player.is_present() && collides(rock, &*player) {
            player.kill(events);
        }
    }
    if alien.is_alive() && player.is_present() && collides(&*alien, &*player) {
        player.kill(events);
    }
}

/// Demo pilot: turn toward the nearest rock and keep firing
fn steer_autopilot(state: &World, input: &mut TickInput) {
    let ship = state.player.pos;
    let nearest = state
        .asteroids
        .values()
        .filter(|rock| !rock.is_exploded())
        .map(|rock| rock.position())
        .min_by(|a, b| {
            a.distance_squared(ship)
                .partial_cmp(&b.distance_squared(ship))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(target) = nearest else { return };
    let offset = normalize_angle(angle_to(ship, target) - state.player.heading);
    // Small dead zone so the ship doesn't jitter around its aim point
    let aimed = !(0.05..=2.0 * PI - 0.05).contains(&offset);

    input.rotate_left = !aimed && offset > PI;
    input.rotate_right = !aimed && offset <= PI;
    input.fire = aimed;
    input.thrust = ship.distance(target) > state.field.height / 2.0 && aimed;
}
