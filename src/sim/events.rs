//! Sound-event output
//!
//! The simulation never touches audio. It reports what happened through an
//! [`EventSink`] handed to [`tick`](super::tick), and the host decides what
//! to play.

use serde::{Deserialize, Serialize};

use super::asteroid::AsteroidSize;

/// Discrete moments a host may want to make noise about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player bullet left the nose
    PlayerFired,
    /// Alien bullet left the saucer
    AlienFired,
    /// An asteroid was shot apart
    AsteroidExploded { size: AsteroidSize },
    /// Alien shot down
    AlienDestroyed,
    /// Player started its death spin
    PlayerDestroyed,
    /// Player came back after a death
    PlayerRespawned,
    /// Score crossed an extra-life threshold
    ExtraLife,
    /// Field cleared, new level begins
    LevelStarted { level: u32 },
    /// Last life lost
    GameOver,
}

/// Receiver for [`GameEvent`]s
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: GameEvent) {
        log::debug!("sound event: {event:?}");
    }
}

/// Sink that drops everything
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: GameEvent) {}
}
