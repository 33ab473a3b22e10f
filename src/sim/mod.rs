//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod alien;
pub mod asteroid;
pub mod banner;
pub mod bullet;
pub mod collision;
pub mod error;
pub mod events;
pub mod geometry;
pub mod player;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod timer;

pub use alien::{Alien, AlienState};
pub use asteroid::{Asteroid, AsteroidSize};
pub use banner::LevelBanner;
pub use bullet::{Bullet, BulletKind};
pub use collision::{Collider, collides};
pub use error::SimError;
pub use events::{EventSink, GameEvent, LogSink, NullSink};
pub use geometry::Dimension;
pub use player::{Player, PlayerState};
pub use snapshot::{BannerView, Drawable, Frame, Hud, SpriteKind};
pub use state::{GamePhase, World, safe_spawn_point};
pub use tick::{TickInput, TickOutcome, tick};
pub use timer::{Sequence, Timer};
