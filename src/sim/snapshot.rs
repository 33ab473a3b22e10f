//! Render-facing view of the world
//!
//! Everything a renderer needs to draw one frame, with no access to the
//! simulation itself.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::alien::AlienState;
use super::asteroid::AsteroidSize;
use super::bullet::{Bullet, BulletKind};
use super::collision::Collider;
use super::state::{GamePhase, World};

/// Sprite selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    Ship { thrusting: bool },
    Alien,
    Asteroid { size: AsteroidSize, variant: u8 },
    Bullet(BulletKind),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drawable {
    pub sprite: SpriteKind,
    /// Sprite centre
    pub position: Vec2,
    /// Rotation in radians
    pub heading: f32,
    /// Opacity, 0..=1
    pub alpha: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerView {
    pub text: String,
    pub position: Vec2,
    pub alpha: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hud {
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub game_over: bool,
    pub paused: bool,
    pub banner: Option<BannerView>,
}

/// One frame's worth of drawing instructions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub drawables: Vec<Drawable>,
    pub hud: Hud,
}

fn bullet_drawable(bullet: &Bullet) -> Drawable {
    Drawable {
        sprite: SpriteKind::Bullet(bullet.kind),
        position: bullet.position(),
        heading: bullet.heading(),
        alpha: bullet.alpha(),
    }
}

impl World {
    /// Build the drawing list for the current state
    pub fn snapshot(&self) -> Frame {
        let mut drawables: Vec<Drawable> = self
            .asteroids
            .values()
            .filter(|rock| !rock.is_exploded())
            .map(|rock| Drawable {
                sprite: SpriteKind::Asteroid {
                    size: rock.size,
                    variant: rock.variant,
                },
                position: rock.position(),
                heading: rock.heading(),
                alpha: 1.0,
            })
            .collect();

        drawables.extend(self.alien.bullets().map(bullet_drawable));
        if self.alien.state() != AlienState::Hidden {
            drawables.push(Drawable {
                sprite: SpriteKind::Alien,
                position: self.alien.pos,
                heading: self.alien.orientation,
                alpha: self.alien.alpha(),
            });
        }

        if !self.player.is_game_over() {
            drawables.extend(self.player.bullets().map(bullet_drawable));
            drawables.push(Drawable {
                sprite: SpriteKind::Ship {
                    thrusting: self.player.thrusting,
                },
                position: self.player.pos,
                heading: self.player.heading,
                alpha: self.player.alpha(),
            });
        }

        let banner = (!self.banner.is_expired()).then(|| BannerView {
            text: self.banner.text(),
            position: self.banner.pos,
            alpha: self.banner.alpha(),
        });

        Frame {
            drawables,
            hud: Hud {
                score: self.player.score,
                lives: self.player.lives,
                level: self.level,
                game_over: self.player.is_game_over(),
                paused: self.phase == GamePhase::Paused,
                banner,
            },
        }
    }
}
