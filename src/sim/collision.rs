//! Circle-approximate collision detection
//!
//! Every entity exposes a centre and an effective radius. The collision
//! pass in [`tick`](super::tick) is written only against this trait.

use glam::Vec2;

/// Anything that can be hit
pub trait Collider {
    /// Centre of the collision circle
    fn position(&self) -> Vec2;
    /// Effective collision radius
    fn size(&self) -> f32;
}

/// Whether two colliders overlap. Symmetric in its arguments.
pub fn collides<A, B>(a: &A, b: &B) -> bool
where
    A: Collider + ?Sized,
    B: Collider + ?Sized,
{
    let reach = a.size() + b.size();
    a.position().distance_squared(b.position()) < reach * reach
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Disc(Vec2, f32);

    impl Collider for Disc {
        fn position(&self) -> Vec2 {
            self.0
        }
        fn size(&self) -> f32 {
            self.1
        }
    }

    #[test]
    fn test_overlapping_discs_collide() {
        let a = Disc(Vec2::new(0.0, 0.0), 5.0);
        let b = Disc(Vec2::new(8.0, 0.0), 4.0);
        assert!(collides(&a, &b));
        assert!(collides(&b, &a));
    }

    #[test]
    fn test_touching_discs_do_not_collide() {
        let a = Disc(Vec2::new(0.0, 0.0), 5.0);
        let b = Disc(Vec2::new(10.0, 0.0), 5.0);
        assert!(!collides(&a, &b));
    }

    #[test]
    fn test_trait_objects() {
        let a: &dyn Collider = &Disc(Vec2::ZERO, 1.0);
        let b: &dyn Collider = &Disc(Vec2::new(0.5, 0.5), 1.0);
        assert!(collides(a, b));
    }
}
