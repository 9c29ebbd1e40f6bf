//! Entity handles and shared body data
//!
//! Every collection in the session is a slot map, so an `EntityRef` is a
//! generational handle. Once an entity is removed its handle never resolves
//! again, even if the slot is reused.

use glam::Vec2;
use slotmap::new_key_type;

use crate::wrap_position;

new_key_type! {
    /// Handle to an asteroid slot
    pub struct AsteroidId;
    /// Handle to a bullet slot
    pub struct BulletId;
}

/// What an entity is, readable without touching any collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Ship,
    Asteroid,
    Bullet,
    Explosion,
}

/// Tagged handle to a collision-enabled entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    /// The session's single ship slot
    Ship,
    Asteroid(AsteroidId),
    Bullet(BulletId),
}

impl EntityRef {
    #[inline]
    pub fn kind(self) -> EntityKind {
        match self {
            EntityRef::Ship => EntityKind::Ship,
            EntityRef::Asteroid(_) => EntityKind::Asteroid,
            EntityRef::Bullet(_) => EntityKind::Bullet,
        }
    }

    #[inline]
    pub fn is_ship(self) -> bool {
        matches!(self, EntityRef::Ship)
    }

    #[inline]
    pub fn as_asteroid(self) -> Option<AsteroidId> {
        match self {
            EntityRef::Asteroid(id) => Some(id),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bullet(self) -> Option<BulletId> {
        match self {
            EntityRef::Bullet(id) => Some(id),
            _ => None,
        }
    }
}

/// Kinematic state shared by every simulated object.
///
/// An entity is alive for exactly as long as it occupies a slot; there is no
/// separate flag to fall out of sync.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Collision radius, 0 = does not take part in collisions
    pub radius: f32,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Linear motion, one frame
    #[inline]
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    /// Wrap position onto the playfield torus
    #[inline]
    pub fn wrap(&mut self, half_extents: Vec2) {
        self.pos = wrap_position(self.pos, half_extents);
    }

    #[inline]
    pub fn collides(&self) -> bool {
        self.radius > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_integrate_and_wrap() {
        let mut body = Body::new(Vec2::new(399.0, 0.0), Vec2::new(2.0, 0.0), 5.0);
        body.integrate();
        assert_eq!(body.pos.x, 401.0);
        body.wrap(Vec2::new(400.0, 300.0));
        assert!((body.pos.x - (-399.0)).abs() < 1e-4);
    }

    #[test]
    fn test_zero_radius_disables_collisions() {
        assert!(!Body::new(Vec2::ZERO, Vec2::ZERO, 0.0).collides());
        assert!(Body::new(Vec2::ZERO, Vec2::ZERO, 3.0).collides());
    }

    #[test]
    fn test_stale_handle_does_not_resolve_after_reuse() {
        let mut map: SlotMap<AsteroidId, u8> = SlotMap::with_key();
        let old = map.insert(3);
        map.remove(old);
        let new = map.insert(2);
        assert_ne!(old, new);
        assert!(map.get(old).is_none());
        assert_eq!(EntityRef::Asteroid(new).kind(), EntityKind::Asteroid);
    }
}
