//! Circle-circle collision detection
//!
//! Brute-force pairwise scan. Entity counts stay in the tens, so there is no
//! broad phase. Each frame the session hands over every collision-enabled
//! body, the resolver finds overlapping pairs, then reports them one by one to
//! a `CollisionHandler`.

use glam::Vec2;

use super::entity::EntityRef;

/// A collision-enabled body registered for the current pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub entity: EntityRef,
    pub pos: Vec2,
    pub radius: f32,
}

/// Two overlapping entities, reported once per pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    pub a: EntityRef,
    pub b: EntityRef,
}

/// How distance between centres is measured
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Metric {
    /// True planar distance. Bodies on opposite edges of the playfield never touch.
    #[default]
    Planar,
    /// Minimum-image distance on the wrapping playfield
    Toroidal { half_extents: Vec2 },
}

/// Receives overlapping pairs for adjudication
pub trait CollisionHandler {
    /// Called once per overlapping pair. Either entity may already have been
    /// removed by an earlier pair in the same pass.
    fn handle_collision(&mut self, a: EntityRef, b: EntityRef);
}

/// Pairwise overlap detector
#[derive(Debug, Clone, Default)]
pub struct CollisionResolver {
    metric: Metric,
    colliders: Vec<Collider>,
    pairs: Vec<CollisionPair>,
}

impl CollisionResolver {
    pub fn new(metric: Metric) -> Self {
        Self {
            metric,
            colliders: Vec::new(),
            pairs: Vec::new(),
        }
    }

    /// Drop everything registered for the previous pass
    pub fn clear(&mut self) {
        self.colliders.clear();
        self.pairs.clear();
    }

    /// Register a body for the current pass
    pub fn register(&mut self, entity: EntityRef, pos: Vec2, radius: f32) {
        debug_assert!(radius > 0.0, "collider {entity:?} registered with radius {radius}");
        self.colliders.push(Collider {
            entity,
            pos,
            radius,
        });
    }

    /// Number of bodies registered for the current pass
    #[inline]
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Find every overlapping unordered pair among registered bodies
    pub fn detect(&mut self) -> &[CollisionPair] {
        self.pairs.clear();
        for (i, first) in self.colliders.iter().enumerate() {
            for second in &self.colliders[i + 1..] {
                if self.overlaps(first, second) {
                    self.pairs.push(CollisionPair {
                        a: first.entity,
                        b: second.entity,
                    });
                }
            }
        }
        &self.pairs
    }

    /// Detect, then report each pair to `handler`. Returns the pair count.
    pub fn resolve(&mut self, handler: &mut impl CollisionHandler) -> usize {
        self.detect();
        for pair in &self.pairs {
            handler.handle_collision(pair.a, pair.b);
        }
        self.pairs.len()
    }

    fn overlaps(&self, a: &Collider, b: &Collider) -> bool {
        let delta = match self.metric {
            Metric::Planar => b.pos - a.pos,
            Metric::Toroidal { half_extents } => toroidal_delta(a.pos, b.pos, half_extents),
        };
        circles_overlap(delta, a.radius + b.radius)
    }
}

/// Centres closer than the sum of radii (touching does not count)
#[inline]
pub fn circles_overlap(delta: Vec2, radius_sum: f32) -> bool {
    delta.length_squared() < radius_sum * radius_sum
}

/// Shortest offset from `a` to `b` on the wrapping playfield
pub fn toroidal_delta(a: Vec2, b: Vec2, half_extents: Vec2) -> Vec2 {
    let span = half_extents * 2.0;
    let mut delta = b - a;
    delta.x -= span.x * (delta.x / span.x).round();
    delta.y -= span.y * (delta.y / span.y).round();
    delta
}
